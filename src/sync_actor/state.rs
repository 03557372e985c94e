//! The scheduler's state machine as a plain value.
//!
//! [`SyncMachine`] decides; the actor executes. Every input returns a [`Step`]
//! telling the actor what to do (launch a fetch, commit a result, drop it).
//! Time is passed in, so the machine is tested without a runtime.
//!
//! ```text
//!          select                 resolve
//!   Idle ─────────▶ InFlight ─────────────▶ Waiting
//!                     ▲  ▲                     │
//!                     │  └──── timer/refresh ──┘
//!                     │ select
//!   Stopped ──────────┘        (logout from anywhere ─▶ Stopped)
//! ```

use crate::model::{Identity, IdentityId};
use std::fmt::Display;
use std::time::Duration;
use tokio::time::Instant;

/// Identifies one fetch cycle. A result is committed only if its tag is the
/// machine's current in-flight tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CycleTag {
    pub identity: IdentityId,
    pub sequence: u64,
}

impl Display for CycleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.identity, self.sequence)
    }
}

/// Externally visible scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Waiting,
    InFlight,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Waiting { deadline: Instant },
    InFlight { tag: CycleTag },
    Stopped,
}

/// What the actor must do after feeding an input to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Start a fetch for `identity` tagged `tag`; abort `superseded` if set.
    Launch {
        identity: Identity,
        tag: CycleTag,
        superseded: Option<CycleTag>,
    },
    /// Commit the result; the next timer fires at `next_deadline`.
    Commit { next_deadline: Instant },
    /// A cycle is already outstanding.
    Coalesced,
    /// A stale result; drop it.
    Discard,
    /// A timer that is no longer relevant.
    Ignored,
    /// Polling stopped; abort `superseded` if set.
    Halt { superseded: Option<CycleTag> },
    /// No identity selected.
    NoIdentity,
}

/// Reply to `refresh_now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Started,
    Coalesced,
    NoIdentity,
}

#[derive(Debug)]
pub struct SyncMachine {
    phase: Phase,
    active: Option<Identity>,
    refresh_interval: Duration,
    next_sequence: u64,
}

impl SyncMachine {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            active: None,
            refresh_interval,
            next_sequence: 1,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        match self.phase {
            Phase::Idle => SyncPhase::Idle,
            Phase::Waiting { .. } => SyncPhase::Waiting,
            Phase::InFlight { .. } => SyncPhase::InFlight,
            Phase::Stopped => SyncPhase::Stopped,
        }
    }

    pub fn active(&self) -> Option<&Identity> {
        self.active.as_ref()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// When the armed timer fires, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Waiting { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Starts a session for `identity`, superseding whatever was running.
    pub fn select(&mut self, identity: Identity) -> Step {
        let superseded = self.take_in_flight();
        self.active = Some(identity.clone());
        let tag = self.begin_cycle(&identity);
        Step::Launch {
            identity,
            tag,
            superseded,
        }
    }

    pub fn logout(&mut self) -> Step {
        let superseded = self.take_in_flight();
        self.active = None;
        self.phase = Phase::Stopped;
        Step::Halt { superseded }
    }

    pub fn refresh(&mut self) -> Step {
        if matches!(self.phase, Phase::InFlight { .. }) {
            return Step::Coalesced;
        }
        match (self.deadline(), self.active.clone()) {
            (Some(_), Some(identity)) => self.launch(identity),
            _ => Step::NoIdentity,
        }
    }

    pub fn timer_fired(&mut self, now: Instant) -> Step {
        match (self.deadline(), self.active.clone()) {
            (Some(deadline), Some(identity)) if deadline <= now => self.launch(identity),
            _ => Step::Ignored,
        }
    }

    /// A fetch finished. Only the current cycle's result moves the machine.
    pub fn resolve(&mut self, tag: &CycleTag, now: Instant) -> Step {
        let is_current = matches!(&self.phase, Phase::InFlight { tag: current } if current == tag);
        if !is_current {
            return Step::Discard;
        }
        let next_deadline = now + self.refresh_interval;
        self.phase = Phase::Waiting {
            deadline: next_deadline,
        };
        Step::Commit { next_deadline }
    }

    fn launch(&mut self, identity: Identity) -> Step {
        let tag = self.begin_cycle(&identity);
        Step::Launch {
            identity,
            tag,
            superseded: None,
        }
    }

    fn begin_cycle(&mut self, identity: &Identity) -> CycleTag {
        let tag = CycleTag {
            identity: identity.id.clone(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.phase = Phase::InFlight { tag: tag.clone() };
        tag
    }

    fn take_in_flight(&mut self) -> Option<CycleTag> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::InFlight { tag } => Some(tag),
            _ => None,
        }
    }
}
