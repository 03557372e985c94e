//! # Sync Scheduler
//!
//! The actor half of synchronization. One task owns the [`SyncMachine`], the
//! [`ViewStateStore`] and the handle of the outstanding fetch, and reacts to three
//! event sources:
//!
//! 1. **Mailbox** – commands from [`SyncClient`](crate::clients::SyncClient)s.
//! 2. **Cycle outcomes** – finished fetches, reported by their spawned tasks.
//! 3. **Timer** – the fixed-delay deadline armed after each commit.
//!
//! Because all three are drained by the same loop, a commit can never interleave
//! with a command. At most one fetch is outstanding; a superseded fetch task is
//! aborted, and any result it still manages to send fails the tag check.

use crate::fetcher::OrderFetcher;
use crate::framework::respond;
use crate::model::{Identity, IdentityDirectory, IdentityId};
use crate::store::ViewStateStore;
use crate::sync_actor::{CycleOutcome, CycleTag, RefreshOutcome, Step, SyncError, SyncMachine, SyncRequest};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, info_span, warn, Instrument};

pub struct SyncScheduler {
    receiver: mpsc::Receiver<SyncRequest>,
    directory: IdentityDirectory,
    fetcher: Arc<OrderFetcher>,
    store: ViewStateStore,
    machine: SyncMachine,
    outcome_sender: mpsc::UnboundedSender<CycleOutcome>,
    outcomes: mpsc::UnboundedReceiver<CycleOutcome>,
    in_flight: Option<JoinHandle<()>>,
}

impl SyncScheduler {
    pub(crate) fn new(
        receiver: mpsc::Receiver<SyncRequest>,
        directory: IdentityDirectory,
        fetcher: OrderFetcher,
        store: ViewStateStore,
        machine: SyncMachine,
    ) -> Self {
        let (outcome_sender, outcomes) = mpsc::unbounded_channel();
        Self {
            receiver,
            directory,
            fetcher: Arc::new(fetcher),
            store,
            machine,
            outcome_sender,
            outcomes,
            in_flight: None,
        }
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self) {
        info!(
            refresh_secs = self.machine.refresh_interval().as_secs(),
            exhibitors = self.directory.len(),
            "Sync actor started"
        );

        loop {
            let deadline = self.machine.deadline();
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(outcome) = self.outcomes.recv() => self.handle_outcome(outcome),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    let step = self.machine.timer_fired(Instant::now());
                    self.apply(step);
                }
            }
        }

        self.abort_in_flight();
        info!(revision = self.store.current().revision, "Sync actor stopped");
    }

    fn handle_request(&mut self, request: SyncRequest) {
        match request {
            SyncRequest::SelectIdentity {
                identity_id,
                respond_to,
            } => {
                let result = self.select(&identity_id);
                respond(respond_to, result);
            }
            SyncRequest::Logout { respond_to } => {
                info!(identity = ?self.machine.active().map(|identity| &identity.id), "Logout");
                let step = self.machine.logout();
                self.apply(step);
                respond(respond_to, Ok(()));
            }
            SyncRequest::RefreshNow { respond_to } => {
                let outcome = match self.machine.refresh() {
                    step @ Step::Launch { .. } => {
                        self.apply(step);
                        RefreshOutcome::Started
                    }
                    Step::Coalesced => RefreshOutcome::Coalesced,
                    _ => RefreshOutcome::NoIdentity,
                };
                debug!(?outcome, "Refresh requested");
                respond(respond_to, Ok(outcome));
            }
            SyncRequest::Phase { respond_to } => respond(respond_to, Ok(self.machine.phase())),
        }
    }

    fn select(&mut self, identity_id: &IdentityId) -> Result<Identity, SyncError> {
        let Some(identity) = self.directory.find(identity_id).cloned() else {
            warn!(identity = %identity_id, "Unknown identity");
            return Err(SyncError::UnknownIdentity(identity_id.to_string()));
        };

        info!(identity = %identity.id, name = %identity.display_name, "Identity selected");
        self.store.reset(Some(identity.clone()));
        let step = self.machine.select(identity.clone());
        self.apply(step);
        Ok(identity)
    }

    fn handle_outcome(&mut self, outcome: CycleOutcome) {
        let CycleOutcome { tag, result } = outcome;
        match self.machine.resolve(&tag, Instant::now()) {
            Step::Commit { next_deadline } => {
                self.in_flight = None;
                let view = self.store.commit(result);
                info!(
                    cycle = %tag,
                    orders = view.order_count(),
                    notifications = view.notifications().len(),
                    health = ?view.health(),
                    next_in_secs = next_deadline.saturating_duration_since(Instant::now()).as_secs(),
                    "Cycle committed"
                );
            }
            _ => debug!(cycle = %tag, "Discarding stale cycle result"),
        }
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Launch {
                identity,
                tag,
                superseded,
            } => {
                if let Some(superseded) = superseded {
                    debug!(cycle = %superseded, "Superseding in-flight cycle");
                }
                self.abort_in_flight();
                self.launch(identity, tag);
            }
            Step::Halt { superseded } => {
                if let Some(superseded) = superseded {
                    debug!(cycle = %superseded, "Abandoning in-flight cycle");
                }
                self.abort_in_flight();
                self.store.cancel_load();
            }
            Step::Commit { .. }
            | Step::Coalesced
            | Step::Discard
            | Step::Ignored
            | Step::NoIdentity => {}
        }
    }

    fn launch(&mut self, identity: Identity, tag: CycleTag) {
        self.store.begin_load();
        let fetcher = self.fetcher.clone();
        let outcomes = self.outcome_sender.clone();
        let span = info_span!("sync_cycle", identity = %tag.identity, cycle = tag.sequence);

        debug!(cycle = %tag, "Launching cycle");
        self.in_flight = Some(tokio::spawn(
            async move {
                let result = fetcher.fetch(&identity).await;
                // The receiver lives in the actor; a send failure means it stopped.
                let _ = outcomes.send(CycleOutcome { tag, result });
            }
            .instrument(span),
        ));
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
