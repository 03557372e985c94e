//! # View State Store
//!
//! The single owner of what presentation sees. Each write builds a complete new
//! [`ViewState`] and swaps it into a `watch` channel, so readers observe either the
//! old state or the new one, never a half-applied commit.
//!
//! The store is written only by the sync actor; readers hold a
//! `watch::Receiver<Arc<ViewState>>`.
//!
//! ## Commit rules
//!
//! | Fetch result | Snapshot | Notifications | Health |
//! |--------------|----------|---------------|--------|
//! | `Fresh` | replaced, `last_updated` = snapshot time | derived against the last fresh snapshot | `Live` |
//! | `Degraded` | kept if one exists, placeholder otherwise | untouched | `Degraded` |
//! | `Failed` | kept | untouched | `Failed` |
//!
//! Every commit clears `loading`.

mod view;

pub use view::*;

use crate::deriver::NotificationDeriver;
use crate::fetcher::FetchResult;
use crate::model::{Identity, Notification, Snapshot};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

pub struct ViewStateStore {
    deriver: NotificationDeriver,
    /// Last snapshot confirmed by the backend; the diff baseline.
    baseline: Option<Arc<Snapshot>>,
    sender: watch::Sender<Arc<ViewState>>,
}

impl ViewStateStore {
    pub fn new() -> (Self, watch::Receiver<Arc<ViewState>>) {
        Self::with_deriver(NotificationDeriver::default())
    }

    pub fn with_deriver(deriver: NotificationDeriver) -> (Self, watch::Receiver<Arc<ViewState>>) {
        let (sender, receiver) = watch::channel(Arc::new(ViewState::default()));
        let store = Self {
            deriver,
            baseline: None,
            sender,
        };
        (store, receiver)
    }

    pub fn current(&self) -> Arc<ViewState> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.sender.subscribe()
    }

    /// Marks a cycle as started without touching the snapshot.
    pub fn begin_load(&mut self) -> Arc<ViewState> {
        self.update(|state| state.loading = true)
    }

    /// Clears `loading` for a cycle that will never commit.
    pub fn cancel_load(&mut self) -> Arc<ViewState> {
        self.update(|state| state.loading = false)
    }

    /// Starts a new session. Everything from the previous identity is dropped.
    pub fn reset(&mut self, identity: Option<Identity>) -> Arc<ViewState> {
        self.baseline = None;
        self.update(|state| {
            *state = ViewState {
                identity,
                revision: state.revision,
                ..ViewState::default()
            }
        })
    }

    /// Applies one cycle's outcome and publishes the result.
    pub fn commit(&mut self, result: FetchResult) -> Arc<ViewState> {
        match result {
            FetchResult::Fresh(snapshot) => {
                let derivation = self.deriver.diff(self.baseline.as_deref(), &snapshot);
                let snapshot = Arc::new(snapshot);
                self.baseline = Some(snapshot.clone());
                let limit = self.deriver.limit();

                self.update(move |state| {
                    state.notifications = merge_notifications(derivation.notifications, &state.notifications, limit);
                    state.anomalies = derivation.anomalies;
                    state.last_updated = Some(snapshot.taken_at());
                    state.snapshot = Some(snapshot);
                    state.is_placeholder = false;
                    state.health = SyncHealth::Live;
                    state.last_error = None;
                    state.loading = false;
                })
            }
            FetchResult::Degraded { snapshot, cause } => self.update(move |state| {
                if state.snapshot.is_none() {
                    state.snapshot = Some(Arc::new(snapshot));
                    state.is_placeholder = true;
                }
                state.anomalies.clear();
                state.health = SyncHealth::Degraded;
                state.last_error = Some(cause.to_string());
                state.loading = false;
            }),
            FetchResult::Failed(error) => self.update(move |state| {
                state.anomalies.clear();
                state.health = SyncHealth::Failed;
                state.last_error = Some(error.to_string());
                state.loading = false;
            }),
        }
    }

    fn update(&mut self, apply: impl FnOnce(&mut ViewState)) -> Arc<ViewState> {
        let mut next = ViewState::clone(&self.current());
        apply(&mut next);
        next.revision += 1;
        debug!(
            revision = next.revision,
            orders = next.order_count(),
            loading = next.loading,
            health = ?next.health,
            "Publishing view"
        );
        let next = Arc::new(next);
        self.sender.send_replace(next.clone());
        next
    }
}

/// New notifications first, then the retained ones not superseded by id.
fn merge_notifications(fresh: Vec<Notification>, retained: &[Notification], limit: usize) -> Vec<Notification> {
    let seen: HashSet<_> = fresh.iter().map(|notification| notification.id.clone()).collect();
    let mut merged = fresh;
    merged.extend(
        retained
            .iter()
            .filter(|notification| !seen.contains(&notification.id))
            .cloned(),
    );
    merged.truncate(limit);
    merged
}
