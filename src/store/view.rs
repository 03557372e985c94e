use crate::deriver::Anomaly;
use crate::model::{Identity, Notification, Order, OrderStatus, Snapshot};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How trustworthy the published snapshot is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncHealth {
    /// The last cycle reached the backend.
    #[default]
    Live,
    /// The last cycle failed; the snapshot is stale or placeholder data.
    Degraded,
    /// The last cycle failed and no fallback was applied.
    Failed,
}

/// One published, immutable view of the synchronized orders.
///
/// Every accessor is a pure derivation of the fields; nothing here is cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub identity: Option<Identity>,
    pub snapshot: Option<Arc<Snapshot>>,
    pub notifications: Vec<Notification>,
    pub anomalies: Vec<Anomaly>,
    pub loading: bool,
    pub health: SyncHealth,
    pub last_error: Option<String>,
    /// Timestamp of the last snapshot confirmed by the backend.
    pub last_updated: Option<DateTime<Utc>>,
    pub is_placeholder: bool,
    /// Bumped on every publish.
    pub revision: u64,
}

impl ViewState {
    /// Orders in ascending id order; empty before the first commit.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.snapshot.iter().flat_map(|snapshot| snapshot.orders())
    }

    pub fn order_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |snapshot| snapshot.len())
    }

    pub fn delivered_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |snapshot| snapshot.delivered_count())
    }

    pub fn pending_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |snapshot| snapshot.pending_count())
    }

    pub fn status_counts(&self) -> BTreeMap<OrderStatus, usize> {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.status_counts())
            .unwrap_or_default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn health(&self) -> SyncHealth {
        self.health
    }

    pub fn is_placeholder(&self) -> bool {
        self.is_placeholder
    }
}
