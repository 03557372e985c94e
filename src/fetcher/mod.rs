//! # Order Fetcher
//!
//! One reconciliation cycle: ask the [`OrderSource`] for the identity's orders,
//! validate them, and classify the outcome as a [`FetchResult`].
//!
//! ## Outcomes
//!
//! - **Fresh** – the source answered; the snapshot carries the source's timestamp.
//! - **Degraded** – the source failed and [`FallbackPolicy::Degrade`] is active; the
//!   snapshot is the local placeholder stamped with the local clock. It is never
//!   reported as fresh.
//! - **Failed** – the source failed and [`FallbackPolicy::Fail`] is active.
//!
//! Every source call is bounded by the fetcher's own timeout, so a stuck source
//! ends up on the same path as a refused connection.
//!
//! ## Structure
//!
//! - [`source`] - [`OrderSource`] trait and wire DTOs
//! - [`http`] - [`HttpOrderSource`] backed by `reqwest`
//! - [`normalize`] - record-by-record validation into a [`Snapshot`]
//! - [`placeholder`] - offline stand-in orders
//! - [`mock`] - scripted source for tests

pub mod error;
pub mod http;
pub mod mock;
pub mod normalize;
pub mod placeholder;
pub mod source;

pub use error::*;
pub use http::*;
pub use normalize::{normalize, Normalized};
pub use placeholder::placeholder_snapshot;
pub use source::*;

use crate::model::{Identity, Snapshot};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// What to do when the source cannot deliver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Substitute the placeholder snapshot and keep the UI populated.
    #[default]
    Degrade,
    /// Surface the failure as [`FetchResult::Failed`].
    Fail,
}

/// The classified outcome of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Fresh(Snapshot),
    Degraded { snapshot: Snapshot, cause: FetchError },
    Failed(FetchError),
}

impl FetchResult {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Fresh(snapshot) | Self::Degraded { snapshot, .. } => Some(snapshot),
            Self::Failed(_) => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Fresh(_) => None,
            Self::Degraded { cause, .. } => Some(cause),
            Self::Failed(error) => Some(error),
        }
    }
}

pub struct OrderFetcher {
    source: Arc<dyn OrderSource>,
    policy: FallbackPolicy,
    timeout: Duration,
}

impl OrderFetcher {
    pub fn new(source: Arc<dyn OrderSource>, policy: FallbackPolicy, timeout: Duration) -> Self {
        Self {
            source,
            policy,
            timeout,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub async fn fetch(&self, identity: &Identity) -> FetchResult {
        let outcome = match tokio::time::timeout(self.timeout, self.source.fetch_orders(identity)).await {
            Ok(reply) => reply.and_then(normalize),
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(Normalized { snapshot, rejected }) => {
                info!(
                    identity = %identity.id,
                    orders = snapshot.len(),
                    rejected = rejected.len(),
                    "Fetched orders"
                );
                FetchResult::Fresh(snapshot)
            }
            Err(error) => match self.policy {
                FallbackPolicy::Degrade => {
                    warn!(identity = %identity.id, %error, "Fetch failed, using placeholder orders");
                    FetchResult::Degraded {
                        snapshot: placeholder_snapshot(identity, Utc::now()),
                        cause: error,
                    }
                }
                FallbackPolicy::Fail => {
                    warn!(identity = %identity.id, %error, "Fetch failed");
                    FetchResult::Failed(error)
                }
            },
        }
    }
}
