use crate::framework::{FrameworkError, MailboxClient};
use crate::model::{Identity, IdentityId};
use crate::store::ViewState;
use crate::sync_actor::{RefreshOutcome, SyncError, SyncPhase, SyncRequest};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for the sync actor.
///
/// Commands go through the mailbox; the view is read straight from the watch
/// channel the actor publishes to, without a round trip.
#[derive(Clone)]
pub struct SyncClient {
    inner: MailboxClient<SyncRequest>,
    view: watch::Receiver<Arc<ViewState>>,
}

impl SyncClient {
    pub fn new(inner: MailboxClient<SyncRequest>, view: watch::Receiver<Arc<ViewState>>) -> Self {
        Self { inner, view }
    }

    /// Selects the exhibitor to track and starts its first cycle immediately.
    #[instrument(skip(self))]
    pub async fn select_identity(&self, identity_id: impl Into<IdentityId> + std::fmt::Debug) -> Result<Identity, SyncError> {
        let identity_id = identity_id.into();
        debug!("Sending select_identity to actor");
        self.inner
            .request(|respond_to| SyncRequest::SelectIdentity {
                identity_id,
                respond_to,
            })
            .await
    }

    /// Stops polling. A cycle still in flight is never committed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SyncError> {
        debug!("Sending logout to actor");
        self.inner.request(|respond_to| SyncRequest::Logout { respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn refresh_now(&self) -> Result<RefreshOutcome, SyncError> {
        debug!("Sending refresh_now to actor");
        self.inner.request(|respond_to| SyncRequest::RefreshNow { respond_to }).await
    }

    pub async fn phase(&self) -> Result<SyncPhase, SyncError> {
        self.inner.request(|respond_to| SyncRequest::Phase { respond_to }).await
    }

    /// The latest published view.
    pub fn view(&self) -> Arc<ViewState> {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.view.clone()
    }

    /// Waits for the first published view satisfying `predicate`, including the current one.
    pub async fn wait_for_view(&self, mut predicate: impl FnMut(&ViewState) -> bool) -> Result<Arc<ViewState>, SyncError> {
        let mut view = self.view.clone();
        let state = view
            .wait_for(|state| predicate(state.as_ref()))
            .await
            .map_err(|_| SyncError::from(FrameworkError::ActorClosed))?;
        Ok(state.clone())
    }
}
