use crate::fetcher::FetchResult;
use crate::framework::Response;
use crate::model::{Identity, IdentityId};
use crate::sync_actor::{CycleTag, RefreshOutcome, SyncError, SyncPhase};

/// Commands accepted by the sync actor.
#[derive(Debug)]
pub enum SyncRequest {
    SelectIdentity {
        identity_id: IdentityId,
        respond_to: Response<Identity, SyncError>,
    },
    Logout {
        respond_to: Response<(), SyncError>,
    },
    RefreshNow {
        respond_to: Response<RefreshOutcome, SyncError>,
    },
    Phase {
        respond_to: Response<SyncPhase, SyncError>,
    },
}

/// A finished fetch, reported back to the actor by its cycle task.
#[derive(Debug)]
pub struct CycleOutcome {
    pub tag: CycleTag,
    pub result: FetchResult,
}
