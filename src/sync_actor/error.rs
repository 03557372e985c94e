//! Error types for the sync actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors returned by sync commands.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyncError {
    /// The requested exhibitor is not in the directory.
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    /// The actor could not be reached or dropped the reply.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
