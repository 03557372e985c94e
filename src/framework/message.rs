//! # Generic Messages
//!
//! Reply plumbing shared by every request enum sent to an actor.

use crate::framework::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
///
/// Actors whose replies can fail for domain reasons pick their own error type `E`;
/// it must absorb [`FrameworkError`] so the client can report a closed mailbox.
pub type Response<T, E = FrameworkError> = oneshot::Sender<Result<T, E>>;

/// Sends a reply, tolerating a caller that stopped waiting.
pub fn respond<T, E>(respond_to: Response<T, E>, result: Result<T, E>) {
    if respond_to.send(result).is_err() {
        tracing::debug!("Caller dropped before reply");
    }
}
