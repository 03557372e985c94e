//! # Framework Errors
//!
//! Errors raised by the mailbox plumbing itself, independent of what the actor
//! behind the mailbox does.

/// Errors that can occur while talking to an actor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}
