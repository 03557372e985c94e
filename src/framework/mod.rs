//! Generic actor plumbing.
//!
//! An actor in this crate is a Tokio task that owns its state and drains an
//! `mpsc` mailbox. Callers never touch the channel directly: they hold a
//! [`MailboxClient`] and exchange request messages that carry a oneshot
//! [`Response`] channel.
//!
//! # Main Components
//!
//! - [`MailboxClient`] - Cloneable request/reply handle
//! - [`Response`] - Reply channel carried inside request messages
//! - [`FrameworkError`] - Mailbox failures (actor closed, reply dropped)
//!
//! # Testing
//!
//! See [`mock`] for driving a client without spawning its actor.

pub mod client;
pub mod error;
pub mod message;
pub mod mock;

pub use client::MailboxClient;
pub use error::FrameworkError;
pub use message::{respond, Response};
