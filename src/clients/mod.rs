//! Type-safe wrappers around [`MailboxClient`](crate::framework::MailboxClient).

pub mod sync_client;

pub use sync_client::*;
