//! # Mock Mailbox
//!
//! Utilities for testing client wrappers without spawning the actor behind them.
//!
//! [`create_mock_mailbox`] returns a [`MailboxClient`] whose requests land on a
//! receiver the test controls. The test pulls the next request with
//! [`expect_request`], inspects it, and answers through the reply channel it
//! carries. This makes success, failure and "actor went away" deterministic.
//!
//! ```rust
//! use expoflow_sync::framework::mock::{create_mock_mailbox, expect_request};
//! use expoflow_sync::framework::{FrameworkError, Response};
//!
//! #[derive(Debug)]
//! enum Ping { Ping { respond_to: Response<u32> } }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_mailbox::<Ping>(4);
//!     let call = tokio::spawn(async move {
//!         client.request(|respond_to| Ping::Ping { respond_to }).await
//!     });
//!
//!     let Ping::Ping { respond_to } = expect_request(&mut receiver).await.unwrap();
//!     respond_to.send(Ok(7)).unwrap();
//!     assert_eq!(call.await.unwrap(), Ok::<u32, FrameworkError>(7));
//! }
//! ```

use crate::framework::MailboxClient;
use tokio::sync::mpsc;

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_mailbox<M: Send + 'static>(buffer_size: usize) -> (MailboxClient<M>, mpsc::Receiver<M>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MailboxClient::new(sender), receiver)
}

/// Waits for the next request. `None` once every client is dropped.
pub async fn expect_request<M>(receiver: &mut mpsc::Receiver<M>) -> Option<M> {
    receiver.recv().await
}
