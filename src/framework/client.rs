//! # Mailbox Client
//!
//! The generic "client" half of an actor: a cloneable sender plus the
//! request/reply handshake.

use crate::framework::{FrameworkError, Response};
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for sending `M` requests to an actor.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Request/reply** – [`request`](MailboxClient::request) builds the message around a
///   fresh oneshot channel and awaits the answer.
pub struct MailboxClient<M> {
    sender: mpsc::Sender<M>,
}

impl<M> Clone for MailboxClient<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M: Send + 'static> MailboxClient<M> {
    pub fn new(sender: mpsc::Sender<M>) -> Self {
        Self { sender }
    }

    /// Sends a request and waits for the actor's reply.
    ///
    /// `build` receives the reply channel and wraps it into a request message.
    pub async fn request<T, E>(&self, build: impl FnOnce(Response<T, E>) -> M) -> Result<T, E>
    where
        E: From<FrameworkError>,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| E::from(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| E::from(FrameworkError::ActorDropped))?
    }

    /// `true` once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
