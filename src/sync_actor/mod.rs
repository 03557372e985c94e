//! Order synchronization: the scheduler actor, its state machine and messages.

pub mod error;
pub mod messages;
pub mod scheduler;
pub mod state;

pub use error::*;
pub use messages::*;
pub use scheduler::SyncScheduler;
pub use state::*;

use crate::clients::SyncClient;
use crate::fetcher::OrderFetcher;
use crate::framework::MailboxClient;
use crate::model::IdentityDirectory;
use crate::store::ViewStateStore;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates a new sync actor and its client.
pub fn new(directory: IdentityDirectory, fetcher: OrderFetcher, refresh_interval: Duration) -> (SyncScheduler, SyncClient) {
    let (sender, receiver) = mpsc::channel(32);
    let (store, view) = ViewStateStore::new();
    let actor = SyncScheduler::new(receiver, directory, fetcher, store, SyncMachine::new(refresh_interval));
    let client = SyncClient::new(MailboxClient::new(sender), view);

    (actor, client)
}
