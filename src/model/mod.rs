//! Pure data structures shared by every layer: statuses, orders, identities,
//! snapshots and notifications.

pub mod identity;
pub mod notification;
pub mod order;
pub mod snapshot;
pub mod status;

pub use identity::*;
pub use notification::*;
pub use order::*;
pub use snapshot::*;
pub use status::*;
