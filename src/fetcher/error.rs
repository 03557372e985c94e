//! # Fetch Errors
//!
//! Two families, handled very differently:
//!
//! - [`FetchError`] is a transport failure. The whole cycle falls back to the
//!   degraded path.
//! - [`MalformedOrder`] rejects one order. The rest of the snapshot survives.

use crate::model::UnknownStatus;
use std::time::Duration;

/// The remote source could not deliver a usable order report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("order source unreachable: {0}")]
    Transport(String),
    #[error("order source did not answer within {0:?}")]
    Timeout(Duration),
    #[error("order source answered with status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("order source response was malformed: {0}")]
    MalformedResponse(String),
    #[error("order source misconfigured: {0}")]
    Configuration(String),
}

/// A single raw order that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedOrder {
    #[error("order {} is missing required field `{field}`", display_id(.order_id))]
    MissingField {
        order_id: Option<String>,
        field: &'static str,
    },
    #[error("order {order_id} has an unrecognized status")]
    UnknownStatus {
        order_id: String,
        #[source]
        source: UnknownStatus,
    },
    #[error("order {order_id} has non-positive quantity {quantity}")]
    InvalidQuantity { order_id: String, quantity: i64 },
    #[error("order {order_id} appears more than once")]
    DuplicateId { order_id: String },
    #[error("order record could not be decoded: {0}")]
    Undecodable(String),
}

fn display_id(order_id: &Option<String>) -> &str {
    order_id.as_deref().unwrap_or("<unidentified>")
}
