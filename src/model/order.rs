//! Orders as committed to a [`Snapshot`](crate::model::Snapshot).
//!
//! Orders only exist in validated form: the fetcher converts raw wire records with
//! [`normalize`](crate::fetcher::normalize()) before anything else sees them.

use crate::model::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders (e.g. `ORD-2025-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item: String,
    pub description: String,
    pub color: String,
    pub quantity: u32,
    pub status: OrderStatus,
    pub order_date: String,
    pub section: String,
    pub comments: Option<String>,
}

impl Order {
    /// Creates an order with empty descriptive fields.
    ///
    /// # Arguments
    /// * `id` - Unique order identifier
    /// * `item` - Item name shown to the exhibitor
    /// * `quantity` - Ordered quantity (callers guarantee it is positive)
    /// * `status` - Current fulfillment status
    pub fn new(id: impl Into<OrderId>, item: impl Into<String>, quantity: u32, status: OrderStatus) -> Self {
        Self {
            id: id.into(),
            item: item.into(),
            description: String::new(),
            color: String::new(),
            quantity,
            status,
            order_date: String::new(),
            section: String::new(),
            comments: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    /// Neither delivered nor cancelled.
    pub fn is_pending(&self) -> bool {
        !self.status.is_terminal()
    }
}
