use crate::model::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// An order went out for delivery.
    Delivery,
    /// An order was delivered.
    Success,
}

impl NotificationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Success => "success",
        }
    }
}

impl Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic notification identifier: `{order_id}/{category}/{cycle millis}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

impl NotificationId {
    pub fn derive(order_id: &OrderId, category: NotificationCategory, cycle_at: DateTime<Utc>) -> Self {
        Self(format!("{order_id}/{category}/{}", cycle_at.timestamp_millis()))
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ephemeral live-update message shown to the exhibitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub order_id: OrderId,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub category: NotificationCategory,
}

impl Notification {
    pub fn out_for_delivery(order_id: &OrderId, item: &str, cycle_at: DateTime<Utc>) -> Self {
        Self::build(order_id, format!("{item} is out for delivery!"), NotificationCategory::Delivery, cycle_at)
    }

    pub fn delivered(order_id: &OrderId, item: &str, cycle_at: DateTime<Utc>) -> Self {
        Self::build(order_id, format!("{item} has been delivered"), NotificationCategory::Success, cycle_at)
    }

    fn build(order_id: &OrderId, message: String, category: NotificationCategory, cycle_at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::derive(order_id, category, cycle_at),
            order_id: order_id.clone(),
            message,
            created_at: cycle_at,
            category,
        }
    }
}
