//! Offline stand-in orders shown when the backend cannot be reached.

use crate::model::{Identity, Order, OrderStatus, Snapshot};
use chrono::{DateTime, Utc};

/// The fallback snapshot for `identity`, stamped with the local clock.
///
/// The content does not depend on the identity; it only keeps the dashboard
/// populated until real data arrives.
pub fn placeholder_snapshot(identity: &Identity, now: DateTime<Utc>) -> Snapshot {
    tracing::debug!(identity = %identity.id, "Synthesizing placeholder orders");
    Snapshot::new(placeholder_orders(), now)
}

fn placeholder_orders() -> Vec<Order> {
    vec![
        Order {
            description: "Complete booth installation with premium furniture, lighting, and tech setup".to_string(),
            color: "White".to_string(),
            order_date: "June 14, 2025".to_string(),
            ..Order::new("ORD-2025-001", "Premium Booth Setup Package", 1, OrderStatus::OutForDelivery)
        },
        Order {
            description: "75\" 4K touchscreen display with interactive software and mounting".to_string(),
            color: "Black".to_string(),
            order_date: "June 13, 2025".to_string(),
            ..Order::new("ORD-2025-002", "Interactive Display System", 1, OrderStatus::InRoute)
        },
    ]
}
