//! # Notification Deriver
//!
//! Compares two snapshots order by order and turns the meaningful transitions
//! into live-update [`Notification`]s.
//!
//! ## Rules
//!
//! | Previous | Next | Result |
//! |----------|------|--------|
//! | absent | `out-for-delivery` | `delivery` notification |
//! | non-terminal | `out-for-delivery` (advance) | `delivery` notification |
//! | non-terminal | `delivered` | `success` notification |
//! | any | same status | nothing |
//! | non-terminal | `cancelled` | nothing |
//! | non-terminal | lower progress | [`Anomaly::Regressed`], logged |
//! | terminal | anything else | [`Anomaly::LeftTerminal`], logged |
//! | present | absent | [`Anomaly::Removed`], logged |
//!
//! All transitions of one cycle happen at the same instant (the snapshot time),
//! so the output is ordered by order id ascending and cut to the limit.

use crate::model::{Notification, OrderId, OrderStatus, Snapshot};
use tracing::{debug, warn};

/// How many notifications are surfaced at most.
pub const NOTIFICATION_LIMIT: usize = 3;

/// How one order's status moved between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FirstSeen(OrderStatus),
    Unchanged,
    Advanced { from: OrderStatus, to: OrderStatus },
    Cancelled { from: OrderStatus },
    Regressed { from: OrderStatus, to: OrderStatus },
    LeftTerminal { from: OrderStatus, to: OrderStatus },
}

impl Transition {
    pub fn classify(previous: Option<OrderStatus>, next: OrderStatus) -> Self {
        let Some(from) = previous else {
            return Self::FirstSeen(next);
        };
        if from == next {
            Self::Unchanged
        } else if from.is_terminal() {
            Self::LeftTerminal { from, to: next }
        } else if next == OrderStatus::Cancelled {
            Self::Cancelled { from }
        } else if next.rank() > from.rank() {
            Self::Advanced { from, to: next }
        } else {
            Self::Regressed { from, to: next }
        }
    }
}

/// Data problems noticed while diffing. Reported, never notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    Removed {
        order_id: OrderId,
        last_status: OrderStatus,
    },
    Regressed {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    LeftTerminal {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
}

impl Anomaly {
    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::Removed { order_id, .. }
            | Self::Regressed { order_id, .. }
            | Self::LeftTerminal { order_id, .. } => order_id,
        }
    }
}

/// Everything a diff produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derivation {
    pub notifications: Vec<Notification>,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, Copy)]
pub struct NotificationDeriver {
    limit: usize,
}

impl Default for NotificationDeriver {
    fn default() -> Self {
        Self::new(NOTIFICATION_LIMIT)
    }
}

impl NotificationDeriver {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Notifications for the transitions from `previous` to `next`.
    pub fn derive(&self, previous: Option<&Snapshot>, next: &Snapshot) -> Vec<Notification> {
        self.diff(previous, next).notifications
    }

    /// Notifications plus the anomalies found on the way.
    pub fn diff(&self, previous: Option<&Snapshot>, next: &Snapshot) -> Derivation {
        let cycle_at = next.taken_at();
        let mut derivation = Derivation::default();

        for order in next.orders() {
            let before = previous.and_then(|snapshot| snapshot.get(&order.id)).map(|order| order.status);
            let transition = Transition::classify(before, order.status);

            match transition {
                Transition::FirstSeen(OrderStatus::OutForDelivery)
                | Transition::Advanced {
                    to: OrderStatus::OutForDelivery,
                    ..
                } => derivation
                    .notifications
                    .push(Notification::out_for_delivery(&order.id, &order.item, cycle_at)),
                Transition::Advanced {
                    to: OrderStatus::Delivered,
                    ..
                } => derivation
                    .notifications
                    .push(Notification::delivered(&order.id, &order.item, cycle_at)),
                Transition::Regressed { from, to } => {
                    warn!(order_id = %order.id, %from, %to, "Order status regressed");
                    derivation.anomalies.push(Anomaly::Regressed {
                        order_id: order.id.clone(),
                        from,
                        to,
                    });
                }
                Transition::LeftTerminal { from, to } => {
                    warn!(order_id = %order.id, %from, %to, "Order left a terminal status");
                    derivation.anomalies.push(Anomaly::LeftTerminal {
                        order_id: order.id.clone(),
                        from,
                        to,
                    });
                }
                Transition::FirstSeen(_)
                | Transition::Unchanged
                | Transition::Cancelled { .. }
                | Transition::Advanced { .. } => {}
            }
        }

        if let Some(previous) = previous {
            for order in previous.orders().filter(|order| next.get(&order.id).is_none()) {
                warn!(order_id = %order.id, status = %order.status, "Order missing from resync");
                derivation.anomalies.push(Anomaly::Removed {
                    order_id: order.id.clone(),
                    last_status: order.status,
                });
            }
        }

        // Same-cycle transitions tie on time; snapshot iteration already yields id order.
        derivation.notifications.truncate(self.limit);
        debug!(
            notifications = derivation.notifications.len(),
            anomalies = derivation.anomalies.len(),
            "Derived transitions"
        );
        derivation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NotificationCategory, NotificationId, Order};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 14, 9, minute, 0).unwrap()
    }

    fn snapshot(orders: &[(&str, OrderStatus)], minute: u32) -> Snapshot {
        Snapshot::new(
            orders
                .iter()
                .map(|(id, status)| Order::new(*id, format!("Item {id}"), 1, *status)),
            at(minute),
        )
    }

    #[test]
    fn test_in_process_to_out_for_delivery_is_one_delivery() {
        let previous = snapshot(&[("O", OrderStatus::InProcess)], 0);
        let next = snapshot(&[("O", OrderStatus::OutForDelivery)], 1);

        let notifications = NotificationDeriver::default().derive(Some(&previous), &next);

        assert_eq!(notifications.len(), 1);
        let notification = &notifications[0];
        assert_eq!(notification.category, NotificationCategory::Delivery);
        assert_eq!(notification.order_id, OrderId::from("O"));
        assert_eq!(notification.message, "Item O is out for delivery!");
        assert_eq!(notification.created_at, at(1));
        assert_eq!(
            notification.id,
            NotificationId(format!("O/delivery/{}", at(1).timestamp_millis()))
        );
    }

    #[test]
    fn test_out_for_delivery_to_delivered_is_one_success() {
        let previous = snapshot(&[("O", OrderStatus::OutForDelivery)], 0);
        let next = snapshot(&[("O", OrderStatus::Delivered)], 1);

        let notifications = NotificationDeriver::default().derive(Some(&previous), &next);

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].category, NotificationCategory::Success);
        assert_eq!(notifications[0].message, "Item O has been delivered");
    }

    #[test]
    fn test_unchanged_delivered_is_silent() {
        let previous = snapshot(&[("O", OrderStatus::Delivered)], 0);
        let next = snapshot(&[("O", OrderStatus::Delivered)], 1);

        let derivation = NotificationDeriver::default().diff(Some(&previous), &next);
        assert_eq!(derivation, Derivation::default());
    }

    #[test]
    fn test_first_seen_only_notifies_out_for_delivery() {
        let next = snapshot(
            &[
                ("A", OrderStatus::OutForDelivery),
                ("B", OrderStatus::Delivered),
                ("C", OrderStatus::InRoute),
            ],
            0,
        );

        let notifications = NotificationDeriver::default().derive(None, &next);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].order_id, OrderId::from("A"));
    }

    #[test]
    fn test_cancellation_and_anomalies_are_not_notified() {
        let previous = snapshot(
            &[
                ("A", OrderStatus::InRoute),
                ("B", OrderStatus::OutForDelivery),
                ("C", OrderStatus::Delivered),
                ("D", OrderStatus::InProcess),
            ],
            0,
        );
        let next = snapshot(
            &[
                ("A", OrderStatus::Cancelled),
                ("B", OrderStatus::InRoute),
                ("C", OrderStatus::OutForDelivery),
            ],
            1,
        );

        let derivation = NotificationDeriver::default().diff(Some(&previous), &next);

        assert!(derivation.notifications.is_empty());
        assert_eq!(
            derivation.anomalies,
            vec![
                Anomaly::Regressed {
                    order_id: OrderId::from("B"),
                    from: OrderStatus::OutForDelivery,
                    to: OrderStatus::InRoute,
                },
                Anomaly::LeftTerminal {
                    order_id: OrderId::from("C"),
                    from: OrderStatus::Delivered,
                    to: OrderStatus::OutForDelivery,
                },
                Anomaly::Removed {
                    order_id: OrderId::from("D"),
                    last_status: OrderStatus::InProcess,
                },
            ]
        );
    }

    #[test]
    fn test_output_is_bounded_and_ordered_by_id() {
        let previous = snapshot(
            &[
                ("E", OrderStatus::InProcess),
                ("B", OrderStatus::InRoute),
                ("D", OrderStatus::InRoute),
                ("A", OrderStatus::OutForDelivery),
                ("C", OrderStatus::InProcess),
            ],
            0,
        );
        let next = snapshot(
            &[
                ("E", OrderStatus::OutForDelivery),
                ("B", OrderStatus::Delivered),
                ("D", OrderStatus::OutForDelivery),
                ("A", OrderStatus::Delivered),
                ("C", OrderStatus::Delivered),
            ],
            1,
        );

        let notifications = NotificationDeriver::default().derive(Some(&previous), &next);

        let ids: Vec<_> = notifications.iter().map(|n| n.order_id.0.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_classify_skipping_stages_still_advances() {
        assert_eq!(
            Transition::classify(Some(OrderStatus::InProcess), OrderStatus::Delivered),
            Transition::Advanced {
                from: OrderStatus::InProcess,
                to: OrderStatus::Delivered,
            }
        );
        assert_eq!(
            Transition::classify(Some(OrderStatus::Cancelled), OrderStatus::InProcess),
            Transition::LeftTerminal {
                from: OrderStatus::Cancelled,
                to: OrderStatus::InProcess,
            }
        );
    }
}
