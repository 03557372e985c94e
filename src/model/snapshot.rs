use crate::model::{Order, OrderId, OrderStatus};
use chrono::{DateTime, Utc};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Immutable, point-in-time set of orders plus the time it describes.
///
/// Orders are keyed by id. Once built a snapshot is never mutated; the view store
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    orders: BTreeMap<OrderId, Order>,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    /// Builds a snapshot. When two orders share an id the first one wins.
    pub fn new(orders: impl IntoIterator<Item = Order>, taken_at: DateTime<Utc>) -> Self {
        let mut by_id = BTreeMap::new();
        for order in orders {
            if let Entry::Vacant(slot) = by_id.entry(order.id.clone()) {
                slot.insert(order);
            }
        }
        Self {
            orders: by_id,
            taken_at,
        }
    }

    pub fn empty(taken_at: DateTime<Utc>) -> Self {
        Self::new(Vec::new(), taken_at)
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Orders in ascending id order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn delivered_count(&self) -> usize {
        self.orders().filter(|order| order.is_delivered()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.orders().filter(|order| order.is_pending()).count()
    }

    pub fn status_counts(&self) -> BTreeMap<OrderStatus, usize> {
        let mut counts = BTreeMap::new();
        for order in self.orders() {
            *counts.entry(order.status).or_insert(0) += 1;
        }
        counts
    }
}
