//! # Order Source
//!
//! The seam between the sync engine and whatever answers "which orders does this
//! exhibitor have right now". Production uses [`HttpOrderSource`](super::HttpOrderSource);
//! tests use [`MockOrderSource`](super::mock::MockOrderSource).

use crate::fetcher::FetchError;
use crate::model::{Identity, Order};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything that can produce an [`OrderReport`] for an identity.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_orders(&self, identity: &Identity) -> Result<OrderReport, FetchError>;
}

/// The remote response body, before validation.
///
/// Orders stay as raw JSON values so a single bad record is rejected on its own
/// instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReport {
    #[serde(default)]
    pub orders: Vec<Value>,
    pub last_updated: String,
}

impl OrderReport {
    pub fn new(orders: Vec<RawOrder>, last_updated: DateTime<Utc>) -> Self {
        Self {
            orders: orders
                .into_iter()
                .filter_map(|order| serde_json::to_value(order).ok())
                .collect(),
            last_updated: last_updated.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Appends an arbitrary JSON record, valid or not.
    pub fn with_raw(mut self, record: Value) -> Self {
        self.orders.push(record);
        self
    }
}

/// One order record as the backend sends it. Every field is optional here;
/// [`normalize`](super::normalize()) decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl RawOrder {
    /// A complete record with placeholder descriptive fields.
    pub fn new(id: &str, item: &str, status: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            item: Some(item.to_string()),
            description: Some(format!("{item} for the show floor")),
            color: Some("White".to_string()),
            quantity: Some(1),
            status: Some(status.to_string()),
            order_date: Some("June 14, 2025".to_string()),
            section: Some("Section A".to_string()),
            comments: None,
        }
    }
}

impl From<&Order> for RawOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: Some(order.id.to_string()),
            item: Some(order.item.clone()),
            description: Some(order.description.clone()),
            color: Some(order.color.clone()),
            quantity: Some(i64::from(order.quantity)),
            status: Some(order.status.code().to_string()),
            order_date: Some(order.order_date.clone()),
            section: Some(order.section.clone()),
            comments: order.comments.clone(),
        }
    }
}
