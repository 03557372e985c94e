//! # Normalization
//!
//! Turns an [`OrderReport`] into a [`Snapshot`], one record at a time.
//!
//! A record is rejected (and logged) when it cannot be decoded, misses a required
//! field, carries a status outside the [`StatusCatalog`], has a non-positive
//! quantity, or repeats an id already accepted. Rejection never aborts the cycle.
//! Only an unreadable `last_updated` fails the whole report, because without it the
//! snapshot has no trustworthy time.

use crate::fetcher::{FetchError, MalformedOrder, OrderReport, RawOrder};
use crate::model::{Order, OrderId, Snapshot, StatusCatalog};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// A validated snapshot plus the records that did not make it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub snapshot: Snapshot,
    pub rejected: Vec<MalformedOrder>,
}

pub fn normalize(report: OrderReport) -> Result<Normalized, FetchError> {
    let taken_at = parse_timestamp(&report.last_updated)?;

    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(report.orders.len());
    let mut rejected = Vec::new();

    for record in report.orders {
        let outcome = validate(record).and_then(|order| {
            if seen.insert(order.id.clone()) {
                Ok(order)
            } else {
                Err(MalformedOrder::DuplicateId {
                    order_id: order.id.to_string(),
                })
            }
        });
        match outcome {
            Ok(order) => accepted.push(order),
            Err(anomaly) => {
                warn!(error = %anomaly, "Dropping malformed order");
                rejected.push(anomaly);
            }
        }
    }

    Ok(Normalized {
        snapshot: Snapshot::new(accepted, taken_at),
        rejected,
    })
}

/// Reads `last_updated`.
///
/// Accepts RFC 3339 and the offset-less ISO-8601 form produced by Python's
/// `datetime.isoformat()`, which is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, FetchError> {
    let raw = raw.trim();
    if let Ok(stamped) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamped.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|error| FetchError::MalformedResponse(format!("last_updated `{raw}` is not a timestamp: {error}")))
}

fn validate(record: Value) -> Result<Order, MalformedOrder> {
    let raw: RawOrder =
        serde_json::from_value(record).map_err(|error| MalformedOrder::Undecodable(error.to_string()))?;

    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err(MalformedOrder::MissingField {
                order_id: None,
                field: "id",
            })
        }
    };
    let missing = |field: &'static str| MalformedOrder::MissingField {
        order_id: Some(id.clone()),
        field,
    };

    let status_code = raw.status.as_deref().ok_or_else(|| missing("status"))?;
    let status = StatusCatalog::lookup(status_code).map_err(|source| MalformedOrder::UnknownStatus {
        order_id: id.clone(),
        source,
    })?;

    let quantity = raw.quantity.ok_or_else(|| missing("quantity"))?;
    let quantity = u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or_else(|| MalformedOrder::InvalidQuantity {
            order_id: id.clone(),
            quantity,
        })?;

    let item = raw.item.ok_or_else(|| missing("item"))?;
    let description = raw.description.ok_or_else(|| missing("description"))?;
    let color = raw.color.ok_or_else(|| missing("color"))?;
    let order_date = raw.order_date.ok_or_else(|| missing("order_date"))?;
    let section = raw.section.ok_or_else(|| missing("section"))?;
    let comments = raw.comments.filter(|comments| !comments.trim().is_empty());

    Ok(Order {
        id: OrderId(id),
        item,
        description,
        color,
        quantity,
        status,
        order_date,
        section,
        comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderStatus, UnknownStatus};
    use chrono::TimeZone;
    use serde_json::json;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_valid_report_becomes_snapshot() {
        let report = OrderReport::new(
            vec![
                RawOrder::new("ORD-2", "Display", "in-route"),
                RawOrder::new("ORD-1", "Booth", "delivered"),
            ],
            stamp(),
        );

        let normalized = normalize(report).unwrap();
        assert!(normalized.rejected.is_empty());
        assert_eq!(normalized.snapshot.len(), 2);
        assert_eq!(normalized.snapshot.taken_at(), stamp());
        let booth = normalized.snapshot.get(&OrderId::from("ORD-1")).unwrap();
        assert_eq!(booth.status, OrderStatus::Delivered);
        assert_eq!(booth.comments, None);
    }

    #[test]
    fn test_unknown_status_drops_only_that_order() {
        let report = OrderReport::new(
            vec![
                RawOrder::new("ORD-1", "Booth", "shipped"),
                RawOrder::new("ORD-2", "Display", "in-process"),
            ],
            stamp(),
        );

        let normalized = normalize(report).unwrap();
        assert_eq!(normalized.snapshot.len(), 1);
        assert_eq!(
            normalized.rejected,
            vec![MalformedOrder::UnknownStatus {
                order_id: "ORD-1".to_string(),
                source: UnknownStatus("shipped".to_string()),
            }]
        );
    }

    #[test]
    fn test_structural_problems_are_rejected() {
        let mut no_section = RawOrder::new("ORD-3", "Lights", "in-process");
        no_section.section = None;
        let mut zero_quantity = RawOrder::new("ORD-4", "Chairs", "in-process");
        zero_quantity.quantity = Some(0);

        let report = OrderReport::new(
            vec![
                no_section,
                zero_quantity,
                RawOrder::new("ORD-5", "Table", "in-route"),
                RawOrder::new("ORD-5", "Table again", "delivered"),
            ],
            stamp(),
        )
        .with_raw(json!({ "item": "No id", "status": "delivered", "quantity": 1 }))
        .with_raw(json!({ "id": "ORD-6", "quantity": "three" }))
        .with_raw(json!("not an object"));

        let normalized = normalize(report).unwrap();
        assert_eq!(normalized.snapshot.len(), 1);
        assert_eq!(normalized.snapshot.get(&OrderId::from("ORD-5")).unwrap().item, "Table");

        let rejected = &normalized.rejected;
        assert_eq!(rejected.len(), 6);
        assert!(matches!(rejected[0], MalformedOrder::MissingField { field: "section", .. }));
        assert!(matches!(rejected[1], MalformedOrder::InvalidQuantity { quantity: 0, .. }));
        assert!(matches!(rejected[2], MalformedOrder::DuplicateId { .. }));
        assert!(matches!(rejected[3], MalformedOrder::MissingField { order_id: None, field: "id" }));
        assert!(matches!(rejected[4], MalformedOrder::Undecodable(_)));
        assert!(matches!(rejected[5], MalformedOrder::Undecodable(_)));
    }

    #[test]
    fn test_blank_comments_become_none() {
        let mut raw = RawOrder::new("ORD-1", "Booth", "in-process");
        raw.comments = Some("  ".to_string());
        let mut rush = RawOrder::new("ORD-2", "Display", "in-process");
        rush.comments = Some("Rush delivery requested".to_string());

        let normalized = normalize(OrderReport::new(vec![raw, rush], stamp())).unwrap();
        assert_eq!(normalized.snapshot.get(&OrderId::from("ORD-1")).unwrap().comments, None);
        assert_eq!(
            normalized.snapshot.get(&OrderId::from("ORD-2")).unwrap().comments.as_deref(),
            Some("Rush delivery requested")
        );
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(parse_timestamp("2025-06-14T09:30:00Z").unwrap(), stamp());
        assert_eq!(parse_timestamp("2025-06-14T11:30:00+02:00").unwrap(), stamp());
        assert_eq!(parse_timestamp("2025-06-14T09:30:00").unwrap(), stamp());
        assert_eq!(
            parse_timestamp("2025-06-14T09:30:00.250000").unwrap(),
            stamp() + chrono::Duration::milliseconds(250)
        );
        assert!(matches!(
            parse_timestamp("June 14, 2025"),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_bad_timestamp_fails_whole_report() {
        let mut report = OrderReport::new(vec![RawOrder::new("ORD-1", "Booth", "in-process")], stamp());
        report.last_updated = "yesterday".to_string();
        assert!(matches!(normalize(report), Err(FetchError::MalformedResponse(_))));
    }
}
