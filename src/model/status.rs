//! # Status Catalog
//!
//! The closed set of fulfillment statuses and their display metadata.
//!
//! Every status code that crosses the wire is resolved here. An unknown code is a
//! data-integrity error ([`UnknownStatus`]); it is never silently mapped to a default.
//!
//! | Code | Label | Progress | Terminal |
//! |------|-------|----------|----------|
//! | `in-process` | In Process | 25 | no |
//! | `in-route` | In Route from Warehouse | 50 | no |
//! | `out-for-delivery` | Out for Delivery | 75 | no |
//! | `delivered` | Delivered | 100 | yes |
//! | `cancelled` | Cancelled | 0 | yes |

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A status code outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownStatus(pub String);

/// Fulfillment status of a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    InProcess,
    InRoute,
    OutForDelivery,
    Delivered,
    Cancelled,
}

/// Display and semantic metadata for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub status: OrderStatus,
    pub code: &'static str,
    pub label: &'static str,
    pub progress_percent: u8,
    pub is_terminal: bool,
}

const ENTRIES: [StatusInfo; 5] = [
    StatusInfo {
        status: OrderStatus::InProcess,
        code: "in-process",
        label: "In Process",
        progress_percent: 25,
        is_terminal: false,
    },
    StatusInfo {
        status: OrderStatus::InRoute,
        code: "in-route",
        label: "In Route from Warehouse",
        progress_percent: 50,
        is_terminal: false,
    },
    StatusInfo {
        status: OrderStatus::OutForDelivery,
        code: "out-for-delivery",
        label: "Out for Delivery",
        progress_percent: 75,
        is_terminal: false,
    },
    StatusInfo {
        status: OrderStatus::Delivered,
        code: "delivered",
        label: "Delivered",
        progress_percent: 100,
        is_terminal: true,
    },
    StatusInfo {
        status: OrderStatus::Cancelled,
        code: "cancelled",
        label: "Cancelled",
        progress_percent: 0,
        is_terminal: true,
    },
];

/// Static lookup table from wire code to [`StatusInfo`].
pub struct StatusCatalog;

impl StatusCatalog {
    /// Describes a wire status code.
    ///
    /// Fails with [`UnknownStatus`] for anything outside the closed set, including
    /// codes that differ only in case or surrounding whitespace.
    pub fn describe(code: &str) -> Result<StatusInfo, UnknownStatus> {
        ENTRIES
            .iter()
            .find(|entry| entry.code == code)
            .copied()
            .ok_or_else(|| UnknownStatus(code.to_string()))
    }

    /// Resolves a wire code to its [`OrderStatus`].
    pub fn lookup(code: &str) -> Result<OrderStatus, UnknownStatus> {
        Self::describe(code).map(|info| info.status)
    }

    /// All catalog entries, in progress order with `cancelled` last.
    pub fn entries() -> &'static [StatusInfo] {
        &ENTRIES
    }
}

impl OrderStatus {
    pub fn info(self) -> StatusInfo {
        // ENTRIES is declared in variant order.
        ENTRIES[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.info().code
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn progress_percent(self) -> u8 {
        self.info().progress_percent
    }

    pub fn is_terminal(self) -> bool {
        self.info().is_terminal
    }

    /// Position on the delivery track. `None` for `Cancelled`, which is not ordered
    /// against the other statuses.
    pub fn rank(self) -> Option<u8> {
        match self {
            Self::Cancelled => None,
            other => Some(other.progress_percent()),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        StatusCatalog::lookup(code)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_describes_within_bounds() {
        for entry in StatusCatalog::entries() {
            let info = StatusCatalog::describe(entry.code).unwrap();
            assert!(info.progress_percent <= 100);
            assert_eq!(info.status.code(), entry.code);
            assert_eq!(info, entry.status.info());
        }
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        for code in ["", "shipped", "Delivered", " delivered", "In Process", "out_for_delivery"] {
            assert_eq!(
                StatusCatalog::describe(code),
                Err(UnknownStatus(code.to_string())),
                "{code:?} should be unknown"
            );
        }
    }

    #[test]
    fn test_terminal_classification() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::InProcess.is_terminal());
        assert!(!OrderStatus::InRoute.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn test_progress_track_is_ordered() {
        let track = [
            OrderStatus::InProcess,
            OrderStatus::InRoute,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ];
        for pair in track.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(OrderStatus::Cancelled.rank(), None);
        assert_eq!(OrderStatus::Cancelled.progress_percent(), 0);
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
        let parsed: OrderStatus = "in-route".parse().unwrap();
        assert_eq!(parsed, OrderStatus::InRoute);
    }
}
