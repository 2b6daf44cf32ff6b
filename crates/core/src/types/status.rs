//! Status enums for catalog, order and customer records.
//!
//! Each entity has a closed set of states. Serialized names match the labels
//! the seller dashboard displays (`"Out of Stock"`, `"Processing"`, ...).

use serde::{Deserialize, Serialize};

/// Error returned when parsing a status label fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} status: {value}")]
pub struct StatusParseError {
    /// Which status family was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Catalog listing status of a product.
///
/// Set by the seller; never derived from the stock count, so an `Active`
/// product may have zero stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    #[default]
    Active,
    Draft,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ProductStatus {
    /// All product statuses, in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Draft, Self::OutOfStock];

    /// Dashboard label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "out of stock" | "outofstock" => Ok(Self::OutOfStock),
            _ => Err(StatusParseError {
                kind: "product",
                value: s.to_owned(),
            }),
        }
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    Completed,
    Processing,
    #[default]
    Pending,
    Cancelled,
}

impl OrderStatus {
    /// All order statuses, in display order.
    pub const ALL: [Self; 4] = [
        Self::Completed,
        Self::Processing,
        Self::Pending,
        Self::Cancelled,
    ];

    /// Dashboard label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Processing => "Processing",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "processing" => Ok(Self::Processing),
            "pending" => Ok(Self::Pending),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(StatusParseError {
                kind: "order",
                value: s.to_owned(),
            }),
        }
    }
}

/// Loyalty tier shown next to a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerTier {
    /// More than [`CustomerTier::ELITE_ORDER_THRESHOLD`] lifetime orders.
    Elite,
    Member,
}

impl CustomerTier {
    /// Customers with strictly more orders than this are `Elite`.
    pub const ELITE_ORDER_THRESHOLD: u32 = 10;

    /// Tier for a lifetime order count.
    #[must_use]
    pub const fn for_order_count(orders: u32) -> Self {
        if orders > Self::ELITE_ORDER_THRESHOLD {
            Self::Elite
        } else {
            Self::Member
        }
    }
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elite => f.write_str("Elite"),
            Self::Member => f.write_str("Member"),
        }
    }
}

/// Inventory health band used for the stock bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Healthy,
}

impl StockLevel {
    /// Stock strictly below this is `Low`.
    pub const LOW_STOCK_THRESHOLD: u32 = 10;

    /// Band for a stock count.
    #[must_use]
    pub const fn for_stock(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            n if n < Self::LOW_STOCK_THRESHOLD => Self::Low,
            _ => Self::Healthy,
        }
    }
}
