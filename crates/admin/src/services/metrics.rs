//! Derived dashboard statistics.
//!
//! Pure functions over the current snapshot of the record store. Nothing is
//! cached; every call rescans its collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bharatcart_core::{CustomerTier, OrderStatus, ProductStatus};

use crate::models::{Customer, Order, Product};

/// Growth percentages shown beside each stat card when its collection has data.
const REVENUE_GROWTH_PCT: Decimal = Decimal::from_parts(125, 0, 0, false, 1);
const ORDER_GROWTH_PCT: Decimal = Decimal::from_parts(82, 0, 0, false, 1);
const CUSTOMER_GROWTH_PCT: Decimal = Decimal::from_parts(41, 0, 0, false, 1);
const PRODUCT_GROWTH_PCT: Decimal = Decimal::from_parts(24, 0, 0, false, 1);

/// Sum of all order amounts; zero for no orders.
#[must_use]
pub fn total_revenue(orders: &[Order]) -> Decimal {
    orders.iter().map(|order| order.amount.amount).sum()
}

/// Number of products listed as `Active`.
#[must_use]
pub fn active_product_count(products: &[Product]) -> usize {
    products
        .iter()
        .filter(|product| product.status == ProductStatus::Active)
        .count()
}

/// Number of orders in `status`.
#[must_use]
pub fn order_count_by_status(orders: &[Order], status: OrderStatus) -> usize {
    orders.iter().filter(|order| order.status == status).count()
}

/// `Elite` above ten lifetime orders, `Member` otherwise.
#[must_use]
pub const fn customer_tier(customer: &Customer) -> CustomerTier {
    CustomerTier::for_order_count(customer.orders)
}

/// The first `n` orders as held (newest first for seeded data).
#[must_use]
pub fn recent_orders(orders: &[Order], n: usize) -> &[Order] {
    orders.get(..n).unwrap_or(orders)
}

/// Headline numbers for the dashboard cards and the insight prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub total_customers: usize,
    pub active_products: usize,
    /// Percent.
    pub revenue_growth: Decimal,
    /// Percent.
    pub order_growth: Decimal,
    /// Percent.
    pub customer_growth: Decimal,
    /// Percent.
    pub product_growth: Decimal,
}

impl DashboardStats {
    /// Compute the stats for a snapshot of the three collections.
    #[must_use]
    pub fn from_snapshot(products: &[Product], orders: &[Order], customers: &[Customer]) -> Self {
        let growth = |has_data: bool, pct: Decimal| if has_data { pct } else { Decimal::ZERO };

        Self {
            total_revenue: total_revenue(orders),
            total_orders: orders.len(),
            total_customers: customers.len(),
            active_products: active_product_count(products),
            revenue_growth: growth(!orders.is_empty(), REVENUE_GROWTH_PCT),
            order_growth: growth(!orders.is_empty(), ORDER_GROWTH_PCT),
            customer_growth: growth(!customers.is_empty(), CUSTOMER_GROWTH_PCT),
            product_growth: growth(!products.is_empty(), PRODUCT_GROWTH_PCT),
        }
    }
}

/// Order counts for the three summary tiles on the Orders page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPipeline {
    /// `Processing` orders ("Awaiting Pickup").
    pub awaiting_pickup: usize,
    /// `Pending` orders ("In Transit").
    pub in_transit: usize,
    /// `Completed` orders ("Delivered").
    pub delivered: usize,
}

impl OrderPipeline {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            awaiting_pickup: order_count_by_status(orders, OrderStatus::Processing),
            in_transit: order_count_by_status(orders, OrderStatus::Pending),
            delivered: order_count_by_status(orders, OrderStatus::Completed),
        }
    }
}
