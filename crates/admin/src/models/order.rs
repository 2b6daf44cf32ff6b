//! Customer order.

use serde::{Deserialize, Serialize};

use bharatcart_core::{OrderId, OrderStatus, Price};

use crate::store::{Patch, Record};

/// An order as shown on the dashboard.
///
/// Orders are only ever seeded. `customer` is a display name, not a key into
/// the customer collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    /// Order date label; not validated.
    pub date: String,
    pub amount: Price,
    pub status: OrderStatus,
}

impl Record for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Shallow patch over an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub amount: Option<Price>,
}

impl Patch<Order> for OrderPatch {
    fn apply(&self, order: &mut Order) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(amount) = self.amount {
            order.amount = amount;
        }
    }
}
