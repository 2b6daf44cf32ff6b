//! Customer (buyer) records.

use serde::{Deserialize, Serialize};

use bharatcart_core::{CustomerId, CustomerTier, Email, Price};

use crate::store::{Patch, Record};

/// Label shown in the "last order" column for customers added by hand.
pub const NEW_CUSTOMER_LABEL: &str = "New Customer";

/// A buyer with lifetime totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    /// Lifetime order count.
    pub orders: u32,
    /// Lifetime spend.
    pub total_spent: Price,
    pub last_order: String,
    /// Avatar URL; empty for hand-entered customers.
    #[serde(default)]
    pub avatar: String,
}

impl Customer {
    #[must_use]
    pub const fn tier(&self) -> CustomerTier {
        CustomerTier::for_order_count(self.orders)
    }
}

impl Record for Customer {
    type Id = CustomerId;

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

/// Form input for adding a customer by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    /// Raw email input; validated when the customer is created.
    pub email: String,
    /// City picked on the form. Collected but not stored on the record.
    pub city: String,
}

/// Shallow patch over a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub last_order: Option<String>,
}

impl Patch<Customer> for CustomerPatch {
    fn apply(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            customer.email = email.clone();
        }
        if let Some(last_order) = &self.last_order {
            customer.last_order.clone_from(last_order);
        }
    }
}
