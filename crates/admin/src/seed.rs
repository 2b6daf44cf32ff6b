//! Sample data for demo sessions.
//!
//! The data ships inside the binary as YAML and is parsed on demand. Rows are
//! validated as they are converted, so a bad edit to the file surfaces as a
//! [`SeedError`] rather than a half-loaded dashboard.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use bharatcart_core::{Email, EmailError, OrderStatus, Price, ProductStatus};

use crate::models::{Customer, Order, Product};
use crate::services::{ChannelShare, RevenuePoint};

const DEMO_SEED_YAML: &str = include_str!("../data/demo_seed.yaml");

/// Errors that can occur while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid email for customer {id}: {source}")]
    Email {
        id: String,
        #[source]
        source: EmailError,
    },

    #[error("negative amount in {0}")]
    NegativeAmount(String),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    products: Vec<ProductRow>,
    orders: Vec<OrderRow>,
    customers: Vec<CustomerRow>,
    revenue: Vec<RevenuePoint>,
    channels: Vec<ChannelShare>,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    name: String,
    category: String,
    price: Decimal,
    stock: u32,
    status: ProductStatus,
    image: String,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    id: String,
    customer: String,
    date: String,
    amount: Decimal,
    status: OrderStatus,
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    id: String,
    name: String,
    email: String,
    orders: u32,
    total_spent: Decimal,
    last_order: String,
    avatar: String,
}

/// The full sample data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    /// Monthly revenue chart series (Jan to Jul).
    pub revenue: Vec<RevenuePoint>,
    /// Sales channel split.
    pub channels: Vec<ChannelShare>,
}

impl SeedData {
    /// Parse the embedded demo data set.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the embedded YAML is malformed or a row fails
    /// validation.
    pub fn demo() -> Result<Self, SeedError> {
        Self::from_yaml(DEMO_SEED_YAML)
    }

    /// Parse a data set from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the YAML is malformed or a row fails validation.
    pub fn from_yaml(content: &str) -> Result<Self, SeedError> {
        let file: SeedFile = serde_yaml::from_str(content)?;

        let products = file
            .products
            .into_iter()
            .map(ProductRow::into_product)
            .collect::<Result<Vec<_>, _>>()?;
        let orders = file
            .orders
            .into_iter()
            .map(OrderRow::into_order)
            .collect::<Result<Vec<_>, _>>()?;
        let customers = file
            .customers
            .into_iter()
            .map(CustomerRow::into_customer)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            products = products.len(),
            orders = orders.len(),
            customers = customers.len(),
            "Seed data parsed"
        );

        Ok(Self {
            products,
            orders,
            customers,
            revenue: file.revenue,
            channels: file.channels,
        })
    }
}

fn rupees(amount: Decimal, context: &str) -> Result<Price, SeedError> {
    let price = Price::inr(amount);
    if price.is_negative() {
        return Err(SeedError::NegativeAmount(context.to_string()));
    }
    Ok(price)
}

impl ProductRow {
    fn into_product(self) -> Result<Product, SeedError> {
        let price = rupees(self.price, &format!("product {}", self.id))?;
        Ok(Product {
            id: self.id.into(),
            name: self.name,
            category: self.category,
            price,
            stock: self.stock,
            status: self.status,
            image: self.image,
        })
    }
}

impl OrderRow {
    fn into_order(self) -> Result<Order, SeedError> {
        let amount = rupees(self.amount, &format!("order {}", self.id))?;
        Ok(Order {
            id: self.id.into(),
            customer: self.customer,
            date: self.date,
            amount,
            status: self.status,
        })
    }
}

impl CustomerRow {
    fn into_customer(self) -> Result<Customer, SeedError> {
        let email = Email::parse(&self.email).map_err(|source| SeedError::Email {
            id: self.id.clone(),
            source,
        })?;
        let total_spent = rupees(self.total_spent, &format!("customer {}", self.id))?;
        Ok(Customer {
            id: self.id.into(),
            name: self.name,
            email,
            orders: self.orders,
            total_spent,
            last_order: self.last_order,
            avatar: self.avatar,
        })
    }
}
