//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bharatcart_core::{Price, ProductId, ProductStatus, StockLevel};

use crate::store::{Patch, Record};

/// A catalog listing.
///
/// `status` is whatever the seller last set; it is not kept in step with
/// `stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-text category label (e.g. "Ethnic Wear").
    pub category: String,
    pub price: Price,
    pub stock: u32,
    pub status: ProductStatus,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Inventory band for the stock bar.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::for_stock(self.stock)
    }
}

impl Record for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Form input for listing a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
}

impl NewProduct {
    /// Category preselected on the "Add New Product" form.
    pub const DEFAULT_CATEGORY: &'static str = "Ethnic Wear";
}

/// Shallow patch over a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<u32>,
    pub status: Option<ProductStatus>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Patch that only sets the listing status (the bulk action bar).
    #[must_use]
    pub fn status(status: ProductStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Patch<Product> for ProductPatch {
    fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(category) = &self.category {
            product.category.clone_from(category);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(image) = &self.image {
            product.image.clone_from(image);
        }
    }
}
