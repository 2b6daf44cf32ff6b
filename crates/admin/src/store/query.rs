//! Search and filter predicates for the list pages.
//!
//! Each query turns the search box and dropdown state of a page into a
//! predicate over one record type. Matching is a case-insensitive substring
//! test recomputed on every call.

use bharatcart_core::OrderStatus;

use crate::models::{Customer, Order, Product};

/// Lowercased search term; `None` when empty. Whitespace is kept.
fn normalize_term(term: &str) -> Option<String> {
    (!term.is_empty()).then(|| term.to_lowercase())
}

/// Products page: name search plus category dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    search: Option<String>,
    /// `None` is "All Categories".
    category: Option<String>,
}

impl ProductQuery {
    #[must_use]
    pub fn new(search: &str, category: Option<&str>) -> Self {
        Self {
            search: normalize_term(search),
            category: category.map(str::to_owned),
        }
    }

    /// Whether `product` should be listed.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = self
            .search
            .as_deref()
            .is_none_or(|term| product.name.to_lowercase().contains(term));
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        matches_search && matches_category
    }
}

/// Customers page: one box searching name and email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    search: Option<String>,
}

impl CustomerQuery {
    #[must_use]
    pub fn new(search: &str) -> Self {
        Self {
            search: normalize_term(search),
        }
    }

    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        self.search.as_deref().is_none_or(|term| {
            customer.name.to_lowercase().contains(term) || customer.email.contains_ignore_case(term)
        })
    }
}

/// Orders page: status chip plus customer-name search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    status: Option<OrderStatus>,
    customer: Option<String>,
}

impl OrderQuery {
    #[must_use]
    pub fn new(status: Option<OrderStatus>, customer: &str) -> Self {
        Self {
            status,
            customer: normalize_term(customer),
        }
    }

    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        self.status.is_none_or(|status| order.status == status)
            && self
                .customer
                .as_deref()
                .is_none_or(|term| order.customer.to_lowercase().contains(term))
    }
}
