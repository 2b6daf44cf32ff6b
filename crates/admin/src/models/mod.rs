//! Domain models for the seller dashboard.
//!
//! Products, orders and customers live in memory for the length of a session;
//! accounts are the persisted credential records behind the mock login.

pub mod account;
pub mod customer;
pub mod order;
pub mod product;

pub use account::{AccountProfile, CredentialRecord, SessionKind};
pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use order::{Order, OrderPatch};
pub use product::{NewProduct, Product, ProductPatch};
