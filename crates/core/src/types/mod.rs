//! Core types for BharatCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod handle;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use handle::Handle;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
