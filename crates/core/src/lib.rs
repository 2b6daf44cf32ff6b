//! BharatCart Core - Shared types library.
//!
//! This crate provides common types used across all BharatCart components:
//! - `admin` - Record store, credential registry, metrics and insight client
//! - `cli` - Command-line tools driving the admin library
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, handles, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
