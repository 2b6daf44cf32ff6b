//! BharatCart seller dashboard library.
//!
//! The data and auth core behind the dashboard pages: in-memory product,
//! order and customer collections, a mock credential registry persisted to a
//! JSON file, derived metrics, analytics exports, and a Gemini-backed insight
//! blurb with a static fallback.
//!
//! # Security
//!
//! The credential registry stores and compares secrets in plaintext. It is a
//! demo fixture and must never guard real data.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;

pub use error::AppError;
pub use state::{AdminApp, AdminSession};
