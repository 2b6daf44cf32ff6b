//! Durable storage for the credential registry.
//!
//! # Storage: one JSON slot
//!
//! The registry is a single JSON array of credential records:
//!
//! ```json
//! [
//!   { "ownerName": "Arjun", "businessName": "Sharma Co",
//!     "emailPrefix": "sharmaco", "password": "pw1" }
//! ]
//! ```
//!
//! There is no versioning and no migration. Callers go through the
//! [`CredentialRepository`] trait so the backing medium can change without
//! touching the auth service.

pub mod credentials;

use std::future::Future;

use thiserror::Error;

use bharatcart_core::Handle;

use crate::models::CredentialRecord;

pub use credentials::{JsonFileRegistry, MemoryRegistry};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the registry failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data could not be decoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Access to persisted credential records.
///
/// Lookups are linear scans in insertion order, so when duplicate handles
/// exist the first-inserted record wins.
pub trait CredentialRepository: Send + Sync {
    /// Every record, in insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<CredentialRecord>, RepositoryError>> + Send;

    /// First record with exactly this handle.
    fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> impl Future<Output = Result<Option<CredentialRecord>, RepositoryError>> + Send;

    /// Append a record and persist the whole registry. No uniqueness check.
    fn insert(
        &self,
        record: CredentialRecord,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Append `record` unless a record with its handle already exists.
    ///
    /// The check and the append happen under one lock, so concurrent callers
    /// in this process cannot both insert the same handle. Returns `false`
    /// when the handle was taken and nothing was written.
    fn insert_unique(
        &self,
        record: CredentialRecord,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}
