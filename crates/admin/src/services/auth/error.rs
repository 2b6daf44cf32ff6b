//! Authentication error types.

use thiserror::Error;

use bharatcart_core::Handle;

use crate::db::RepositoryError;

/// Errors that can occur during registration or login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another account already derived the same handle.
    #[error("handle already registered: {0}")]
    DuplicateHandle(Handle),

    /// No account matches the handle and secret.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required form field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Registry access failed.
    #[error("registry error: {0}")]
    Repository(#[from] RepositoryError),
}
