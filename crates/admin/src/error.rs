//! Unified error handling for admin.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::insights::InsightError;
use crate::seed::SeedError;
use crate::services::AuthError;
use crate::services::export::ExportError;

/// Application-level error type for the seller dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registration or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Registry storage failed outside of an auth call.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Insight client could not be built.
    #[error("Insight error: {0}")]
    Insight(#[from] InsightError),

    /// Sample data could not be loaded.
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// An export could not be rendered.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// An operation needs a signed-in seller.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Form input was rejected.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Message suitable for showing to the seller.
    ///
    /// Storage and internal details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(AuthError::DuplicateHandle(_)) => {
                "This business identity already exists in the registry.".to_string()
            }
            Self::Auth(AuthError::InvalidCredentials) => {
                "Unauthorized credentials. Access denied.".to_string()
            }
            Self::Auth(AuthError::MissingField(field)) => format!("Please enter your {field}."),
            Self::Auth(AuthError::Repository(_)) | Self::Repository(_) => {
                "The account registry is unavailable. Please try again.".to_string()
            }
            Self::NotAuthenticated => "Please sign in to continue.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::Export(_) => "The report could not be generated.".to_string(),
            Self::Insight(_) => "AI insights are unavailable right now.".to_string(),
            Self::Config(_) | Self::Seed(_) => "Internal error".to_string(),
        }
    }
}
