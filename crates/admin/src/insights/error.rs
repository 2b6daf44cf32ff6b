//! Error types for the Gemini insight client.

use thiserror::Error;

/// Errors that can occur while fetching an insight report.
///
/// None of these reach dashboard callers; [`super::InsightClient::get_insights`]
/// logs them and substitutes the fallback report.
#[derive(Debug, Error)]
pub enum InsightError {
    /// No API key is configured.
    #[error("insights are disabled: no API key configured")]
    Disabled,

    /// The client could not be built from its configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the raw body.
        message: String,
    },

    /// The reply carried no candidate text.
    #[error("model returned no text")]
    EmptyReply,

    /// The reply or its text could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The decoded report failed validation.
    #[error("schema violation: {0}")]
    Schema(String),
}

/// Error body returned by the Gemini API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    /// Canonical status name, e.g. `INVALID_ARGUMENT`.
    #[serde(default)]
    pub status: String,
}
