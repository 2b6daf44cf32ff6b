//! AI business insights for the dashboard.
//!
//! The dashboard's stats are embedded in a prompt and sent to Google Gemini's
//! `generateContent` endpoint with a JSON response schema. The reply is decoded
//! into an [`InsightReport`] and validated.
//!
//! Insights are decorative: every failure (no key, network, status, decode,
//! validation) ends in the same static fallback report, so the page always has
//! something to show.
//!
//! # Example
//!
//! ```rust,ignore
//! let client = InsightClient::new(config.insights())?;
//! let report = client.get_insights(&session.dashboard_stats()).await;
//! println!("{}", report.summary);
//! ```

mod client;
mod error;
mod types;

pub use client::{InsightClient, build_prompt};
pub use error::{ApiError, ApiErrorResponse, InsightError};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InsightReport, Part,
};
