//! Types for the Gemini `generateContent` API and the insight report.

use serde::{Deserialize, Serialize};

use super::error::InsightError;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// A turn of conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// `user` or `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single user text turn.
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

/// A piece of content; only text parts are used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Output constraints for the model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    /// OpenAPI-style schema the JSON reply must follow.
    pub response_schema: serde_json::Value,
}

impl GenerationConfig {
    /// JSON output shaped like an [`InsightReport`].
    #[must_use]
    pub fn insight_report() -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "summary": { "type": "STRING" },
                    "recommendations": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    },
                    "trendingCategories": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    }
                },
                "required": ["summary", "recommendations", "trendingCategories"]
            }),
        }
    }
}

/// Response body from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// The "business insights" blurb shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    /// A paragraph of analysis.
    pub summary: String,
    /// Actionable strategies; the prompt asks for three.
    pub recommendations: Vec<String>,
    /// Categories likely to grow; the prompt asks for three.
    pub trending_categories: Vec<String>,
}

impl InsightReport {
    /// The report shown whenever a live one is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            summary: "We couldn't generate insights at this moment, but your revenue growth \
                      shows positive momentum. Keep focusing on customer retention strategies."
                .to_string(),
            recommendations: vec![
                "Review your top-performing products for cross-selling opportunities.".to_string(),
                "Launch a targeted email campaign for dormant customers.".to_string(),
                "Optimize product descriptions for better SEO ranking.".to_string(),
            ],
            trending_categories: vec![
                "Smart Home".to_string(),
                "Sustainability".to_string(),
                "Wellness".to_string(),
            ],
        }
    }

    /// Decode model output text into a validated report.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::Parse` if the text is not a JSON report, or
    /// `InsightError::Schema` if a field is blank or a list is empty.
    pub fn from_model_text(text: &str) -> Result<Self, InsightError> {
        let report: Self = serde_json::from_str(text.trim())
            .map_err(|e| InsightError::Parse(format!("invalid report JSON: {e}")))?;
        report.validate()?;
        Ok(report)
    }

    /// Check the report is fit to show.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::Schema` describing the first problem found.
    pub fn validate(&self) -> Result<(), InsightError> {
        if self.summary.trim().is_empty() {
            return Err(InsightError::Schema("summary is blank".to_string()));
        }
        validate_list("recommendations", &self.recommendations)?;
        validate_list("trendingCategories", &self.trending_categories)
    }
}

fn validate_list(field: &str, items: &[String]) -> Result<(), InsightError> {
    if items.is_empty() {
        return Err(InsightError::Schema(format!("{field} is empty")));
    }
    if let Some(index) = items.iter().position(|item| item.trim().is_empty()) {
        return Err(InsightError::Schema(format!("{field}[{index}] is blank")));
    }
    Ok(())
}
