//! Gemini API client for dashboard insights.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::InsightsConfig;
use crate::services::DashboardStats;

use super::error::{ApiErrorResponse, InsightError};
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InsightReport};

/// Insight client.
///
/// Cheap to clone. A client built without an API key is disabled: it never
/// touches the network and always answers with the fallback report.
#[derive(Clone)]
pub struct InsightClient {
    inner: Option<Arc<InsightClientInner>>,
}

struct InsightClientInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl std::fmt::Debug for InsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightClient")
            .field("model", &self.inner.as_ref().map(|inner| &inner.model))
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl InsightClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::Config` if the API key is not a valid header
    /// value, or `InsightError::Http` if the HTTP client cannot be built.
    pub fn new(config: &InsightsConfig) -> Result<Self, InsightError> {
        let Some(api_key) = config.api_key.as_ref() else {
            tracing::info!("GEMINI_API_KEY not set; insights will use the fallback report");
            return Ok(Self::disabled());
        };

        let mut key_header = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| InsightError::Config("API key contains invalid header characters".to_string()))?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-goog-api-key", key_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.as_str().trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            inner: Some(Arc::new(InsightClientInner {
                client,
                endpoint,
                model: config.model.clone(),
            })),
        })
    }

    /// A client that always returns the fallback report.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Fetch an insight report for `stats`.
    ///
    /// Never fails: any error is logged and replaced by
    /// [`InsightReport::fallback`].
    pub async fn get_insights(&self, stats: &DashboardStats) -> InsightReport {
        match self.try_get_insights(stats).await {
            Ok(report) => report,
            Err(InsightError::Disabled) => InsightReport::fallback(),
            Err(e) => {
                tracing::warn!(error = %e, "Insight generation failed; using fallback report");
                InsightReport::fallback()
            }
        }
    }

    /// Fetch an insight report, surfacing the failure instead of falling back.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::Disabled` without a network call if no API key
    /// is configured, otherwise the transport, status, decode or validation
    /// error that stopped the report.
    #[instrument(skip_all, fields(model = self.inner.as_ref().map(|i| i.model.as_str())))]
    pub async fn try_get_insights(
        &self,
        stats: &DashboardStats,
    ) -> Result<InsightReport, InsightError> {
        let inner = self.inner.as_ref().ok_or(InsightError::Disabled)?;

        let request = GenerateContentRequest {
            contents: vec![Content::user_text(build_prompt(stats))],
            generation_config: GenerationConfig::insight_report(),
        };

        let response = inner
            .client
            .post(&inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_status(status, response).await);
        }

        let body = response.text().await?;
        let reply: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| InsightError::Parse(format!("Failed to parse response: {e}")))?;
        let text = reply.text().ok_or(InsightError::EmptyReply)?;

        let report = InsightReport::from_model_text(&text)?;
        tracing::debug!(
            recommendations = report.recommendations.len(),
            trending = report.trending_categories.len(),
            "Insight report received"
        );
        Ok(report)
    }
}

async fn error_from_status(status: reqwest::StatusCode, response: reqwest::Response) -> InsightError {
    match response.text().await {
        Ok(body) => {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map_or(body, |api_error| api_error.error.message);
            InsightError::Api {
                status: status.as_u16(),
                message,
            }
        }
        Err(e) => InsightError::Http(e),
    }
}

/// Natural-language prompt embedding the dashboard stats.
#[must_use]
pub fn build_prompt(stats: &DashboardStats) -> String {
    format!(
        "Analyze the following e-commerce dashboard statistics for an Indian online seller \
         and provide professional business insights:\n\
         Total Revenue: \u{20b9}{revenue}\n\
         Revenue Growth: {revenue_growth}%\n\
         Total Orders: {orders}\n\
         Order Growth: {order_growth}%\n\
         Total Customers: {customers}\n\
         Active Products: {products}\n\
         \n\
         Format the response as a JSON object with:\n\
         1. summary (a paragraph of business analysis)\n\
         2. recommendations (an array of 3 actionable business strategies)\n\
         3. trendingCategories (an array of 3 categories likely to grow based on current performance)\n",
        revenue = stats.total_revenue,
        revenue_growth = stats.revenue_growth,
        orders = stats.total_orders,
        order_growth = stats.order_growth,
        customers = stats.total_customers,
        products = stats.active_products,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::time::Duration;

    use rust_decimal::Decimal;
    use secrecy::SecretString;

    fn stats() -> DashboardStats {
        DashboardStats {
            total_revenue: Decimal::new(52_499, 0),
            total_orders: 5,
            total_customers: 4,
            active_products: 6,
            revenue_growth: Decimal::new(125, 1),
            order_growth: Decimal::new(82, 1),
            customer_growth: Decimal::new(41, 1),
            product_growth: Decimal::new(24, 1),
        }
    }

    #[test]
    fn test_prompt_embeds_stats() {
        let prompt = build_prompt(&stats());
        assert!(prompt.contains("Total Revenue: \u{20b9}52499\n"));
        assert!(prompt.contains("Revenue Growth: 12.5%"));
        assert!(prompt.contains("Total Orders: 5\n"));
        assert!(prompt.contains("Order Growth: 8.2%"));
        assert!(prompt.contains("Total Customers: 4\n"));
        assert!(prompt.contains("Active Products: 6\n"));
        assert!(prompt.contains("an array of 3 actionable business strategies"));
    }

    #[tokio::test]
    async fn test_disabled_client_returns_fallback() {
        let client = InsightClient::disabled();
        assert!(!client.is_enabled());
        assert!(matches!(
            client.try_get_insights(&stats()).await,
            Err(InsightError::Disabled)
        ));
        assert_eq!(client.get_insights(&stats()).await, InsightReport::fallback());
    }

    #[test]
    fn test_config_without_key_builds_disabled_client() {
        let config = InsightsConfig::disabled().unwrap();
        assert!(!InsightClient::new(&config).unwrap().is_enabled());
    }

    #[test]
    fn test_invalid_key_is_a_config_error() {
        let mut config = InsightsConfig::disabled().unwrap();
        config.api_key = Some(SecretString::from("bad\nkey"));
        config.timeout = Duration::from_secs(1);
        assert!(matches!(
            InsightClient::new(&config),
            Err(InsightError::Config(_))
        ));
    }
}
