//! Account commands against the configured credential registry.
//!
//! # Usage
//!
//! ```bash
//! bc-cli register -o "Arjun Sharma" -b "Sharma Co" -p pw1
//! bc-cli login -u sharmaco -p pw1 --insights
//! ```
//!
//! # Environment Variables
//!
//! - `BHARATCART_REGISTRY_PATH` - Registry file (default: `bharatcart_sql_registry_v1.json`)
//! - `BHARATCART_AUTH_LATENCY_MS` - Simulated auth delay
//! - `GEMINI_API_KEY` - Enables live insights for `login --insights`

use bharatcart_admin::config::AdminConfig;
use bharatcart_admin::{AdminApp, AppError};
use bharatcart_core::Handle;

/// Register a seller and report the derived handle.
///
/// # Errors
///
/// Returns `AppError` if configuration fails to load or registration is
/// rejected.
pub async fn register(owner: &str, business: &str, password: &str) -> Result<Handle, AppError> {
    let config = AdminConfig::from_env()?;
    tracing::info!(path = %config.registry_path.display(), "Using credential registry");

    let app = AdminApp::from_config(&config)?;
    let handle = app
        .register(owner, business, password)
        .await
        .inspect_err(|e| tracing::error!("{}", e.user_message()))?;

    tracing::info!("Account created successfully!");
    tracing::info!("  Owner: {}", owner);
    tracing::info!("  Business: {}", business);
    tracing::info!("  Login handle: {}", handle);
    Ok(handle)
}

/// Log in, summarize the dashboard, and optionally fetch insights.
///
/// # Errors
///
/// Returns `AppError` if configuration fails to load or the credentials are
/// rejected.
pub async fn login(handle: &str, password: &str, with_insights: bool) -> Result<(), AppError> {
    let config = AdminConfig::from_env()?;
    let mut app = AdminApp::from_config(&config)?;

    let session = app
        .login(handle, password)
        .await
        .inspect_err(|e| tracing::error!("{}", e.user_message()))?;

    let account = session.account();
    let stats = session.dashboard_stats();
    let pipeline = session.order_pipeline();

    tracing::info!("Welcome, {} ({})", account.owner_name, account.business_name);
    tracing::info!("  Session: {:?}", session.kind());
    tracing::info!("  Total revenue: \u{20b9}{} (+{}%)", stats.total_revenue, stats.revenue_growth);
    tracing::info!("  Orders: {} (+{}%)", stats.total_orders, stats.order_growth);
    tracing::info!("  Customers: {}", stats.total_customers);
    tracing::info!("  Active products: {}", stats.active_products);
    tracing::info!(
        "  Pipeline: {} awaiting pickup, {} in transit, {} delivered",
        pipeline.awaiting_pickup,
        pipeline.in_transit,
        pipeline.delivered
    );

    if with_insights {
        if !app.insight_client().is_enabled() {
            tracing::warn!("GEMINI_API_KEY not set; showing the fallback report");
        }
        let report = app.insights().await?;
        tracing::info!("");
        tracing::info!("AI insights:");
        tracing::info!("  {}", report.summary);
        for recommendation in &report.recommendations {
            tracing::info!("  - {}", recommendation);
        }
        tracing::info!("  Trending: {}", report.trending_categories.join(", "));
    }

    app.logout();
    Ok(())
}
