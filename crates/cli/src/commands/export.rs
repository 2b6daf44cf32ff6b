//! Analytics export commands.
//!
//! Writes the same files the Analytics page offers for download, built from
//! the sample revenue series and channel split.

use std::path::{Path, PathBuf};

use thiserror::Error;

use bharatcart_admin::seed::{SeedData, SeedError};
use bharatcart_admin::services::AnalyticsReport;
use bharatcart_admin::services::export::{self, ExportError, REPORT_FILE_NAME};

/// Errors that can occur while writing an export.
#[derive(Debug, Error)]
pub enum ExportCommandError {
    #[error("Failed to load sample data: {0}")]
    Seed(#[from] SeedError),

    #[error("Failed to render export: {0}")]
    Render(#[from] ExportError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `BharatCart_Analytics_<date>.csv` into `out_dir`.
///
/// # Errors
///
/// Returns `ExportCommandError` if rendering or writing fails.
pub async fn csv(out_dir: &Path) -> Result<PathBuf, ExportCommandError> {
    let seed = SeedData::demo()?;
    let content = export::revenue_csv(&seed.revenue)?;
    let file_name = export::csv_file_name(chrono::Utc::now().date_naive());
    write(out_dir, &file_name, content).await
}

/// Write `BharatCart_Report.json` into `out_dir`.
///
/// # Errors
///
/// Returns `ExportCommandError` if rendering or writing fails.
pub async fn json(out_dir: &Path) -> Result<PathBuf, ExportCommandError> {
    let seed = SeedData::demo()?;
    let report = AnalyticsReport::new(chrono::Utc::now(), seed.revenue, seed.channels);
    let content = report.to_json_pretty()?;
    write(out_dir, REPORT_FILE_NAME, content).await
}

async fn write(out_dir: &Path, file_name: &str, content: String) -> Result<PathBuf, ExportCommandError> {
    let path = out_dir.join(file_name);
    let io_err = |source| ExportCommandError::Write {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(out_dir).await.map_err(io_err)?;
    tokio::fs::write(&path, content).await.map_err(io_err)?;

    tracing::info!("Export written: {}", path.display());
    Ok(path)
}
