//! Analytics exports.
//!
//! The Analytics page offers two downloads: the monthly revenue series as CSV
//! and a JSON report bundling that series with the sales channel split. Both
//! are produced here as in-memory strings; writing them anywhere is up to the
//! caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform name stamped into every JSON report.
pub const PLATFORM_NAME: &str = "BharatCart Admin";

/// File name offered for the JSON report.
pub const REPORT_FILE_NAME: &str = "BharatCart_Report.json";

const CSV_HEADER: [&str; 4] = ["Month", "Revenue (INR)", "Orders", "Growth (%)"];

/// Errors that can occur while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV buffer could not be flushed or was not UTF-8.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// One month of the revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Short month label, e.g. `Jan`.
    pub name: String,
    /// Whole rupees.
    pub revenue: u64,
    pub orders: u32,
    /// Month-over-month growth in percent.
    pub growth: u32,
}

/// One slice of the sales-channel chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelShare {
    pub name: String,
    pub value: u32,
}

/// The downloadable JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub report_date: DateTime<Utc>,
    pub platform: String,
    pub metrics: Vec<RevenuePoint>,
    pub channels: Vec<ChannelShare>,
}

impl AnalyticsReport {
    /// Build a report stamped with `report_date`.
    #[must_use]
    pub fn new(
        report_date: DateTime<Utc>,
        metrics: Vec<RevenuePoint>,
        channels: Vec<ChannelShare>,
    ) -> Self {
        Self {
            report_date,
            platform: PLATFORM_NAME.to_string(),
            metrics,
            channels,
        }
    }

    /// Pretty-printed JSON, two-space indented.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render the revenue series as CSV with a fixed header row.
///
/// # Errors
///
/// Returns `ExportError` if a row cannot be written.
pub fn revenue_csv(points: &[RevenuePoint]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for point in points {
        writer.write_record([
            point.name.clone(),
            point.revenue.to_string(),
            point.orders.to_string(),
            point.growth.to_string(),
        ])?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    // Rows are joined by newlines; the last row has no terminator.
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// File name offered for the CSV export on `date`.
#[must_use]
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("BharatCart_Analytics_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn points() -> Vec<RevenuePoint> {
        vec![
            RevenuePoint {
                name: "Jan".to_string(),
                revenue: 180_000,
                orders: 450,
                growth: 12,
            },
            RevenuePoint {
                name: "Feb".to_string(),
                revenue: 210_000,
                orders: 520,
                growth: 15,
            },
        ]
    }

    #[test]
    fn test_revenue_csv_layout() {
        let csv = revenue_csv(&points()).unwrap();
        assert_eq!(
            csv,
            "Month,Revenue (INR),Orders,Growth (%)\nJan,180000,450,12\nFeb,210000,520,15"
        );
    }

    #[test]
    fn test_revenue_csv_empty_series_has_header_only() {
        let csv = revenue_csv(&[]).unwrap();
        assert_eq!(csv, "Month,Revenue (INR),Orders,Growth (%)");
    }

    #[test]
    fn test_csv_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(csv_file_name(date), "BharatCart_Analytics_2024-05-17.csv");
    }

    #[test]
    fn test_report_json_shape() {
        let report = AnalyticsReport::new(
            Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap(),
            points(),
            vec![ChannelShare {
                name: "Mobile App".to_string(),
                value: 650,
            }],
        );

        let json: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["platform"], "BharatCart Admin");
        assert_eq!(json["reportDate"], "2024-05-17T09:30:00Z");
        assert_eq!(json["metrics"][1]["revenue"], 210_000);
        assert_eq!(json["channels"][0]["name"], "Mobile App");
        assert_eq!(json["channels"][0]["value"], 650);
    }
}
