/// Machine-readable run reports.
///
/// Serializes the outcome of a load — summary statistics plus the flagged
/// outliers for a chosen filter — as pretty-printed JSON, for downstream
/// tooling that consumes runs instead of reading console output.

use chrono::Utc;
use serde::Serialize;
use std::path::Path;

use crate::alert::OutlierFilter;
use crate::model::{DatasetSummary, OutlierView};
use crate::pipeline::LoadedLog;

// ============================================================================
// Report Structures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    /// RFC 3339 UTC timestamp of report generation.
    pub generated_at: String,
    /// Human-readable description of the filter the outliers were taken with.
    pub filter: String,
    pub summary: &'a DatasetSummary,
    pub outliers: Vec<OutlierView<'a>>,
}

impl<'a> RunReport<'a> {
    /// Builds a report over an already-loaded log.
    pub fn new(log: &'a LoadedLog, filter: OutlierFilter) -> Self {
        RunReport {
            generated_at: Utc::now().to_rfc3339(),
            filter: describe_filter(filter),
            summary: log.summary(),
            outliers: log.query(filter).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the report to `path` as JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn describe_filter(filter: OutlierFilter) -> String {
    match filter {
        OutlierFilter::All => "all".to_string(),
        OutlierFilter::Year(year) => format!("year={}", year),
        OutlierFilter::YearMonth { month, year } => {
            format!("month={:02} year={}", month, year)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
