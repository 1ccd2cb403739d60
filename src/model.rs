/// Core data types for the water-usage outlier detection service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond formatting, no I/O, and no analysis — only the
/// types that flow through the pipeline.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of measurements retained per load. Valid lines beyond
/// this limit are dropped and surfaced in `DatasetSummary::dropped_records`.
pub const MAX_RECORDS: usize = 300;

/// Storage limit for the verbatim duration text ("HH:MM:SS"). Longer labels
/// are truncated to this many bytes.
pub const DURATION_LABEL_MAX: usize = 8;

/// Percentile rank used for the outlier threshold (nearest-rank estimator).
pub const OUTLIER_PERCENTILE: f64 = 0.90;

// ---------------------------------------------------------------------------
// Measurement types
// ---------------------------------------------------------------------------

/// Calendar date of a measurement as it appeared in the source file.
///
/// Parsed as three integers from a `D/M/Y` token. No calendar validation is
/// performed — the source format's contract is three integers, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordDate {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// One parsed water-usage record.
///
/// `residual`, `abs_residual`, and `is_outlier` are derived fields written by
/// `alert::outliers::classify` after the regression fit. Classification is
/// all-or-nothing: either every record in a dataset carries populated derived
/// fields, or none does.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub date: RecordDate,
    /// Observed volume in liters (unit marker stripped during parsing).
    pub volume_liters: f64,
    /// Usage duration in minutes, derived from the HH:MM:SS token.
    /// Always strictly positive for stored records.
    pub duration_minutes: f64,
    /// Original duration text, preserved verbatim for display.
    pub duration_label: String,
    /// `volume_liters - (slope * duration_minutes + intercept)`.
    pub residual: f64,
    pub abs_residual: f64,
    pub is_outlier: bool,
}

// ---------------------------------------------------------------------------
// Analysis types
// ---------------------------------------------------------------------------

/// Ordinary-least-squares fit of volume on duration:
/// `volume ≈ slope * duration + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionModel {
    /// Model-predicted volume for a given duration.
    pub fn predict(&self, duration_minutes: f64) -> f64 {
        self.slope * duration_minutes + self.intercept
    }
}

/// Aggregate result of one load-and-classify run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of valid measurements retained.
    pub record_count: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Nearest-rank 90th percentile of absolute residuals.
    pub threshold: f64,
    /// Records whose absolute residual strictly exceeds the threshold.
    pub outlier_count: usize,
    /// Malformed input lines skipped during parsing.
    pub skipped_lines: usize,
    /// Valid lines dropped because the dataset was already at capacity.
    pub dropped_records: usize,
}

/// Read-only view of one flagged outlier, as handed to callers of the
/// query engine. Borrows the duration label from the underlying dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierView<'a> {
    pub date: RecordDate,
    pub duration_label: &'a str,
    pub volume_liters: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Fatal conditions that terminate a load. Per-line parse failures are not
/// errors — malformed lines are skipped and counted in aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No valid measurement survived parsing.
    EmptyDataset,
    /// All durations are identical (zero variance), so no line can be fit.
    DegenerateRegression,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::EmptyDataset => {
                write!(f, "no valid measurements found in input")
            }
            LoadError::DegenerateRegression => {
                write!(
                    f,
                    "cannot fit regression: all durations are identical (zero variance)"
                )
            }
        }
    }
}

impl std::error::Error for LoadError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_date_display_pads_components() {
        let date = RecordDate { day: 1, month: 6, year: 2025 };
        assert_eq!(date.to_string(), "01/06/2025");
    }

    #[test]
    fn test_model_predict_is_linear() {
        let model = RegressionModel { slope: 2.0, intercept: 1.0 };
        assert_eq!(model.predict(0.0), 1.0);
        assert_eq!(model.predict(10.0), 21.0);
    }

    #[test]
    fn test_load_error_messages_are_distinct() {
        assert_ne!(
            LoadError::EmptyDataset.to_string(),
            LoadError::DegenerateRegression.to_string()
        );
    }
}
