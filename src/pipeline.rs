/// Load-and-classify orchestration.
///
/// The whole pipeline is batch-oriented and single-threaded: parse every
/// line, fit the regression, classify outliers, then hand back a read-only
/// [`LoadedLog`] that serves queries. Fatal conditions come back as
/// `Err(LoadError)` for the caller to present — the core never halts or
/// retries on its own.

use crate::alert::{self, OutlierFilter};
use crate::analysis;
use crate::dataset::Dataset;
use crate::ingest;
use crate::logging::{self, Subsystem};
use crate::model::{DatasetSummary, LoadError, OutlierView, RegressionModel};

/// A fully loaded, fitted, and classified measurement log.
///
/// Immutable after construction; queries are read-only views.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    dataset: Dataset,
    model: RegressionModel,
    summary: DatasetSummary,
}

impl LoadedLog {
    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn model(&self) -> RegressionModel {
        self.model
    }

    /// Iterates flagged outliers matching `filter`, in ingestion order.
    /// Lazy and restartable; an empty result is a normal outcome.
    pub fn query(&self, filter: OutlierFilter) -> impl Iterator<Item = OutlierView<'_>> {
        alert::outliers(&self.dataset, filter)
    }
}

/// Runs the full pipeline over raw measurement text.
///
/// Per-line parse failures are skipped and counted; an empty dataset or a
/// zero-variance duration column is fatal and returned as an error before
/// any classification happens.
pub fn load(text: &str) -> Result<LoadedLog, LoadError> {
    let (mut dataset, skipped) = ingest::read_lines(text.lines());
    logging::log_ingest_summary(dataset.len(), skipped, dataset.dropped());

    let model = analysis::fit(&dataset)?;
    let threshold = alert::classify(&mut dataset, &model);
    let outlier_count = dataset.records().iter().filter(|m| m.is_outlier).count();

    let summary = DatasetSummary {
        record_count: dataset.len(),
        slope: model.slope,
        intercept: model.intercept,
        threshold,
        outlier_count,
        skipped_lines: skipped,
        dropped_records: dataset.dropped(),
    };

    logging::info(
        Subsystem::Analysis,
        &format!(
            "fit volume = {:.3} * duration + {:.3}; outlier threshold |residual| > {:.2} ({} flagged)",
            summary.slope, summary.intercept, summary.threshold, summary.outlier_count
        ),
    );

    Ok(LoadedLog { dataset, model, summary })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
