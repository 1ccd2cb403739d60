/// Ordinary-least-squares regression of volume on duration.
///
/// The fit is the classic two-pass form: means first, then centered sums.
/// Accumulation is sequential in ingestion order, so identical input always
/// produces an identical model.

use crate::dataset::Dataset;
use crate::model::{LoadError, RegressionModel};

/// Fits `volume_liters = slope * duration_minutes + intercept` over the
/// whole dataset.
///
/// Fails with [`LoadError::EmptyDataset`] when there is nothing to fit, and
/// with [`LoadError::DegenerateRegression`] when all durations are identical
/// (`s_xx == 0`), in which case the slope is undefined. Both are terminal
/// for the pipeline — no partial model is produced.
pub fn fit(dataset: &Dataset) -> Result<RegressionModel, LoadError> {
    if dataset.is_empty() {
        return Err(LoadError::EmptyDataset);
    }

    let n = dataset.len() as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for m in dataset.records() {
        sum_x += m.duration_minutes;
        sum_y += m.volume_liters;
    }
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let mut s_xx = 0.0;
    let mut s_xy = 0.0;
    for m in dataset.records() {
        let dx = m.duration_minutes - mean_x;
        let dy = m.volume_liters - mean_y;
        s_xx += dx * dx;
        s_xy += dx * dy;
    }

    if s_xx == 0.0 {
        return Err(LoadError::DegenerateRegression);
    }

    let slope = s_xy / s_xx;
    let intercept = mean_y - slope * mean_x;

    Ok(RegressionModel { slope, intercept })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
