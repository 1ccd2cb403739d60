/// Residual-based outlier classification.
///
/// A record is an outlier when its absolute residual against the fitted
/// model strictly exceeds the nearest-rank 90th percentile of all absolute
/// residuals in the dataset. Strictly — a record sitting exactly at the
/// threshold (including the threshold-defining record itself) is not an
/// outlier, so a single-record dataset can never flag anything.

use crate::dataset::Dataset;
use crate::model::{OUTLIER_PERCENTILE, RegressionModel};

/// Computes residuals for every record, derives the percentile threshold,
/// and flags outliers in place. Returns the threshold.
///
/// Runs exactly once per dataset; classification is all-or-nothing, so after
/// this call every record carries populated residual/outlier fields. Must
/// not be called on an empty dataset (the pipeline fits the model first,
/// which already rejects empty input).
pub fn classify(dataset: &mut Dataset, model: &RegressionModel) -> f64 {
    for m in dataset.records_mut() {
        m.residual = m.volume_liters - model.predict(m.duration_minutes);
        m.abs_residual = m.residual.abs();
    }

    let threshold = percentile_threshold(dataset);

    for m in dataset.records_mut() {
        m.is_outlier = m.abs_residual > threshold;
    }

    threshold
}

/// Nearest-rank percentile of the absolute residuals: sort a copy ascending
/// and select the value at `floor(p * (n - 1))`, clamped to the valid index
/// range. The threshold is always one of the observed values — no
/// interpolation.
fn percentile_threshold(dataset: &Dataset) -> f64 {
    let mut sorted: Vec<f64> = dataset.records().iter().map(|m| m.abs_residual).collect();
    sorted.sort_by(f64::total_cmp);

    let idx = (OUTLIER_PERCENTILE * (sorted.len() - 1) as f64).floor() as usize;
    let idx = idx.min(sorted.len() - 1);
    sorted[idx]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measurement, RecordDate};

    /// Flat model (slope 0, intercept 0) so each volume is its own residual.
    fn flat_model() -> RegressionModel {
        RegressionModel { slope: 0.0, intercept: 0.0 }
    }

    fn dataset_with_volumes(volumes: &[f64]) -> Dataset {
        let mut dataset = Dataset::new();
        for (i, &v) in volumes.iter().enumerate() {
            dataset.push(Measurement {
                date: RecordDate { day: i as i32 + 1, month: 1, year: 2025 },
                volume_liters: v,
                duration_minutes: 10.0,
                duration_label: "00:10:00".to_string(),
                residual: 0.0,
                abs_residual: 0.0,
                is_outlier: false,
            });
        }
        dataset
    }

    #[test]
    fn test_residuals_are_observed_minus_predicted() {
        let mut dataset = dataset_with_volumes(&[5.0]);
        let model = RegressionModel { slope: 0.5, intercept: 1.0 };
        classify(&mut dataset, &model);
        let m = &dataset.records()[0];
        // predicted = 0.5 * 10 + 1 = 6, residual = 5 - 6 = -1
        assert!((m.residual - (-1.0)).abs() < 1e-12);
        assert!((m.abs_residual - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_an_observed_abs_residual() {
        let mut dataset = dataset_with_volumes(&[1.0, -3.0, 2.0, -7.0, 4.0]);
        let threshold = classify(&mut dataset, &flat_model());
        assert!(
            dataset
                .records()
                .iter()
                .any(|m| m.abs_residual == threshold),
            "nearest-rank threshold must be one of the data values, got {threshold}"
        );
    }

    #[test]
    fn test_nearest_rank_selection_for_ten_records() {
        // abs residuals 1..=10; idx = floor(0.9 * 9) = 8 → ninth value = 9.
        let volumes: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let mut dataset = dataset_with_volumes(&volumes);
        let threshold = classify(&mut dataset, &flat_model());
        assert_eq!(threshold, 9.0);

        // Only the record with |residual| 10 strictly exceeds the threshold.
        let flagged: Vec<f64> = dataset
            .records()
            .iter()
            .filter(|m| m.is_outlier)
            .map(|m| m.abs_residual)
            .collect();
        assert_eq!(flagged, vec![10.0]);
    }

    #[test]
    fn test_exact_count_flagged_without_ties() {
        // With distinct abs residuals, exactly n - idx - 1 records exceed
        // the threshold.
        let volumes: Vec<f64> = (1..=25).map(|v| v as f64).collect();
        let n = volumes.len();
        let mut dataset = dataset_with_volumes(&volumes);
        classify(&mut dataset, &flat_model());

        let idx = (OUTLIER_PERCENTILE * (n - 1) as f64).floor() as usize;
        let flagged = dataset.records().iter().filter(|m| m.is_outlier).count();
        assert_eq!(flagged, n - idx - 1);
    }

    #[test]
    fn test_value_at_threshold_is_not_an_outlier() {
        // Ties at the threshold stay inside the fence (strict inequality).
        let mut dataset = dataset_with_volumes(&[1.0, 5.0, 5.0, 5.0]);
        let threshold = classify(&mut dataset, &flat_model());
        assert_eq!(threshold, 5.0);
        assert!(dataset.records().iter().all(|m| !m.is_outlier));
    }

    #[test]
    fn test_single_record_is_never_an_outlier() {
        let mut dataset = dataset_with_volumes(&[42.0]);
        let threshold = classify(&mut dataset, &flat_model());
        assert_eq!(threshold, 42.0);
        assert!(!dataset.records()[0].is_outlier);
    }

    #[test]
    fn test_raising_a_value_above_threshold_never_lowers_threshold() {
        let volumes: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let mut dataset = dataset_with_volumes(&volumes);
        let before = classify(&mut dataset, &flat_model());

        // Inflate the largest residual (already above the threshold).
        let mut inflated = volumes.clone();
        inflated[9] = 100.0;
        let mut dataset = dataset_with_volumes(&inflated);
        let after = classify(&mut dataset, &flat_model());

        assert!(after >= before, "threshold went from {before} to {after}");
    }

    #[test]
    fn test_classification_is_all_or_nothing() {
        let mut dataset = dataset_with_volumes(&[1.0, 2.0, 30.0, 2.5]);
        classify(&mut dataset, &flat_model());
        // Every record has a populated abs_residual after classification.
        for m in dataset.records() {
            assert_eq!(m.abs_residual, m.residual.abs());
        }
    }
}
