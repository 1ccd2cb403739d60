//! End-to-end pipeline integration tests.
//!
//! These exercise the public library surface the way the binary does: raw
//! text in, summary and filtered outlier views out, plus the JSON report
//! shape consumed by downstream tooling.

use aquamon_service::alert::OutlierFilter;
use aquamon_service::model::MAX_RECORDS;
use aquamon_service::pipeline;
use aquamon_service::report::RunReport;

/// A month of baseline usage around 5 L / 10 min with three injected bursts,
/// spread over two years for filter coverage.
fn sample_text() -> String {
    let mut text = String::new();
    // Baseline: volume tracks duration at roughly 0.5 L/min.
    for day in 1..=28 {
        let duration_min = 8 + (day % 5); // 8..12 minutes
        let volume = 0.5 * duration_min as f64 + 0.1 * (day % 3) as f64;
        text.push_str(&format!(
            "{:02}/03/2025 {:.2}L 00:{:02}:00\n",
            day, volume, duration_min
        ));
    }
    // Bursts: far above the baseline for their duration.
    text.push_str("29/03/2025 60.00L 00:09:00\n");
    text.push_str("02/04/2025 55.00L 00:10:00\n");
    text.push_str("15/06/2024 70.00L 00:08:00\n");
    text
}

#[test]
fn test_load_produces_consistent_summary() {
    let log = pipeline::load(&sample_text()).expect("sample data should load");
    let summary = log.summary();

    assert_eq!(summary.record_count, 31);
    assert_eq!(summary.skipped_lines, 0);
    assert_eq!(summary.dropped_records, 0);
    assert_eq!(
        summary.outlier_count,
        log.query(OutlierFilter::All).count(),
        "summary count must match what the query engine yields"
    );
    // The threshold is always one of the observed absolute residuals, so it
    // can never be negative.
    assert!(summary.threshold >= 0.0);
}

#[test]
fn test_bursts_are_flagged_and_baseline_is_not() {
    let log = pipeline::load(&sample_text()).expect("sample data should load");
    let flagged: Vec<(i32, i32, i32)> = log
        .query(OutlierFilter::All)
        .map(|v| (v.date.day, v.date.month, v.date.year))
        .collect();

    // 31 records: idx = floor(0.9 * 30) = 27, so at most 3 records can
    // exceed the threshold — exactly the three injected bursts.
    assert_eq!(
        flagged,
        vec![(29, 3, 2025), (2, 4, 2025), (15, 6, 2024)],
        "exactly the injected bursts should be flagged, in ingestion order"
    );
}

#[test]
fn test_filter_chain_is_a_subset_hierarchy() {
    let log = pipeline::load(&sample_text()).expect("sample data should load");

    let all: Vec<_> = log.query(OutlierFilter::All).collect();
    let y2025: Vec<_> = log.query(OutlierFilter::Year(2025)).collect();
    let march_2025: Vec<_> = log
        .query(OutlierFilter::YearMonth { month: 3, year: 2025 })
        .collect();

    assert_eq!(all.len(), 3);
    assert_eq!(y2025.len(), 2);
    assert_eq!(march_2025.len(), 1);
    for view in &march_2025 {
        assert!(y2025.contains(view));
    }
    for view in &y2025 {
        assert!(all.contains(view));
    }

    // No match is an empty result, not an error.
    assert_eq!(log.query(OutlierFilter::Year(1999)).count(), 0);
}

#[test]
fn test_malformed_lines_are_skipped_in_aggregate() {
    let mut text = sample_text();
    text.push_str("this is not a measurement\n");
    text.push_str("99/99 also not\n");

    let log = pipeline::load(&text).expect("valid lines remain");
    assert_eq!(log.summary().record_count, 31);
    assert_eq!(log.summary().skipped_lines, 2);
}

#[test]
fn test_capacity_overflow_is_surfaced_not_silent() {
    let mut text = String::new();
    for i in 0..(MAX_RECORDS + 5) {
        // Vary duration so the fit is non-degenerate.
        let minutes = 5 + (i % 50);
        text.push_str(&format!(
            "01/01/2025 {}.0L 00:{:02}:00\n",
            5 + (i % 7),
            minutes
        ));
    }

    let log = pipeline::load(&text).expect("should load at capacity");
    assert_eq!(log.summary().record_count, MAX_RECORDS);
    assert_eq!(log.summary().dropped_records, 5);
}

#[test]
fn test_fatal_errors_propagate_instead_of_halting() {
    use aquamon_service::model::LoadError;

    assert_eq!(pipeline::load("").unwrap_err(), LoadError::EmptyDataset);

    let constant = "01/01/2025 5.0L 00:10:00\n02/01/2025 9.0L 00:10:00\n";
    assert_eq!(
        pipeline::load(constant).unwrap_err(),
        LoadError::DegenerateRegression
    );
}

#[test]
fn test_json_report_shape() {
    let log = pipeline::load(&sample_text()).expect("sample data should load");
    let report = RunReport::new(&log, OutlierFilter::Year(2025));
    let json = report.to_json().expect("report should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["filter"], "year=2025");
    assert_eq!(value["summary"]["record_count"], 31);
    let outliers = value["outliers"].as_array().unwrap();
    assert_eq!(outliers.len(), 2);
    for outlier in outliers {
        assert_eq!(outlier["date"]["year"], 2025);
        assert!(outlier["duration_label"].is_string());
        assert!(outlier["volume_liters"].is_number());
    }
}
