/// Water-usage outlier detection service.
///
/// Ingests a bounded log of usage measurements (date, volume, duration) from
/// plain text, fits a linear model of volume on duration, flags records whose
/// absolute residual strictly exceeds the nearest-rank 90th percentile, and
/// serves date-filtered queries over the flagged outliers.
///
/// Pipeline: `ingest` → `dataset` → `analysis` → `alert` → queries, all
/// orchestrated by `pipeline::load`. The binary in `main.rs` is a thin
/// collaborator over this library.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod dataset;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
