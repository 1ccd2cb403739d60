/// Outlier flagging and retrieval.
///
/// Submodules:
/// - `outliers` — residual computation, percentile threshold, flagging.
/// - `queries`  — date-filtered iteration over flagged records.

pub mod outliers;
pub mod queries;

pub use outliers::classify;
pub use queries::{OutlierFilter, outliers};
