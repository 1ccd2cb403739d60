/// Statistical analysis for the water-usage pipeline.
///
/// Submodules:
/// - `regression` — ordinary-least-squares fit of volume on duration.

pub mod regression;

pub use regression::fit;
