/// Ingestion layer: turns raw measurement text into a validated dataset.
///
/// Submodules:
/// - `records` — line-by-line parsing of the `D/M/Y volume HH:MM:SS` format.

pub mod records;

pub use records::{parse_line, read_lines};
