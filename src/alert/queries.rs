/// Date-filtered retrieval of flagged outliers.
///
/// All queries walk the classified dataset in ingestion order and yield
/// lazily — callers can stop early, and calling again restarts the walk.
/// An empty result is a normal outcome, not an error.

use crate::dataset::Dataset;
use crate::model::OutlierView;

/// Which flagged records a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierFilter {
    /// Every flagged record, regardless of date.
    All,
    /// Flagged records whose date matches the given year.
    Year(i32),
    /// Flagged records whose date matches the given month and year.
    YearMonth { month: i32, year: i32 },
}

impl OutlierFilter {
    fn matches(&self, date: &crate::model::RecordDate) -> bool {
        match *self {
            OutlierFilter::All => true,
            OutlierFilter::Year(year) => date.year == year,
            OutlierFilter::YearMonth { month, year } => {
                date.year == year && date.month == month
            }
        }
    }
}

/// Iterates the dataset's outliers matching `filter`, in ingestion order.
///
/// Requires a classified dataset; on an unclassified one no record carries
/// the outlier flag and the result is always empty.
pub fn outliers(
    dataset: &Dataset,
    filter: OutlierFilter,
) -> impl Iterator<Item = OutlierView<'_>> {
    dataset
        .records()
        .iter()
        .filter(move |m| m.is_outlier && filter.matches(&m.date))
        .map(|m| OutlierView {
            date: m.date,
            duration_label: &m.duration_label,
            volume_liters: m.volume_liters,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
