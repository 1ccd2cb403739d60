/// Append-only, capacity-bounded measurement storage.
///
/// A `Dataset` is built exactly once per load, in file order, then written
/// once more by the classifier (residual/outlier fields) and read-only
/// thereafter. There is no deletion and no reordering — `len()` is the single
/// source of truth for iteration bounds.

use crate::model::{MAX_RECORDS, Measurement};

/// Ordered collection of measurements, bounded at [`MAX_RECORDS`].
///
/// Valid records offered past capacity are not stored; they are counted in
/// `dropped()` so the caller can surface the truncation instead of losing
/// data silently.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Measurement>,
    dropped: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset {
            records: Vec::new(),
            dropped: 0,
        }
    }

    /// Appends a measurement, preserving insertion order.
    ///
    /// Returns `true` if the record was stored, `false` if the dataset was
    /// already at capacity (the record is dropped and counted).
    pub fn push(&mut self, measurement: Measurement) -> bool {
        if self.records.len() >= MAX_RECORDS {
            self.dropped += 1;
            return false;
        }
        self.records.push(measurement);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Valid records dropped because the dataset was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Read access to the stored records, in ingestion order.
    pub fn records(&self) -> &[Measurement] {
        &self.records
    }

    /// Bulk write access for the classifier. Not exposed outside the crate —
    /// after classification the dataset is read-only.
    pub(crate) fn records_mut(&mut self) -> &mut [Measurement] {
        &mut self.records
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
