//! Raw-record layout contract for the ingestion collaborator.
//!
//! File parsing lives outside this crate; what lives here is the layout
//! that turns an already-parsed wide numeric record into a 36-wide raw
//! frame: six 6-axis blocks read from explicit column offsets, with one
//! padding column between consecutive blocks.
//!
//! The offsets are deliberately data, not arithmetic: the recording format
//! is an external contract, and the final block's offset in particular
//! should be confirmed against real recordings rather than derived.
//! Callers with a corrected layout construct their own [`RecordLayout`].

use nalgebra::DMatrix;

use crate::error::{Result, SynthError};
use crate::trajectory::RAW_DIM;

/// Number of 6-axis blocks per record.
pub const BLOCK_COUNT: usize = 6;

/// Columns per block.
pub const BLOCK_WIDTH: usize = 6;

/// Column offsets of the six sensor blocks within a wide raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Start column of each block.
    pub block_offsets: [usize; BLOCK_COUNT],
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            // Column 0 is a timestamp; one padding column separates
            // consecutive blocks.
            block_offsets: [1, 8, 15, 22, 29, 36],
        }
    }
}

impl RecordLayout {
    /// Minimum record length this layout can extract from.
    #[must_use]
    pub fn min_record_len(&self) -> usize {
        self.block_offsets
            .iter()
            .map(|&o| o + BLOCK_WIDTH)
            .max()
            .unwrap_or(0)
    }

    /// Extract one 36-wide raw frame from a record.
    ///
    /// # Errors
    ///
    /// `InvalidRow` if the record is too short for the layout or contains
    /// non-finite values in the extracted columns.
    pub fn extract(&self, index: usize, record: &[f64]) -> Result<[f64; RAW_DIM]> {
        if record.len() < self.min_record_len() {
            return Err(SynthError::invalid_row(
                index,
                format!(
                    "record has {} fields, layout needs {}",
                    record.len(),
                    self.min_record_len()
                ),
            ));
        }

        let mut frame = [0.0; RAW_DIM];
        for (block, &offset) in self.block_offsets.iter().enumerate() {
            let src = &record[offset..offset + BLOCK_WIDTH];
            if src.iter().any(|v| !v.is_finite()) {
                return Err(SynthError::invalid_row(index, "non-finite sensor value"));
            }
            frame[block * BLOCK_WIDTH..(block + 1) * BLOCK_WIDTH].copy_from_slice(src);
        }
        Ok(frame)
    }
}

/// Assemble a raw batch from parsed records, skipping malformed rows.
///
/// A malformed row is skipped and counted, never aborting the batch; the
/// caller decides whether the skip rate is acceptable. Returns the batch
/// (possibly zero rows) and the number of rows skipped.
#[must_use]
pub fn frames_from_records(records: &[Vec<f64>], layout: &RecordLayout) -> (DMatrix<f64>, usize) {
    let mut frames: Vec<[f64; RAW_DIM]> = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.iter().enumerate() {
        match layout.extract(index, record) {
            Ok(frame) => frames.push(frame),
            Err(_) => skipped += 1,
        }
    }

    let batch = DMatrix::from_fn(frames.len(), RAW_DIM, |i, j| frames[i][j]);
    (batch, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_record(fill: f64) -> Vec<f64> {
        let mut r = vec![0.0; 42];
        for (i, v) in r.iter_mut().enumerate() {
            *v = fill + i as f64;
        }
        r
    }

    #[test]
    fn test_default_layout_span() {
        let layout = RecordLayout::default();
        assert_eq!(layout.min_record_len(), 42);
    }

    #[test]
    fn test_extract_block_placement() {
        let layout = RecordLayout::default();
        let record = wide_record(0.0);
        let frame = layout.extract(0, &record).unwrap();

        // First block starts at column 1, sixth block at column 36.
        assert_eq!(frame[0], 1.0);
        assert_eq!(frame[5], 6.0);
        assert_eq!(frame[30], 36.0);
        assert_eq!(frame[35], 41.0);
        // The padding column between blocks 1 and 2 is not copied.
        assert_eq!(frame[6], 8.0);
    }

    #[test]
    fn test_short_record_rejected() {
        let layout = RecordLayout::default();
        let short = vec![0.0; 41];
        assert!(layout.extract(3, &short).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let layout = RecordLayout::default();
        let mut record = wide_record(0.0);
        record[10] = f64::NAN;
        assert!(layout.extract(0, &record).is_err());

        // Non-finite values in padding columns are irrelevant.
        let mut record = wide_record(0.0);
        record[7] = f64::INFINITY;
        assert!(layout.extract(0, &record).is_ok());
    }

    #[test]
    fn test_batch_assembly_skips_bad_rows() {
        let layout = RecordLayout::default();
        let records = vec![
            wide_record(0.0),
            vec![1.0; 10], // too short
            wide_record(100.0),
        ];

        let (batch, skipped) = frames_from_records(&records, &layout);
        assert_eq!(batch.nrows(), 2);
        assert_eq!(batch.ncols(), RAW_DIM);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_all_rows_bad_yields_empty_batch() {
        let layout = RecordLayout::default();
        let records = vec![vec![0.0; 5], vec![0.0; 2]];

        let (batch, skipped) = frames_from_records(&records, &layout);
        assert_eq!(batch.nrows(), 0);
        assert_eq!(skipped, 2);
    }
}
