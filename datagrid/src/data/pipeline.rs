//! The filter -> sort view pipeline.

use crate::record::Record;

use super::filter::FilterState;
use super::sort::SortState;

/// Compute the ordered, filtered view over a dataset.
///
/// Stage order is fixed: filter first, then sort. Returns row indices into
/// `records`; the records themselves are never cloned or mutated. Pure and
/// idempotent: identical inputs produce an identical index sequence,
/// including tie order (the sort is stable over the filtered order).
pub fn compute(records: &[Record], filter: &FilterState, sort: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.evaluate(record))
        .map(|(index, _)| index)
        .collect();

    sort.apply(records, &mut indices);
    indices
}
