//! Inclusive integer ranges and merging them into a sorted, disjoint set.

use std::cmp::Ordering;

use checked_sum::CheckedSum;

/// An inclusive range of IDs, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InclusiveRange {
    pub start: u64,
    pub end: u64,
}

/// An error creating an [`InclusiveRange`].
#[derive(thiserror::Error, Debug)]
pub enum InclusiveRangeError {
    #[error("range end before start: {start}-{end}")]
    EndBeforeStart { start: u64, end: u64 },
}

impl InclusiveRange {
    pub fn new(start: u64, end: u64) -> Result<Self, InclusiveRangeError> {
        if end < start {
            return Err(InclusiveRangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// How many IDs the range holds, or `None` for the full `u64` range.
    pub fn id_count(&self) -> Option<u64> {
        (self.end - self.start).checked_add(1)
    }

    /// Order a value relative to the range: `Less` if before it, `Greater` if after it.
    fn locate(&self, value: u64) -> Ordering {
        if value < self.start {
            Ordering::Less
        } else if value > self.end {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// A sorted collection of disjoint, non-adjacent ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRanges(Vec<InclusiveRange>);

impl MergedRanges {
    /// Merge overlapping or adjacent ranges after sorting by start.
    pub fn merge<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = InclusiveRange>,
    {
        let mut sorted: Vec<_> = ranges.into_iter().collect();
        sorted.sort_unstable();

        let mut merged: Vec<InclusiveRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                // adjacent ranges merge too, as `last.end + 1 == range.start`
                Some(last) if range.start <= last.end.saturating_add(1) => {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        Self(merged)
    }

    pub fn as_slice(&self) -> &[InclusiveRange] {
        &self.0
    }

    /// The smallest and largest IDs covered, or `None` when there are no ranges.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        let first = self.0.first()?;
        let last = self.0.last()?;
        Some((first.start, last.end))
    }

    /// Check if any range holds the value, by binary search.
    pub fn contains(&self, value: u64) -> bool {
        self.0
            .binary_search_by(|range| range.locate(value).reverse())
            .is_ok()
    }

    /// The total count of IDs covered by the ranges, or `None` if it doesn't fit a `u64`.
    pub fn covered_count(&self) -> Option<u64> {
        self.0
            .iter()
            .map(InclusiveRange::id_count)
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .checked_sum()
    }
}
