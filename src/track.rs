//! Dense per-chromosome coverage track
//!
//! One bit per base, set where a reference interval covers the position.
//! Space: O(chromosome_size / 8) bytes.

use std::ops::Range;

use bitvec::prelude::*;

/// Coverage bitmap for one chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeTrack {
    covered: BitVec,
}

impl ChromosomeTrack {
    /// Uncovered track of `size` positions.
    ///
    /// Allocates one bit per position. Generator configurations bound `size`
    /// by [`MAX_CHROMOSOME_SIZE`](crate::config::MAX_CHROMOSOME_SIZE).
    pub fn new(size: u64) -> Self {
        Self {
            covered: bitvec![0; size as usize],
        }
    }

    /// Mark every position of the half-open range as covered.
    ///
    /// The range is clipped to the track length.
    pub fn cover(&mut self, range: Range<u64>) {
        let end = (range.end as usize).min(self.covered.len());
        let start = (range.start as usize).min(end);
        self.covered[start..end].fill(true);
    }

    /// Whether `position` is covered; positions past the end are not.
    pub fn is_covered(&self, position: u64) -> bool {
        self.covered
            .get(position as usize)
            .map(|bit| *bit)
            .unwrap_or(false)
    }

    /// Number of positions.
    pub fn len(&self) -> u64 {
        self.covered.len() as u64
    }

    /// True for a zero-length track.
    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    /// Number of covered positions.
    pub fn covered_count(&self) -> u64 {
        self.covered.count_ones() as u64
    }

    /// Fraction of positions covered.
    pub fn coverage_fraction(&self) -> f64 {
        if self.covered.is_empty() {
            0.0
        } else {
            self.covered_count() as f64 / self.covered.len() as f64
        }
    }

    /// Underlying bits, for joint iteration with another track.
    pub fn bits(&self) -> &BitSlice {
        &self.covered
    }
}
