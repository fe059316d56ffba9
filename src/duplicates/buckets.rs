//! Size-based bucketing of candidate files.
//!
//! # Overview
//!
//! Files with different sizes cannot be content-duplicates, so bucketing by
//! exact byte size is the first, free elimination step: most candidates end
//! up alone in their bucket and are never read at all.
//!
//! Buckets preserve insertion order, and the buckets themselves are yielded
//! in first-insertion order, because discovery order determines output
//! order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::CandidateFile;

/// Candidate files partitioned by exact byte size.
#[derive(Debug, Default)]
pub struct SizeBuckets {
    buckets: HashMap<u64, Vec<CandidateFile>>,
    /// Bucket keys in first-insertion order
    order: Vec<u64>,
    candidates: usize,
    excluded: usize,
}

/// Statistics from the bucketing phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketStats {
    /// Candidates offered to the bucketer
    pub candidates: usize,
    /// Candidates accepted into a bucket
    pub inserted: usize,
    /// Candidates rejected by the size bounds
    pub excluded: usize,
    /// Number of distinct size buckets
    pub buckets: usize,
}

impl SizeBuckets {
    /// Create an empty set of buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate to the bucket keyed by its size, iff
    /// `min_size < size < max_size`. Both bounds are exclusive: a file whose
    /// size equals either bound is rejected.
    ///
    /// Returns whether the candidate was accepted.
    pub fn insert(&mut self, file: CandidateFile, min_size: u64, max_size: u64) -> bool {
        self.candidates += 1;

        if file.size() <= min_size || file.size() >= max_size {
            log::trace!(
                "outside size bounds, skipping: {} ({} bytes)",
                file.path().display(),
                file.size()
            );
            self.excluded += 1;
            return false;
        }

        match self.buckets.entry(file.size()) {
            Entry::Occupied(mut bucket) => bucket.get_mut().push(file),
            Entry::Vacant(slot) => {
                self.order.push(*slot.key());
                slot.insert(vec![file]);
            }
        }
        true
    }

    /// Number of distinct size buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no candidate was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The bucket for an exact size, if any candidate of that size was
    /// accepted.
    #[must_use]
    pub fn get(&self, size: u64) -> Option<&[CandidateFile]> {
        self.buckets.get(&size).map(Vec::as_slice)
    }

    /// Statistics over everything inserted so far.
    #[must_use]
    pub fn stats(&self) -> BucketStats {
        BucketStats {
            candidates: self.candidates,
            inserted: self.candidates - self.excluded,
            excluded: self.excluded,
            buckets: self.order.len(),
        }
    }

    /// Consume the bucketer, yielding buckets in first-insertion order with
    /// each bucket's files in insertion order.
    #[must_use]
    pub fn into_buckets(mut self) -> Vec<Vec<CandidateFile>> {
        self.order
            .iter()
            .filter_map(|size| self.buckets.remove(size))
            .collect()
    }
}
