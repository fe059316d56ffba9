//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based bucketing (only same-size files can be content-duplicates)
//! - Per-bucket pairwise resolution with lazy two-tier fingerprints
//! - Streaming emission of duplicate groups as they are found

pub mod buckets;
pub mod resolver;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytesize::ByteSize;

use crate::report::Reporter;
use crate::scanner::{FileEntry, FileId, FullFingerprint, HashError, Hasher, PartialFingerprint};

pub use buckets::{BucketStats, SizeBuckets};
pub use resolver::{resolve_bucket, ResolveStats};

/// One file under consideration, with lazily cached fingerprints.
///
/// The size is recorded once at discovery time and stays authoritative for
/// bucketing even if the file changes on disk afterwards. Each fingerprint
/// is computed at most once, on first demand, and never recomputed.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    path: PathBuf,
    size: u64,
    file_id: Option<FileId>,
    partial: Option<PartialFingerprint>,
    full: Option<FullFingerprint>,
    resolved: bool,
}

impl From<FileEntry> for CandidateFile {
    fn from(entry: FileEntry) -> Self {
        Self {
            path: entry.path,
            size: entry.size,
            file_id: entry.file_id,
            partial: None,
            full: None,
            resolved: false,
        }
    }
}

impl CandidateFile {
    /// Create a candidate without an on-disk identity (tests mostly;
    /// discovery goes through [`FileEntry`]).
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self::from(FileEntry::new(path, size))
    }

    /// Path as discovered.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte size recorded at discovery time.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// True once this file has been matched against the rest of its bucket
    /// (or claimed by another file's equivalence class).
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    fn mark_resolved(&mut self) {
        self.resolved = true;
    }

    /// Do the two entries denote the same underlying file?
    ///
    /// True for identical paths and, where the platform exposes file
    /// identities, for hardlinks and doubly enumerated paths.
    fn aliases(&self, other: &Self) -> bool {
        if self.path == other.path {
            return true;
        }
        match (self.file_id, other.file_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Fingerprint of the file's first 64 KiB, computed on first call and
    /// cached for the lifetime of the candidate.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file cannot be opened or read.
    pub fn partial_fingerprint(
        &mut self,
        hasher: &mut Hasher,
    ) -> Result<PartialFingerprint, HashError> {
        if let Some(hash) = self.partial {
            return Ok(hash);
        }
        let hash = hasher.partial_hash(&self.path)?;
        self.partial = Some(hash);
        Ok(hash)
    }

    /// Fingerprint of the entire content, computed on first call and cached
    /// for the lifetime of the candidate.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file cannot be opened or read.
    pub fn full_fingerprint(
        &mut self,
        hasher: &mut Hasher,
    ) -> Result<FullFingerprint, HashError> {
        if let Some(hash) = self.full {
            return Ok(hash);
        }
        let hash = hasher.full_hash(&self.path)?;
        self.full = Some(hash);
        Ok(hash)
    }
}

/// Combined statistics from one full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Bucketing statistics
    pub buckets: BucketStats,
    /// Resolution statistics across all buckets
    pub resolve: ResolveStats,
}

/// Run-to-completion entry point: bucket every candidate, resolve every
/// bucket, and stream duplicate groups to `out` as they are found.
///
/// Buckets are processed in first-discovery order, so output is identical
/// across runs given the same candidate order. Per-file I/O failures are
/// logged and skipped; only write failures of `out` propagate.
///
/// # Errors
///
/// Returns an error if the output stream cannot be written.
pub fn process_all<W: Write>(
    candidates: Vec<FileEntry>,
    min_size: u64,
    max_size: u64,
    out: W,
) -> io::Result<ProcessStats> {
    let mut buckets = SizeBuckets::new();
    for entry in candidates {
        buckets.insert(CandidateFile::from(entry), min_size, max_size);
    }

    let bucket_stats = buckets.stats();
    log::info!(
        "{} candidate file(s) in {} size bucket(s), {} outside {}..{}",
        bucket_stats.inserted,
        bucket_stats.buckets,
        bucket_stats.excluded,
        ByteSize::b(min_size),
        ByteSize::b(max_size),
    );

    let mut hasher = Hasher::new();
    let mut reporter = Reporter::new(out);
    let mut resolve_stats = ResolveStats::default();

    for mut bucket in buckets.into_buckets() {
        let stats = resolve_bucket(&mut bucket, &mut hasher, &mut reporter)?;
        resolve_stats.merge(stats);
    }
    reporter.flush()?;

    log::info!(
        "{} duplicate group(s), {} redundant file(s) ({} partial / {} full fingerprints computed)",
        resolve_stats.groups,
        resolve_stats.duplicate_files,
        hasher.partial_hashes(),
        hasher.full_hashes(),
    );

    Ok(ProcessStats {
        buckets: bucket_stats,
        resolve: resolve_stats,
    })
}
