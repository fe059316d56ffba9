//! Per-bucket pairwise duplicate resolution.
//!
//! # Overview
//!
//! Within one size bucket, every unresolved file in turn acts as the
//! *anchor* of a potential equivalence class. The anchor is compared
//! against the remaining unresolved files in bucket order: first by the
//! cheap partial fingerprint and, only when that matches, by the
//! full-content fingerprint. Files matching on both are collected into the
//! anchor's class and marked resolved, so each file belongs to at most one
//! class and each class is printed exactly once. Classes with two or more
//! members are emitted immediately, anchor first.
//!
//! Fingerprints are computed strictly on demand: the anchor's partial is
//! first read at its first comparison, its full only at its first partial
//! match. A file alone in its bucket is never read at all.

use std::io::{self, Write};

use crate::report::Reporter;
use crate::scanner::{FullFingerprint, Hasher, PartialFingerprint};

use super::CandidateFile;

/// Statistics from resolving one or more buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Equivalence classes emitted (size >= 2)
    pub groups: usize,
    /// Files reported as duplicates of an anchor
    pub duplicate_files: usize,
    /// Files dropped after an I/O failure
    pub failed_files: usize,
}

impl ResolveStats {
    /// Fold another bucket's statistics into this one.
    pub fn merge(&mut self, other: ResolveStats) {
        self.groups += other.groups;
        self.duplicate_files += other.duplicate_files;
        self.failed_files += other.failed_files;
    }
}

/// Resolve one size bucket, emitting every equivalence class of two or more
/// content-identical files through `reporter`.
///
/// Per-file I/O failures are logged as warnings and the affected file drops
/// out of the bucket without joining any class; the rest of the bucket is
/// still processed. Entries denoting the same underlying file (hardlinks,
/// doubly enumerated paths) are never compared against each other.
///
/// # Errors
///
/// Only write failures of the output stream propagate.
pub fn resolve_bucket<W: Write>(
    files: &mut [CandidateFile],
    hasher: &mut Hasher,
    reporter: &mut Reporter<W>,
) -> io::Result<ResolveStats> {
    let mut stats = ResolveStats::default();

    for anchor in 0..files.len() {
        if files[anchor].is_resolved() {
            continue;
        }

        // The anchor's fingerprints are copied out of the slice on first
        // use, so the scan below can borrow other entries mutably.
        let mut anchor_partial: Option<PartialFingerprint> = None;
        let mut anchor_full: Option<FullFingerprint> = None;
        let mut matched: Vec<usize> = Vec::new();

        'scan: for other in 0..files.len() {
            if other == anchor || files[other].is_resolved() {
                continue;
            }
            if files[anchor].aliases(&files[other]) {
                log::debug!(
                    "{} and {} are the same file, not comparing",
                    files[anchor].path().display(),
                    files[other].path().display()
                );
                continue;
            }

            let a_partial = match anchor_partial {
                Some(hash) => hash,
                None => match files[anchor].partial_fingerprint(hasher) {
                    Ok(hash) => {
                        anchor_partial = Some(hash);
                        hash
                    }
                    Err(e) => {
                        log::warn!("skipping unreadable file: {e}");
                        stats.failed_files += 1;
                        break 'scan;
                    }
                },
            };

            let o_partial = match files[other].partial_fingerprint(hasher) {
                Ok(hash) => hash,
                Err(e) => {
                    log::warn!("skipping unreadable file: {e}");
                    files[other].mark_resolved();
                    stats.failed_files += 1;
                    continue;
                }
            };
            if o_partial != a_partial {
                continue;
            }

            let a_full = match anchor_full {
                Some(hash) => hash,
                None => match files[anchor].full_fingerprint(hasher) {
                    Ok(hash) => {
                        anchor_full = Some(hash);
                        hash
                    }
                    Err(e) => {
                        log::warn!("skipping unreadable file: {e}");
                        stats.failed_files += 1;
                        break 'scan;
                    }
                },
            };

            let o_full = match files[other].full_fingerprint(hasher) {
                Ok(hash) => hash,
                Err(e) => {
                    log::warn!("skipping unreadable file: {e}");
                    files[other].mark_resolved();
                    stats.failed_files += 1;
                    continue;
                }
            };

            if o_full == a_full {
                files[other].mark_resolved();
                matched.push(other);
            }
        }

        files[anchor].mark_resolved();

        if !matched.is_empty() {
            let mut group = Vec::with_capacity(matched.len() + 1);
            group.push(files[anchor].path());
            group.extend(matched.iter().map(|&idx| files[idx].path()));
            reporter.emit_group(&group)?;
            stats.groups += 1;
            stats.duplicate_files += matched.len();
        }
    }

    Ok(stats)
}
