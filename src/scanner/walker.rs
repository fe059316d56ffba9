//! Path-argument expansion into candidate files.
//!
//! # Overview
//!
//! Each positional command-line argument is expanded into a flat list of
//! `(path, size)` candidates:
//!
//! - **Directory**: recursively walked; every regular file is a candidate.
//! - **Literal file path** (no `*` or `?` in the filename): that single
//!   file is a candidate.
//! - **Wildcard pattern**: the parent directory is recursively walked and
//!   filenames are matched against the pattern.
//!
//! Entries that cannot be read during a walk are logged and skipped; only
//! an argument that cannot be expanded at all is an error.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Expand all path arguments into a single candidate list, in argument
/// order and, within each argument, in traversal order.
///
/// # Errors
///
/// Returns the first [`ScanError`] produced by an argument that cannot be
/// expanded (missing file, unreadable parent directory). Per-entry failures
/// inside a walk are logged as warnings and skipped instead.
pub fn collect_candidates(args: &[PathBuf]) -> Result<Vec<FileEntry>, ScanError> {
    let mut candidates = Vec::new();
    for arg in args {
        let entries = expand_argument(arg)?;
        log::debug!("{}: {} candidate file(s)", arg.display(), entries.len());
        candidates.extend(entries);
    }
    Ok(candidates)
}

/// Expand one path argument (directory, literal file, or wildcard pattern).
///
/// # Errors
///
/// Returns a [`ScanError`] if a literal file argument cannot be stat'ed, is
/// not a regular file, or if a wildcard pattern's parent directory does not
/// exist.
pub fn expand_argument(arg: &Path) -> Result<Vec<FileEntry>, ScanError> {
    if arg.is_dir() {
        return Ok(walk_tree(arg, None));
    }

    let file_name = arg
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !file_name.contains(['*', '?']) {
        // Literal file path
        let metadata = fs::metadata(arg).map_err(|e| ScanError::from_io(arg, e))?;
        if !metadata.is_file() {
            return Err(ScanError::NotAFile(arg.to_path_buf()));
        }
        return Ok(vec![FileEntry::from_metadata(arg.to_path_buf(), &metadata)]);
    }

    // Wildcard pattern: walk the parent directory, matching filenames
    let parent = match arg.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.is_dir() {
        return Err(ScanError::NotFound(parent));
    }
    Ok(walk_tree(&parent, Some(&file_name)))
}

/// Recursively walk `root`, collecting regular files. With a pattern, only
/// filenames matching it are kept.
fn walk_tree(root: &Path, pattern: Option<&str>) -> Vec<FileEntry> {
    let mut entries = Vec::new();
    for item in WalkDir::new(root) {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                log::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !item.file_type().is_file() {
            continue;
        }
        if let Some(pattern) = pattern {
            let name = item.file_name().to_string_lossy();
            if !wildcard_match(&name, pattern) {
                continue;
            }
        }
        match item.metadata() {
            Ok(metadata) => entries.push(FileEntry::from_metadata(item.into_path(), &metadata)),
            Err(e) => log::warn!("skipping {}: {}", item.path().display(), e),
        }
    }
    entries
}

/// Match `name` against a filename pattern where `*` matches any run of
/// characters (including none) and `?` matches exactly one character.
///
/// # Examples
///
/// ```
/// use dupescan::scanner::wildcard_match;
///
/// assert!(wildcard_match("arara.qbtheme", "*.qbtheme"));
/// assert!(wildcard_match("arara.qbtheme", "*"));
/// assert!(!wildcard_match("arara.qbtheme", "*.qb"));
/// assert!(wildcard_match("", ""));
/// ```
#[must_use]
pub fn wildcard_match(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let mut n = 0;
    let mut p = 0;
    // Position to restart from when a literal mismatch follows a '*'
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            n += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p + 1, n));
            p += 1;
        } else if let Some((bp, bn)) = backtrack {
            p = bp;
            n = bn + 1;
            backtrack = Some((bp, bn + 1));
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
