//! Scanner module for candidate discovery and content fingerprinting.
//!
//! This module provides functionality for:
//! - Expanding path arguments (directories, files, wildcard patterns)
//!   into candidate files
//! - Two-tier content fingerprinting (prefix prefilter + full digest)
//! - On-disk file identity, used to exclude hardlink self-matches
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: path-argument expansion and directory traversal
//! - [`hasher`]: partial and full content fingerprints (streaming)

pub mod hasher;
pub mod walker;

use std::fs::Metadata;
use std::path::PathBuf;

// Re-export main types
pub use hasher::{FullFingerprint, Hasher, PartialFingerprint, PARTIAL_HASH_SIZE};
pub use walker::{collect_candidates, wildcard_match};

/// On-disk identity of a file, independent of the path used to reach it.
///
/// Two directory entries with equal `FileId`s denote the same underlying
/// file (a hardlink or a doubly enumerated path), which must never be
/// reported as a duplicate of itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    dev: u64,
    ino: u64,
}

impl FileId {
    /// Extract the identity from file metadata.
    ///
    /// Returns `None` on platforms without a usable device/inode pair;
    /// self-match detection then falls back to path equality.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }
}

/// Metadata for a discovered candidate file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path as discovered
    pub path: PathBuf,
    /// File size in bytes, read once at discovery time
    pub size: u64,
    /// On-disk identity, where the platform exposes one
    pub file_id: Option<FileId>,
}

impl FileEntry {
    /// Create a new entry without an on-disk identity.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            file_id: None,
        }
    }

    /// Create an entry from a path and its metadata.
    #[must_use]
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        Self {
            size: metadata.len(),
            file_id: FileId::from_metadata(metadata),
            path,
        }
    }
}

/// Errors that can occur while expanding path arguments.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path exists but is not a regular file.
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    /// An I/O error occurred while accessing a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Errors that can occur while fingerprinting a file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
