//! Two-tier content fingerprinting with streaming support.
//!
//! # Overview
//!
//! Duplicate detection never needs to read most files in full. The
//! [`Hasher`] provides two fingerprints per file:
//!
//! - **Partial**: a BLAKE3 digest of the first [`PARTIAL_HASH_SIZE`] bytes.
//!   Cheap prefilter; two files whose partial fingerprints differ cannot
//!   have identical content.
//! - **Full**: a SHA-256 digest of the entire content, streamed in
//!   [`PARTIAL_HASH_SIZE`] chunks. Authoritative equality test.
//!
//! Both fingerprints are deterministic: the same bytes always produce the
//! same digest, in any run. The hasher owns a single reusable read buffer
//! shared by both operations, and counts how many fingerprints of each kind
//! it has computed so callers can verify that hashing only happens on
//! demand.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::HashError;

/// Number of bytes covered by the partial fingerprint. Also used as the
/// chunk size when streaming the full fingerprint.
pub const PARTIAL_HASH_SIZE: usize = 64 * 1024;

/// Digest of the first [`PARTIAL_HASH_SIZE`] bytes of a file (BLAKE3).
pub type PartialFingerprint = [u8; 32];

/// Digest of the entire file content (SHA-256).
pub type FullFingerprint = [u8; 32];

/// Streaming file hasher with a reusable scratch buffer.
#[derive(Debug)]
pub struct Hasher {
    buf: Vec<u8>,
    partial_hashes: u64,
    full_hashes: u64,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a new hasher with a [`PARTIAL_HASH_SIZE`] scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; PARTIAL_HASH_SIZE],
            partial_hashes: 0,
            full_hashes: 0,
        }
    }

    /// Number of partial fingerprints computed so far.
    #[must_use]
    pub fn partial_hashes(&self) -> u64 {
        self.partial_hashes
    }

    /// Number of full fingerprints computed so far.
    #[must_use]
    pub fn full_hashes(&self) -> u64 {
        self.full_hashes
    }

    /// Compute the partial fingerprint of `path`.
    ///
    /// Reads up to [`PARTIAL_HASH_SIZE`] bytes from the start of the file
    /// and hashes exactly the bytes read. For files shorter than the window
    /// the digest therefore covers the whole file, which is safe: a partial
    /// match is never taken as proof of equality on its own.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file cannot be opened or read.
    pub fn partial_hash(&mut self, path: &Path) -> Result<PartialFingerprint, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let read = read_up_to(&mut file, &mut self.buf).map_err(|e| HashError::from_io(path, e))?;

        self.partial_hashes += 1;
        log::trace!("partial fingerprint ({} bytes): {}", read, path.display());
        Ok(*blake3::hash(&self.buf[..read]).as_bytes())
    }

    /// Compute the full-content fingerprint of `path`.
    ///
    /// Streams the entire file through an incremental SHA-256 digest in
    /// [`PARTIAL_HASH_SIZE`] chunks; the file is never held in memory whole.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&mut self, path: &Path) -> Result<FullFingerprint, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut digest = Sha256::new();

        loop {
            match file.read(&mut self.buf) {
                Ok(0) => break,
                Ok(n) => digest.update(&self.buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(HashError::from_io(path, e)),
            }
        }

        self.full_hashes += 1;
        log::trace!("full fingerprint: {}", path.display());
        Ok(digest.finalize().into())
    }
}

/// Read from `file` until `buf` is full or the file is exhausted.
fn read_up_to(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_partial_hash_short_file_covers_whole_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bin");
        fs::write(&path, b"tiny content").unwrap();

        let mut hasher = Hasher::new();
        let partial = hasher.partial_hash(&path).unwrap();

        assert_eq!(partial, *blake3::hash(b"tiny content").as_bytes());
    }

    #[test]
    fn test_partial_hash_reads_only_window() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");

        // Identical first 64 KiB, different tails
        let mut content_a = vec![0xAB; PARTIAL_HASH_SIZE + 10];
        let mut content_b = content_a.clone();
        content_a[PARTIAL_HASH_SIZE + 5] = 1;
        content_b[PARTIAL_HASH_SIZE + 5] = 2;
        fs::write(&a, &content_a).unwrap();
        fs::write(&b, &content_b).unwrap();

        let mut hasher = Hasher::new();
        assert_eq!(
            hasher.partial_hash(&a).unwrap(),
            hasher.partial_hash(&b).unwrap()
        );
        assert_ne!(hasher.full_hash(&a).unwrap(), hasher.full_hash(&b).unwrap());
    }

    #[test]
    fn test_full_hash_matches_reference_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let content = vec![0x5A; PARTIAL_HASH_SIZE * 2 + 123];
        fs::write(&path, &content).unwrap();

        let mut hasher = Hasher::new();
        let full = hasher.full_hash(&path).unwrap();

        let expected: FullFingerprint = Sha256::digest(&content).into();
        assert_eq!(full, expected);
    }

    #[test]
    fn test_full_hash_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        let mut hasher = Hasher::new();
        let full = hasher.full_hash(&path).unwrap();
        let expected: FullFingerprint = Sha256::digest(b"").into();
        assert_eq!(full, expected);
    }

    #[test]
    fn test_hash_counters_track_computed_fingerprints() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.bin");
        fs::write(&path, b"abc").unwrap();

        let mut hasher = Hasher::new();
        assert_eq!(hasher.partial_hashes(), 0);
        assert_eq!(hasher.full_hashes(), 0);

        hasher.partial_hash(&path).unwrap();
        hasher.partial_hash(&path).unwrap();
        hasher.full_hash(&path).unwrap();

        assert_eq!(hasher.partial_hashes(), 2);
        assert_eq!(hasher.full_hashes(), 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.bin");

        let mut hasher = Hasher::new();
        assert!(matches!(
            hasher.partial_hash(&path),
            Err(HashError::NotFound(_))
        ));
        assert!(matches!(
            hasher.full_hash(&path),
            Err(HashError::NotFound(_))
        ));
    }
}
