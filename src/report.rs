//! Duplicate group report emission.
//!
//! Output is nothing but the groups themselves: one path per line, one
//! blank line after each group. No header, no summary, no trailing count --
//! summary information belongs in the log, never on stdout.

use std::io::{self, Write};
use std::path::Path;

/// Writes duplicate groups as path listings separated by blank lines.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    groups: usize,
    files: usize,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            groups: 0,
            files: 0,
        }
    }

    /// Write one equivalence class, in the order given, followed by a blank
    /// separator line. Callers only pass classes of two or more files; a
    /// file with no duplicate produces no output at all.
    ///
    /// # Errors
    ///
    /// Propagates write failures of the underlying stream.
    pub fn emit_group(&mut self, paths: &[&Path]) -> io::Result<()> {
        debug_assert!(paths.len() >= 2, "groups of fewer than two files are never emitted");
        for path in paths {
            writeln!(self.out, "{}", path.display())?;
        }
        writeln!(self.out)?;

        self.groups += 1;
        self.files += paths.len();
        Ok(())
    }

    /// Flush the underlying stream.
    ///
    /// # Errors
    ///
    /// Propagates flush failures of the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Number of groups emitted so far.
    #[must_use]
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Number of files listed across all emitted groups.
    #[must_use]
    pub fn files(&self) -> usize {
        self.files
    }

    /// Consume the reporter, returning the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_emit_group_exact_bytes() {
        let mut reporter = Reporter::new(Vec::new());
        let a = PathBuf::from("/data/a.txt");
        let b = PathBuf::from("/data/b.txt");
        reporter.emit_group(&[&a, &b]).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "/data/a.txt\n/data/b.txt\n\n");
    }

    #[test]
    fn test_groups_separated_by_blank_line() {
        let mut reporter = Reporter::new(Vec::new());
        let a = PathBuf::from("a");
        let b = PathBuf::from("b");
        let c = PathBuf::from("c");
        let d = PathBuf::from("d");
        reporter.emit_group(&[&a, &b]).unwrap();
        reporter.emit_group(&[&c, &d]).unwrap();

        assert_eq!(reporter.groups(), 2);
        assert_eq!(reporter.files(), 4);

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "a\nb\n\nc\nd\n\n");
    }

    #[test]
    fn test_order_is_preserved() {
        let mut reporter = Reporter::new(Vec::new());
        let later = PathBuf::from("/z/seen-first");
        let earlier = PathBuf::from("/a/seen-second");
        reporter.emit_group(&[&later, &earlier]).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        // Discovery order, not lexicographic order
        assert_eq!(output, "/z/seen-first\n/a/seen-second\n\n");
    }
}
