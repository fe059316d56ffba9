//! dupescan - content-based duplicate file finder.
//!
//! Candidates are grouped by exact byte size, compared within each group
//! using a cheap prefix fingerprint followed by a full-content fingerprint,
//! and matching groups are printed one path per line with a blank line
//! after each group.

pub mod cli;
pub mod duplicates;
pub mod logging;
pub mod report;
pub mod scanner;

use std::io;

use anyhow::{Context, Result};

use cli::Cli;
use duplicates::ProcessStats;

/// Expand the path arguments, run duplicate detection, and stream groups
/// to stdout as they are found.
///
/// # Errors
///
/// Fails if a path argument cannot be expanded or stdout cannot be written.
/// Per-file errors during fingerprinting are logged and skipped instead.
pub fn run_app(cli: Cli) -> Result<ProcessStats> {
    let candidates = scanner::collect_candidates(&cli.paths)?;
    log::info!("discovered {} candidate file(s)", candidates.len());

    let stdout = io::stdout();
    let stats = duplicates::process_all(candidates, cli.min_size, cli.max_size, stdout.lock())
        .context("failed to write duplicate report")?;

    Ok(stats)
}
