//! Entry point for the dupescan CLI.

use clap::Parser;
use dupescan::{cli::Cli, logging};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match dupescan::run_app(cli) {
        Ok(stats) => {
            log::debug!(
                "completed: {} group(s), {} duplicate file(s)",
                stats.resolve.groups,
                stats.resolve.duplicate_files
            );
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
