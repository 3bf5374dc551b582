//! `tabgroups-cli` - command-line tool for saved terminal tab groups
//!
//! Loads a saved window arrangement, restores it through the tab group
//! library, and prints or edits its groups.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use tabgroups_core::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::from_verbosity(cli.verbose)
    };
    if let Err(e) = init_tracing(&TracingConfig::new().with_level(level)) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
