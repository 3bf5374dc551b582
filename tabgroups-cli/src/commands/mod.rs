//! Command handler modules for the CLI.

mod completions;
mod group;
mod normalize;
mod palette;
mod show;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Show { file, format } => show::cmd_show(config_path, &file, format),
        Commands::Normalize { file, output } => {
            normalize::cmd_normalize(config_path, &file, output.as_deref())
        }
        Commands::Group(subcmd) => group::cmd_group(config_path, subcmd),
        Commands::Palette { format } => palette::cmd_palette(format),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
