//! Arrangement repair.

use std::path::Path;

use crate::error::CliError;
use crate::util::{load_settings, load_window, save_window};

/// Restores a saved window and writes it back.
///
/// Restoring drops unknown tabs from groups, resolves tabs claimed by more
/// than one group, and pulls every group into one block, so the written file
/// is always consistent.
pub fn cmd_normalize(
    config_path: Option<&Path>,
    file: &Path,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let settings = load_settings(config_path)?;
    let window = load_window(file, settings)?;
    let target = output.unwrap_or(file);
    save_window(&window, target)?;

    println!(
        "Wrote {} tab(s) in {} group(s) to {}",
        window.strip().len(),
        window.manager().group_count(),
        target.display()
    );
    Ok(())
}
