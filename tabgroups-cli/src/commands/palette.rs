//! Predefined color listing.

use serde::Serialize;
use tabgroups_core::GroupColorType;

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Serialize)]
struct PaletteEntry {
    name: String,
    hex: String,
}

fn entries() -> Vec<PaletteEntry> {
    GroupColorType::PREDEFINED
        .iter()
        .filter_map(|color_type| {
            color_type.color().map(|color| PaletteEntry {
                name: color_type.label().to_lowercase(),
                hex: color.to_hex(),
            })
        })
        .collect()
}

/// Prints the predefined palette.
pub fn cmd_palette(format: OutputFormat) -> Result<(), CliError> {
    let entries = entries();
    match format {
        OutputFormat::Table => {
            println!("{:<8}  HEX", "NAME");
            println!("{:-<8}  {:-<9}", "", "");
            for entry in &entries {
                println!("{:<8}  {}", entry.name, entry.hex);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::Arrangement(format!("Failed to serialize: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
