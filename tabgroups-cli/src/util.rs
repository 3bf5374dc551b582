//! Shared utility functions used across command modules.

use std::path::Path;

use tabgroups_core::{
    GroupColor, GroupId, TabGroup, TabGroupManager, TabGroupSettings, TabId, TerminalWindow,
    WindowArrangement, parse_color,
};

use crate::error::CliError;

/// Loads settings from the `--config` path, or from the default location.
///
/// A missing file or a platform without a config directory yields defaults.
pub fn load_settings(config_path: Option<&Path>) -> Result<TabGroupSettings, CliError> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match TabGroupSettings::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "No settings location, using defaults");
                return Ok(TabGroupSettings::default());
            }
        },
    };
    Ok(TabGroupSettings::load(&path)?)
}

/// Loads a saved window and restores it with the given settings.
pub fn load_window(file: &Path, settings: TabGroupSettings) -> Result<TerminalWindow, CliError> {
    let arrangement = WindowArrangement::load_from_file(file)?;
    tracing::debug!(
        path = %file.display(),
        tabs = arrangement.tabs.len(),
        groups = arrangement.tab_groups.len(),
        "Loaded window arrangement"
    );
    Ok(TerminalWindow::from_arrangement(&arrangement, settings))
}

/// Writes a window back to disk.
pub fn save_window(window: &TerminalWindow, file: &Path) -> Result<(), CliError> {
    window.arrangement().save_to_file(file)?;
    tracing::debug!(path = %file.display(), "Saved window arrangement");
    Ok(())
}

/// Find a group by GUID, exact name, or case-insensitive name
pub fn find_group<'a>(
    manager: &'a TabGroupManager,
    name_or_id: &str,
) -> Result<&'a TabGroup, CliError> {
    if let Some(id) = GroupId::parse(name_or_id)
        && let Some(group) = manager.group_with_id(id)
    {
        return Ok(group);
    }

    let groups = manager.groups();
    if let Some(group) = groups.iter().find(|g| g.name == name_or_id) {
        return Ok(group);
    }

    let matches: Vec<_> = groups
        .iter()
        .filter(|g| g.name.to_lowercase() == name_or_id.to_lowercase())
        .collect();
    match matches.as_slice() {
        [group] => Ok(*group),
        [] => Err(CliError::GroupNotFound(name_or_id.to_string())),
        _ => Err(CliError::Group(format!(
            "'{name_or_id}' matches {} groups, use the group GUID instead",
            matches.len()
        ))),
    }
}

/// Resolve a tab given by GUID or zero-based index in the saved order
pub fn resolve_tab(window: &TerminalWindow, guid_or_index: &str) -> Result<TabId, CliError> {
    let strip = window.strip();
    if let Some(id) = TabId::parse(guid_or_index)
        && strip.tab(id).is_some()
    {
        return Ok(id);
    }
    guid_or_index
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| strip.tab_at(index))
        .map(|tab| tab.id())
        .ok_or_else(|| CliError::TabNotFound(guid_or_index.to_string()))
}

/// Parse a color argument. `none` clears the color.
pub fn parse_color_arg(input: &str) -> Result<Option<GroupColor>, CliError> {
    if input.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_color(input.trim())
        .map(Some)
        .ok_or_else(|| CliError::InvalidColor(input.to_string()))
}
