//! Group management commands.
//!
//! Each command restores the window from the file, applies one window
//! command, and writes the result back in place.

use std::path::Path;

use tabgroups_core::{GroupId, TabGroup, TabId, TerminalWindow, name_for_color};

use crate::cli::GroupCommands;
use crate::error::CliError;
use crate::util::{find_group, load_settings, load_window, parse_color_arg, resolve_tab, save_window};

/// Group command handler
pub fn cmd_group(config_path: Option<&Path>, subcmd: GroupCommands) -> Result<(), CliError> {
    match subcmd {
        GroupCommands::Create {
            file,
            name,
            color,
            tabs,
        } => cmd_group_create(config_path, &file, name.as_deref(), color.as_deref(), &tabs),
        GroupCommands::Remove { file, group } => cmd_group_remove(config_path, &file, &group),
        GroupCommands::Close { file, group } => cmd_group_close(config_path, &file, &group),
        GroupCommands::Collapse { file, group } => {
            cmd_group_collapse(config_path, &file, &group, CollapseAction::Collapse)
        }
        GroupCommands::Expand { file, group } => {
            cmd_group_collapse(config_path, &file, &group, CollapseAction::Expand)
        }
        GroupCommands::Toggle { file, group } => {
            cmd_group_collapse(config_path, &file, &group, CollapseAction::Toggle)
        }
        GroupCommands::Rename { file, group, name } => {
            cmd_group_rename(config_path, &file, &group, &name)
        }
        GroupCommands::Color { file, group, color } => {
            cmd_group_color(config_path, &file, &group, &color)
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CollapseAction {
    Collapse,
    Expand,
    Toggle,
}

fn open(config_path: Option<&Path>, file: &Path) -> Result<TerminalWindow, CliError> {
    let settings = load_settings(config_path)?;
    load_window(file, settings)
}

fn lookup(window: &TerminalWindow, name_or_id: &str) -> Result<(GroupId, String), CliError> {
    let group = find_group(window.manager(), name_or_id)?;
    Ok((group.id(), group.name.clone()))
}

fn cmd_group_create(
    config_path: Option<&Path>,
    file: &Path,
    name: Option<&str>,
    color: Option<&str>,
    tab_args: &[String],
) -> Result<(), CliError> {
    if let Some(name) = name
        && name.trim().is_empty()
    {
        return Err(CliError::Group("Group name cannot be empty".to_string()));
    }
    let color = color.map(parse_color_arg).transpose()?;

    let mut window = open(config_path, file)?;
    let mut tabs: Vec<TabId> = Vec::with_capacity(tab_args.len());
    for arg in tab_args {
        let tab = resolve_tab(&window, arg)?;
        if !tabs.contains(&tab) {
            tabs.push(tab);
        }
    }

    let id = window.create_group_with_tabs(&tabs, name, color.flatten());
    if color == Some(None) {
        window.change_color_of_tab_group(id, Some(None));
    }
    save_window(&window, file)?;

    if let Some(group) = window.manager().group_with_id(id) {
        println!(
            "Created group '{}' ({}) with {} tab(s), color {}",
            group.name,
            id.as_uuid(),
            group.tab_count(),
            name_for_color(group.color)
        );
    }
    Ok(())
}

fn cmd_group_remove(config_path: Option<&Path>, file: &Path, group: &str) -> Result<(), CliError> {
    let mut window = open(config_path, file)?;
    let (id, name) = lookup(&window, group)?;
    window.ungroup_tab_group(id);
    save_window(&window, file)?;
    println!("Removed group '{name}', its tabs stay open");
    Ok(())
}

fn cmd_group_close(config_path: Option<&Path>, file: &Path, group: &str) -> Result<(), CliError> {
    let mut window = open(config_path, file)?;
    let (id, name) = lookup(&window, group)?;
    let closed = window.close_tab_group(id);
    save_window(&window, file)?;
    println!("Closed group '{name}' and {closed} tab(s)");
    Ok(())
}

fn cmd_group_collapse(
    config_path: Option<&Path>,
    file: &Path,
    group: &str,
    action: CollapseAction,
) -> Result<(), CliError> {
    let mut window = open(config_path, file)?;
    let (id, name) = lookup(&window, group)?;
    match action {
        CollapseAction::Collapse => window.collapse_tab_group(id),
        CollapseAction::Expand => window.expand_tab_group(id),
        CollapseAction::Toggle => window.toggle_collapse_tab_group(id),
    }
    save_window(&window, file)?;

    let collapsed = window
        .manager()
        .group_with_id(id)
        .is_some_and(TabGroup::is_collapsed);
    let state = if collapsed { "collapsed" } else { "expanded" };
    println!("Group '{name}' is {state}");
    Ok(())
}

fn cmd_group_rename(
    config_path: Option<&Path>,
    file: &Path,
    group: &str,
    new_name: &str,
) -> Result<(), CliError> {
    if new_name.trim().is_empty() {
        return Err(CliError::Group("Group name cannot be empty".to_string()));
    }
    let mut window = open(config_path, file)?;
    let (id, old_name) = lookup(&window, group)?;
    window.rename_tab_group(id, Some(new_name));
    save_window(&window, file)?;

    let renamed = window
        .manager()
        .group_with_id(id)
        .map_or_else(|| new_name.to_string(), |g| g.name.clone());
    println!("Renamed group '{old_name}' to '{renamed}'");
    Ok(())
}

fn cmd_group_color(
    config_path: Option<&Path>,
    file: &Path,
    group: &str,
    color: &str,
) -> Result<(), CliError> {
    let color = parse_color_arg(color)?;
    let mut window = open(config_path, file)?;
    let (id, name) = lookup(&window, group)?;
    window.change_color_of_tab_group(id, Some(color));
    save_window(&window, file)?;
    println!("Group '{name}' color is now {}", name_for_color(color));
    Ok(())
}
