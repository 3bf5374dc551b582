//! Show command: print a saved window's tabs and groups.

use std::path::Path;

use serde::Serialize;
use tabgroups_core::{TerminalWindow, name_for_color};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_settings, load_window};

#[derive(Debug, Serialize)]
struct TabView {
    index: usize,
    guid: String,
    title: String,
    group: Option<String>,
    group_guid: Option<String>,
    hidden: bool,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct GroupView {
    guid: String,
    name: String,
    color: Option<String>,
    color_name: &'static str,
    collapsed: bool,
    tabs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct WindowView {
    tabs: Vec<TabView>,
    groups: Vec<GroupView>,
}

fn window_view(window: &TerminalWindow) -> WindowView {
    let manager = window.manager();
    let tabs = window
        .strip()
        .tabs()
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let group = manager.group_for_tab(tab.id());
            TabView {
                index,
                guid: tab.id().as_uuid().to_string(),
                title: tab.title().to_string(),
                group: group.map(|g| g.name.clone()),
                group_guid: group.map(|g| g.id().as_uuid().to_string()),
                hidden: !manager.is_tab_visible(tab.id()),
                selected: window.selected_tab() == Some(tab.id()),
            }
        })
        .collect();
    let groups = manager
        .groups()
        .iter()
        .map(|group| GroupView {
            guid: group.id().as_uuid().to_string(),
            name: group.name.clone(),
            color: group.color.map(|c| c.to_hex()),
            color_name: name_for_color(group.color),
            collapsed: group.is_collapsed(),
            tabs: group
                .tabs()
                .iter()
                .map(|tab| tab.as_uuid().to_string())
                .collect(),
        })
        .collect();
    WindowView { tabs, groups }
}

/// Show command handler
pub fn cmd_show(
    config_path: Option<&Path>,
    file: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let settings = load_settings(config_path)?;
    let window = load_window(file, settings)?;
    let view = window_view(&window);

    match format {
        OutputFormat::Table => print_table(&view),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view)
                .map_err(|e| CliError::Arrangement(format!("Failed to serialize: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

fn print_table(view: &WindowView) {
    if view.tabs.is_empty() {
        println!("No tabs.");
        return;
    }

    let title_width = view
        .tabs
        .iter()
        .map(|t| t.title.len())
        .max()
        .unwrap_or(5)
        .max(5);
    let group_width = view
        .tabs
        .iter()
        .filter_map(|t| t.group.as_ref().map(String::len))
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "  {:<3}  {:<title_width$}  {:<group_width$}  {:<7}  GUID",
        "#", "TITLE", "GROUP", "STATE"
    );
    println!(
        "  {:-<3}  {:-<title_width$}  {:-<group_width$}  {:-<7}  {:-<36}",
        "", "", "", "", ""
    );
    for tab in &view.tabs {
        let marker = if tab.selected { '>' } else { ' ' };
        let state = if tab.hidden { "hidden" } else { "visible" };
        println!(
            "{marker} {:<3}  {:<title_width$}  {:<group_width$}  {:<7}  {}",
            tab.index,
            tab.title,
            tab.group.as_deref().unwrap_or("-"),
            state,
            tab.guid
        );
    }

    if view.groups.is_empty() {
        return;
    }

    let name_width = view
        .groups
        .iter()
        .map(|g| g.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!();
    println!(
        "{:<name_width$}  {:<7}  {:<9}  {:<4}  GUID",
        "NAME", "COLOR", "STATE", "TABS"
    );
    println!(
        "{:-<name_width$}  {:-<7}  {:-<9}  {:-<4}  {:-<36}",
        "", "", "", "", ""
    );
    for group in &view.groups {
        let state = if group.collapsed {
            "collapsed"
        } else {
            "expanded"
        };
        println!(
            "{:<name_width$}  {:<7}  {:<9}  {:<4}  {}",
            group.name,
            group.color_name,
            state,
            group.tabs.len(),
            group.guid
        );
    }
}
