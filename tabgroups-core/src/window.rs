//! Window-level tab group commands
//!
//! [`TerminalWindow`] bundles a [`TabStrip`], a [`TabGroupManager`] and the
//! current selection, and exposes the commands a terminal window offers
//! from its menus and shortcuts: grouping the selected tabs, collapsing,
//! cycling through visible tabs, and so on. It also owns the window's saved
//! form, [`WindowArrangement`], which embeds the group records next to the
//! tab list.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::arrangement::TabGroupArrangement;
use crate::color::{ColorRotation, GroupColor};
use crate::config::TabGroupSettings;
use crate::delegate::TabGroupDelegate;
use crate::error::{ArrangementError, ArrangementResult};
use crate::manager::TabGroupManager;
use crate::strip::TabStrip;
use crate::types::{GroupId, TabId};

/// Saved tab in a window arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    /// Tab GUID
    pub guid: String,
    /// Tab title
    #[serde(default)]
    pub title: String,
}

/// Saved state of one window: tabs, selection and tab groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowArrangement {
    /// Tabs in physical order
    #[serde(default)]
    pub tabs: Vec<TabRecord>,
    /// GUID of the selected tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_tab: Option<String>,
    /// When the arrangement was saved
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    /// Group records, stored under `tab_groups`
    #[serde(default)]
    pub tab_groups: TabGroupArrangement,
}

impl Default for WindowArrangement {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            selected_tab: None,
            saved_at: Utc::now(),
            tab_groups: TabGroupArrangement::default(),
        }
    }
}

impl WindowArrangement {
    /// Updates the `saved_at` timestamp
    pub fn touch(&mut self) {
        self.saved_at = Utc::now();
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ArrangementResult<String> {
        serde_json::to_string_pretty(self).map_err(ArrangementError::Serialization)
    }

    /// Parses JSON text.
    ///
    /// # Errors
    /// Returns an error if the JSON is invalid or the tab list is malformed.
    pub fn from_json(json: &str) -> ArrangementResult<Self> {
        serde_json::from_str(json).map_err(ArrangementError::Deserialization)
    }

    /// Saves to a file.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save_to_file(&self, path: &Path) -> ArrangementResult<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "Saved window arrangement");
        Ok(())
    }

    /// Loads from a file.
    ///
    /// # Errors
    /// Returns an error if reading or parsing fails.
    pub fn load_from_file(path: &Path) -> ArrangementResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// A terminal window with grouped tabs.
#[derive(Debug, Default)]
pub struct TerminalWindow {
    strip: TabStrip,
    manager: TabGroupManager,
    rotation: ColorRotation,
    selected: Option<TabId>,
    /// Multi-selection used by "group selected tabs"
    marked: Vec<TabId>,
}

impl TerminalWindow {
    /// Creates an empty window with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty window with the given settings.
    #[must_use]
    pub fn with_settings(settings: TabGroupSettings) -> Self {
        Self {
            manager: TabGroupManager::with_settings(settings),
            ..Self::default()
        }
    }

    /// The window's tab strip.
    #[must_use]
    pub const fn strip(&self) -> &TabStrip {
        &self.strip
    }

    /// The window's group manager.
    #[must_use]
    pub const fn manager(&self) -> &TabGroupManager {
        &self.manager
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &TabGroupSettings {
        self.manager.settings()
    }

    /// The selected tab.
    #[must_use]
    pub const fn selected_tab(&self) -> Option<TabId> {
        self.selected
    }

    /// Tabs marked for a multi-tab command.
    #[must_use]
    pub fn marked_tabs(&self) -> &[TabId] {
        &self.marked
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Opens a tab at the end of the strip and selects it.
    pub fn new_tab(&mut self, title: impl Into<String>) -> TabId {
        let index = self.strip.len();
        self.insert_tab(index, title)
    }

    /// Opens a tab at `index` and selects it. The tab starts ungrouped.
    pub fn insert_tab(&mut self, index: usize, title: impl Into<String>) -> TabId {
        let tab = self.strip.insert_tab(index, title);
        self.manager.tab_was_added(&mut self.strip, tab);
        self.selected = Some(tab);
        tab
    }

    /// Closes a tab. Returns `false` for unknown tabs.
    ///
    /// If the closed tab was selected, the visible tab that took its place
    /// (or the last visible tab) becomes selected.
    pub fn close_tab(&mut self, tab: TabId) -> bool {
        let Some(index) = self.strip.remove_tab(tab) else {
            return false;
        };
        self.marked.retain(|t| *t != tab);
        self.manager.tab_was_removed(&mut self.strip, tab);
        if self.selected == Some(tab) {
            let visible = self.manager.visible_tabs(&self.strip);
            self.selected = visible
                .iter()
                .copied()
                .find(|t| self.strip.index_of_tab(*t) >= Some(index))
                .or_else(|| visible.last().copied());
        }
        true
    }

    /// Selects a tab, expanding its group if the tab was hidden.
    pub fn select_tab(&mut self, tab: TabId) -> bool {
        if !self.strip.contains_tab(tab) {
            return false;
        }
        if !self.manager.is_tab_visible(tab)
            && let Some(group) = self.manager.group_for_tab(tab).map(|g| g.id())
        {
            self.manager.expand_group(&mut self.strip, group);
        }
        self.selected = Some(tab);
        true
    }

    /// Marks tabs for a multi-tab command. Unknown tabs are ignored.
    pub fn set_marked_tabs(&mut self, tabs: &[TabId]) {
        self.marked = tabs
            .iter()
            .copied()
            .filter(|tab| self.strip.contains_tab(*tab))
            .collect();
    }

    /// Moves the selection to the next visible tab, wrapping around.
    pub fn select_next_visible_tab(&mut self) -> Option<TabId> {
        self.step_selection(true)
    }

    /// Moves the selection to the previous visible tab, wrapping around.
    pub fn select_previous_visible_tab(&mut self) -> Option<TabId> {
        self.step_selection(false)
    }

    fn step_selection(&mut self, forward: bool) -> Option<TabId> {
        let visible = self.manager.visible_tabs(&self.strip);
        let count = visible.len();
        if count == 0 {
            return None;
        }
        let current = self
            .selected
            .and_then(|selected| visible.iter().position(|t| *t == selected));
        let index = match (current, forward) {
            (Some(pos), true) => (pos + 1) % count,
            (Some(pos), false) => (pos + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        let tab = visible[index];
        self.selected = Some(tab);
        Some(tab)
    }

    /// Drags the tab at `from` so it ends at `to`, then lets the manager
    /// re-derive group order and restore contiguity.
    pub fn drag_tab(&mut self, from: usize, to: usize) {
        self.strip.move_tab(from, to);
        let order = self.strip.tab_ids();
        self.manager.tabs_were_reordered(&mut self.strip, &order);
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Groups the marked tabs, or the selected tab if none are marked.
    ///
    /// Members follow physical order. Clears the marks. Returns `None` when
    /// there is nothing to group.
    pub fn create_group_with_selected_tabs(&mut self) -> Option<GroupId> {
        let mut tabs = if self.marked.is_empty() {
            self.selected.into_iter().collect::<Vec<_>>()
        } else {
            std::mem::take(&mut self.marked)
        };
        if tabs.is_empty() {
            return None;
        }
        tabs.sort_by_key(|tab| self.strip.index_of_tab(*tab));
        Some(self.create_group_with_tabs(&tabs, None, None))
    }

    /// Creates a group from explicit tabs.
    ///
    /// Without a name the group gets the next free default name; without a
    /// color it gets the next rotation color when auto-assignment is on.
    pub fn create_group_with_tabs(
        &mut self,
        tabs: &[TabId],
        name: Option<&str>,
        color: Option<GroupColor>,
    ) -> GroupId {
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.next_default_name(),
        };
        let color = match color {
            Some(color) => Some(color),
            None if self.settings().auto_assign_color => Some(self.next_rotation_color()),
            None => None,
        };
        self.manager.create_group(&mut self.strip, &name, color, tabs)
    }

    /// Adds the selected tab to `group`.
    pub fn add_current_tab_to_group(&mut self, group: GroupId) -> bool {
        let Some(tab) = self.selected else {
            return false;
        };
        if self.manager.group_with_id(group).is_none() {
            return false;
        }
        self.manager.add_tab(&mut self.strip, tab, group, None);
        true
    }

    /// Removes the selected tab from its group.
    pub fn remove_current_tab_from_group(&mut self) -> bool {
        let Some(tab) = self.selected else {
            return false;
        };
        if self.manager.group_for_tab(tab).is_none() {
            return false;
        }
        self.manager.remove_tab_from_group(&mut self.strip, tab);
        true
    }

    /// Dissolves a group, keeping its tabs.
    pub fn ungroup_tab_group(&mut self, group: GroupId) {
        self.manager.remove_group(&mut self.strip, group);
    }

    /// Closes every tab of a group and the group itself. Returns the number
    /// of tabs closed.
    pub fn close_tab_group(&mut self, group: GroupId) -> usize {
        let Some(members) = self.manager.group_with_id(group).map(|g| g.tabs().to_vec()) else {
            return 0;
        };
        let closed = members.into_iter().filter(|tab| self.close_tab(*tab)).count();
        self.manager.remove_group(&mut self.strip, group);
        tracing::debug!(group_id = %group, closed, "Closed tab group");
        closed
    }

    /// Selects a group's representative tab.
    pub fn select_group(&mut self, group: GroupId) -> Option<TabId> {
        let tab = self.manager.representative_tab(&self.strip, group)?;
        self.selected = Some(tab);
        Some(tab)
    }

    /// Collapses a group and moves the selection off hidden tabs.
    pub fn collapse_tab_group(&mut self, group: GroupId) {
        self.manager.collapse_group(&mut self.strip, group);
        self.fix_selection_after_collapse(group);
    }

    /// Expands a group.
    pub fn expand_tab_group(&mut self, group: GroupId) {
        self.manager.expand_group(&mut self.strip, group);
    }

    /// Toggles a group's collapsed state.
    pub fn toggle_collapse_tab_group(&mut self, group: GroupId) {
        self.manager.toggle_collapse_group(&mut self.strip, group);
        self.fix_selection_after_collapse(group);
    }

    /// Applies the result of the rename popover. `None` means the popover
    /// was cancelled; blank names are ignored.
    pub fn rename_tab_group(&mut self, group: GroupId, name: Option<&str>) {
        if let Some(name) = name {
            self.manager.rename_group(&mut self.strip, group, name);
        }
    }

    /// Applies the result of the color popover. `None` means the popover
    /// was cancelled; `Some(None)` clears the color.
    pub fn change_color_of_tab_group(&mut self, group: GroupId, color: Option<Option<GroupColor>>) {
        if let Some(color) = color {
            self.manager.set_group_color(&mut self.strip, group, color);
        }
    }

    /// Moves a group in the groups list and its block in the strip.
    pub fn move_tab_group(&mut self, from: usize, to: usize) {
        self.manager.move_group_at_index(&mut self.strip, from, to);
    }

    fn fix_selection_after_collapse(&mut self, group: GroupId) {
        let Some(selected) = self.selected else {
            return;
        };
        if self.manager.is_tab_visible(selected) {
            return;
        }
        if self.settings().collapse_selects_representative {
            self.selected = self.manager.representative_tab(&self.strip, group);
            return;
        }
        // Next visible tab after the hidden one, else the last visible tab
        let index = self.strip.index_of_tab(selected);
        let visible = self.manager.visible_tabs(&self.strip);
        self.selected = visible
            .iter()
            .copied()
            .find(|t| self.strip.index_of_tab(*t) > index)
            .or_else(|| visible.last().copied());
    }

    /// `Group`, then `Group 2`, `Group 3`, … skipping names in use.
    fn next_default_name(&self) -> String {
        let base = &self.settings().default_group_name;
        let taken: HashSet<&str> = self
            .manager
            .groups()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        if !taken.contains(base.as_str()) {
            return base.clone();
        }
        (2..=self.manager.group_count() + 1)
            .map(|n| format!("{base} {n}"))
            .find(|name| !taken.contains(name.as_str()))
            .unwrap_or_else(|| base.clone())
    }

    fn next_rotation_color(&mut self) -> GroupColor {
        let in_use: Vec<GroupColor> = self.manager.groups().iter().filter_map(|g| g.color).collect();
        self.rotation.next_color(&in_use)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Captures tabs, selection and groups.
    #[must_use]
    pub fn arrangement(&self) -> WindowArrangement {
        WindowArrangement {
            tabs: self
                .strip
                .tabs()
                .iter()
                .map(|tab| TabRecord {
                    guid: tab.id().as_uuid().to_string(),
                    title: tab.title().to_string(),
                })
                .collect(),
            selected_tab: self.selected.map(|tab| tab.as_uuid().to_string()),
            saved_at: Utc::now(),
            tab_groups: self.manager.arrangement(),
        }
    }

    /// Rebuilds a window from its saved form.
    ///
    /// Tabs with a missing or duplicate GUID get a fresh one. An unknown
    /// selection falls back to the first visible tab.
    #[must_use]
    pub fn from_arrangement(arrangement: &WindowArrangement, settings: TabGroupSettings) -> Self {
        let mut window = Self::with_settings(settings);
        for record in &arrangement.tabs {
            let index = window.strip.len();
            let restored = TabId::parse(&record.guid)
                .is_some_and(|id| window.strip.insert_tab_with_id(index, id, record.title.clone()));
            if !restored {
                let id = window.strip.insert_tab(index, record.title.clone());
                tracing::warn!(guid = %record.guid, tab_id = %id, "Invalid or duplicate tab GUID");
            }
        }

        window
            .manager
            .restore_from_arrangement(&mut window.strip, &arrangement.tab_groups);

        let selected = arrangement
            .selected_tab
            .as_deref()
            .and_then(TabId::parse)
            .filter(|tab| window.strip.contains_tab(*tab));
        window.selected = match selected {
            Some(tab) if window.manager.is_tab_visible(tab) => Some(tab),
            Some(tab) => window
                .manager
                .group_for_tab(tab)
                .and_then(|group| group.first_tab()),
            None => window.manager.visible_tabs(&window.strip).first().copied(),
        };
        window
    }

    /// Replaces this window's state with a saved arrangement, keeping the
    /// current settings.
    pub fn restore_arrangement(&mut self, arrangement: &WindowArrangement) {
        let settings = self.settings().clone();
        *self = Self::from_arrangement(arrangement, settings);
    }
}
