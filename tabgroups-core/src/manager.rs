//! Tab group manager
//!
//! [`TabGroupManager`] owns the ordered list of groups and the tab → group
//! lookup, and keeps the host's physical tab strip consistent with them:
//! after every mutation each group's members occupy one contiguous run, in
//! membership order, and group blocks follow the order of the groups list.
//!
//! The manager never touches tab objects. It reads the physical order from
//! a [`TabGroupDelegate`] borrowed for the duration of each call and asks it
//! to move tabs. Operations never fail: references to unknown tabs or groups
//! are logged and ignored.
//!
//! # Example
//!
//! ```
//! use tabgroups_core::{TabGroupManager, TabStrip};
//!
//! let mut strip = TabStrip::new();
//! let tabs: Vec<_> = (0..5).map(|i| strip.push_tab(format!("tab {i}"))).collect();
//! let mut manager = TabGroupManager::new();
//!
//! // Group T1 and T3; T3 is pulled next to T1
//! let work = manager.create_group(&mut strip, "Work", None, &[tabs[1], tabs[3]]);
//! assert_eq!(strip.tab_ids(), vec![tabs[0], tabs[1], tabs[3], tabs[2], tabs[4]]);
//!
//! // Collapsing hides everything but the first member
//! manager.collapse_group(&mut strip, work);
//! assert_eq!(manager.hidden_tabs(&strip), vec![tabs[3]]);
//! ```

use std::collections::{HashMap, HashSet};

use crate::arrangement::{GroupRecord, TabGroupArrangement};
use crate::color::GroupColor;
use crate::config::TabGroupSettings;
use crate::contiguity::{AnchorPolicy, moves_between, plan_contiguous_order};
use crate::delegate::TabGroupDelegate;
use crate::group::TabGroup;
use crate::tracing::span_names;
use crate::types::{GroupId, TabId};

/// Owns all tab groups of one window and keeps grouped tabs contiguous.
#[derive(Debug, Default)]
pub struct TabGroupManager {
    /// Groups in display order
    groups: Vec<TabGroup>,
    /// Tab → owning group
    tab_to_group: HashMap<TabId, GroupId>,
    /// Every ID handed out or restored, so fresh IDs are never reused
    issued_ids: HashSet<GroupId>,
    settings: TabGroupSettings,
}

impl TabGroupManager {
    /// Creates an empty manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty manager with the given settings.
    #[must_use]
    pub fn with_settings(settings: TabGroupSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &TabGroupSettings {
        &self.settings
    }

    /// Replaces the settings. Takes effect on the next contiguity pass.
    pub fn set_settings(&mut self, settings: TabGroupSettings) {
        self.settings = settings;
    }

    /// All groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Looks up a group by ID.
    #[must_use]
    pub fn group_with_id(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    /// Returns the group a tab belongs to.
    #[must_use]
    pub fn group_for_tab(&self, tab: TabId) -> Option<&TabGroup> {
        self.tab_to_group
            .get(&tab)
            .and_then(|id| self.group_with_id(*id))
    }

    /// Position of a group in the groups list.
    #[must_use]
    pub fn index_of_group(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id() == id)
    }

    // ------------------------------------------------------------------
    // Group lifecycle
    // ------------------------------------------------------------------

    /// Creates a group, assigns `tabs` to it and restores contiguity.
    ///
    /// Tabs already in another group are moved out of it first. Tabs the
    /// host does not know are skipped.
    pub fn create_group(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        name: &str,
        color: Option<GroupColor>,
        tabs: &[TabId],
    ) -> GroupId {
        let id = self.allocate_id();
        let _span =
            crate::trace_operation!(span_names::GROUP_CREATE, group_id = %id, name = %name)
                .entered();

        self.groups.push(TabGroup::with_id(id, name, color, false));
        for tab in tabs {
            self.assign(host, *tab, id, None);
        }
        tracing::debug!(group_id = %id, tab_count = tabs.len(), "Created tab group");

        self.ensure_grouped_tabs_are_contiguous(host);
        id
    }

    /// Removes a group. Its tabs become ungrouped and stay where they are.
    pub fn remove_group(&mut self, host: &mut dyn TabGroupDelegate, id: GroupId) {
        let _span = crate::trace_operation!(span_names::GROUP_REMOVE, group_id = %id).entered();
        let Some(index) = self.index_of_group(id) else {
            tracing::debug!(group_id = %id, "Ignoring removal of unknown group");
            return;
        };
        let mut group = self.groups.remove(index);
        for tab in group.tabs() {
            self.tab_to_group.remove(tab);
        }
        if group.is_collapsed() {
            // Hidden members must be shown again
            group.set_collapsed(false);
            host.collapsed_state_changed(&group);
        }
        host.tab_bar_needs_update();
    }

    /// Renames a group. Blank names are ignored.
    pub fn rename_group(&mut self, host: &mut dyn TabGroupDelegate, id: GroupId, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if let Some(group) = self.group_mut(id) {
            group.name = name.to_string();
            host.tab_bar_needs_update();
        }
    }

    /// Sets or clears a group's color.
    pub fn set_group_color(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        id: GroupId,
        color: Option<GroupColor>,
    ) {
        if let Some(group) = self.group_mut(id) {
            group.color = color;
            host.tab_bar_needs_update();
        }
    }

    // ------------------------------------------------------------------
    // Assignment
    // ------------------------------------------------------------------

    /// Adds a tab to a group at `index` (end if `None`, clamped otherwise).
    ///
    /// A tab already in a group is removed from it first. Collapsed groups
    /// whose membership changes are expanded.
    pub fn add_tab(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        tab: TabId,
        group: GroupId,
        index: Option<usize>,
    ) {
        let _span = crate::trace_operation_debug!(
            span_names::GROUP_ASSIGN,
            tab_id = %tab,
            group_id = %group
        )
        .entered();
        if self.assign(host, tab, group, index) {
            self.ensure_grouped_tabs_are_contiguous(host);
        }
    }

    /// Moves a tab into `group` at `index` with a single contiguity pass.
    pub fn move_tab(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        tab: TabId,
        group: GroupId,
        index: Option<usize>,
    ) {
        self.add_tab(host, tab, group, index);
    }

    /// Reorders a tab inside the group it already belongs to.
    pub fn move_tab_within_group(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        tab: TabId,
        index: usize,
    ) {
        let Some(group_id) = self.tab_to_group.get(&tab).copied() else {
            tracing::debug!(tab_id = %tab, "Tab is not grouped, nothing to reorder");
            return;
        };
        let Some(group) = self.group_mut(group_id) else {
            return;
        };
        if !group.move_tab_to_index(tab, index) {
            return;
        }
        if group.is_collapsed() {
            // The representative may have changed
            host.collapsed_state_changed(group);
        }
        self.ensure_grouped_tabs_are_contiguous(host);
    }

    /// Detaches a tab from its group. Does nothing for ungrouped tabs.
    ///
    /// A collapsed group is expanded first so the detached tab is shown.
    pub fn remove_tab_from_group(&mut self, host: &mut dyn TabGroupDelegate, tab: TabId) {
        let Some(group_id) = self.tab_to_group.get(&tab).copied() else {
            return;
        };
        self.expand_for_edit(host, group_id);
        self.detach(tab);
        self.ensure_grouped_tabs_are_contiguous(host);
    }

    // ------------------------------------------------------------------
    // Group reordering
    // ------------------------------------------------------------------

    /// Moves the group at `from` to `to` in the groups list and moves its
    /// block accordingly. `to` is clamped; an invalid `from` is ignored.
    pub fn move_group_at_index(&mut self, host: &mut dyn TabGroupDelegate, from: usize, to: usize) {
        let _span =
            crate::trace_operation!(span_names::GROUP_REORDER, from = from, to = to).entered();
        if from >= self.groups.len() {
            tracing::debug!(from, count = self.groups.len(), "Group index out of range");
            return;
        }
        let to = to.min(self.groups.len() - 1);
        if from == to {
            return;
        }
        let group = self.groups.remove(from);
        self.groups.insert(to, group);
        self.ensure_grouped_tabs_are_contiguous(host);
    }

    // ------------------------------------------------------------------
    // Collapse / expand
    // ------------------------------------------------------------------

    /// Collapses a group so only its first member stays visible.
    pub fn collapse_group(&mut self, host: &mut dyn TabGroupDelegate, id: GroupId) {
        self.set_collapsed(host, id, Some(true));
    }

    /// Expands a group so all its members are visible.
    pub fn expand_group(&mut self, host: &mut dyn TabGroupDelegate, id: GroupId) {
        self.set_collapsed(host, id, Some(false));
    }

    /// Flips a group's collapsed state.
    pub fn toggle_collapse_group(&mut self, host: &mut dyn TabGroupDelegate, id: GroupId) {
        self.set_collapsed(host, id, None);
    }

    fn set_collapsed(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        id: GroupId,
        collapsed: Option<bool>,
    ) {
        let Some(group) = self.group_mut(id) else {
            tracing::debug!(group_id = %id, "Ignoring collapse of unknown group");
            return;
        };
        let collapsed = collapsed.unwrap_or(!group.is_collapsed());
        if group.is_collapsed() == collapsed {
            return;
        }
        let _span = crate::trace_operation!(
            span_names::GROUP_COLLAPSE,
            group_id = %id,
            collapsed = collapsed
        )
        .entered();
        group.set_collapsed(collapsed);
        host.collapsed_state_changed(group);
    }

    // ------------------------------------------------------------------
    // Visibility and ordering queries
    // ------------------------------------------------------------------

    /// `false` only for members of a collapsed group other than its first.
    #[must_use]
    pub fn is_tab_visible(&self, tab: TabId) -> bool {
        self.group_for_tab(tab)
            .is_none_or(|group| !group.is_collapsed() || group.first_tab() == Some(tab))
    }

    /// The group's first member, if the host still has it.
    #[must_use]
    pub fn representative_tab(&self, host: &dyn TabGroupDelegate, id: GroupId) -> Option<TabId> {
        self.group_with_id(id)
            .and_then(TabGroup::first_tab)
            .filter(|tab| host.contains_tab(*tab))
    }

    /// All tabs in the order the contiguity rules place them.
    ///
    /// Equals the host's physical order whenever the invariant holds.
    #[must_use]
    pub fn tabs_in_display_order(&self, host: &dyn TabGroupDelegate) -> Vec<TabId> {
        let members = self.membership_slices();
        plan_contiguous_order(&host.all_tabs(), &members, self.settings.anchor_policy)
    }

    /// Tabs that are not hidden by a collapsed group, in display order.
    #[must_use]
    pub fn visible_tabs(&self, host: &dyn TabGroupDelegate) -> Vec<TabId> {
        self.tabs_in_display_order(host)
            .into_iter()
            .filter(|tab| self.is_tab_visible(*tab))
            .collect()
    }

    /// Tabs hidden by a collapsed group, in display order.
    #[must_use]
    pub fn hidden_tabs(&self, host: &dyn TabGroupDelegate) -> Vec<TabId> {
        self.tabs_in_display_order(host)
            .into_iter()
            .filter(|tab| !self.is_tab_visible(*tab))
            .collect()
    }

    // ------------------------------------------------------------------
    // Contiguity
    // ------------------------------------------------------------------

    /// Moves tabs in the host so every group is one contiguous run.
    ///
    /// Only the minimal set of moves is sent. Returns how many were sent.
    pub fn ensure_grouped_tabs_are_contiguous(&mut self, host: &mut dyn TabGroupDelegate) -> usize {
        let _span = crate::trace_operation_debug!(span_names::ENSURE_CONTIGUOUS).entered();
        let current = host.all_tabs();
        let planned = {
            let members = self.membership_slices();
            plan_contiguous_order(&current, &members, self.settings.anchor_policy)
        };
        let moves = moves_between(&current, &planned);
        for mv in &moves {
            tracing::trace!(from = mv.from, to = mv.to, "Moving tab");
            host.move_tab(mv.from, mv.to);
        }
        if !moves.is_empty() && host.all_tabs() != planned {
            tracing::warn!(
                move_count = moves.len(),
                "Host did not apply every move, grouped tabs may not be contiguous"
            );
        }
        host.tab_bar_needs_update();
        moves.len()
    }

    // ------------------------------------------------------------------
    // Tab lifecycle hooks
    // ------------------------------------------------------------------

    /// Registers a newly added tab as ungrouped and pushes it out of any
    /// group run it landed in.
    pub fn tab_was_added(&mut self, host: &mut dyn TabGroupDelegate, tab: TabId) {
        if self.detach(tab).is_some() {
            tracing::debug!(tab_id = %tab, "Dropped stale group membership of new tab");
        }
        self.ensure_grouped_tabs_are_contiguous(host);
    }

    /// Cleans up membership of a tab the host has closed.
    ///
    /// The group survives even if it ends up empty.
    pub fn tab_was_removed(&mut self, host: &mut dyn TabGroupDelegate, tab: TabId) {
        let Some(group_id) = self.detach(tab) else {
            return;
        };
        if let Some(group) = self.group_with_id(group_id)
            && group.is_collapsed()
        {
            // A new representative may have become visible
            host.collapsed_state_changed(group);
        }
        host.tab_bar_needs_update();
    }

    /// Re-derives group state after the user dragged tabs in the strip.
    ///
    /// A group whose members are still adjacent adopts their new order, and
    /// the groups list follows the new order of group blocks. Anything that
    /// broke a run is then corrected by a contiguity pass.
    pub fn tabs_were_reordered(&mut self, host: &mut dyn TabGroupDelegate, new_order: &[TabId]) {
        let positions: HashMap<TabId, usize> = new_order
            .iter()
            .enumerate()
            .map(|(index, tab)| (*tab, index))
            .collect();

        for group in &mut self.groups {
            let mut placed: Vec<(usize, TabId)> = group
                .tabs()
                .iter()
                .filter_map(|tab| positions.get(tab).map(|pos| (*pos, *tab)))
                .collect();
            placed.sort_unstable();
            let adjacent = placed.windows(2).all(|pair| pair[1].0 == pair[0].0 + 1);
            if adjacent && placed.len() == group.tab_count() {
                let before = group.first_tab();
                for (index, (_, tab)) in placed.into_iter().enumerate() {
                    group.move_tab_to_index(tab, index);
                }
                if group.is_collapsed() && group.first_tab() != before {
                    host.collapsed_state_changed(group);
                }
            }
        }

        let policy = self.settings.anchor_policy;
        let anchor_of = |group: &TabGroup| -> Option<usize> {
            match policy {
                AnchorPolicy::FirstMember => {
                    group.first_tab().and_then(|tab| positions.get(&tab).copied())
                }
                AnchorPolicy::EarliestMember => group
                    .tabs()
                    .iter()
                    .filter_map(|tab| positions.get(tab).copied())
                    .min(),
            }
        };
        let slots: Vec<usize> = (0..self.groups.len())
            .filter(|index| anchor_of(&self.groups[*index]).is_some())
            .collect();
        let mut anchored: Vec<TabGroup> = slots.iter().map(|i| self.groups[*i].clone()).collect();
        anchored.sort_by_key(|group| anchor_of(group));
        for (slot, group) in slots.into_iter().zip(anchored) {
            self.groups[slot] = group;
        }

        self.ensure_grouped_tabs_are_contiguous(host);
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Snapshot of all groups, independent of the physical order.
    #[must_use]
    pub fn arrangement(&self) -> TabGroupArrangement {
        let _span = crate::trace_operation_debug!(span_names::ARRANGEMENT_SAVE).entered();
        TabGroupArrangement {
            groups: self.groups.iter().map(GroupRecord::from_group).collect(),
        }
    }

    /// Replaces all groups with those in `arrangement`.
    ///
    /// Tabs the host does not have are dropped, records with a missing or
    /// duplicate GUID get a fresh ID, and empty names are replaced by the
    /// placeholder name. Contiguity is restored once at the end.
    pub fn restore_from_arrangement(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        arrangement: &TabGroupArrangement,
    ) {
        let _span = crate::trace_operation!(
            span_names::ARRANGEMENT_RESTORE,
            group_count = arrangement.groups.len()
        )
        .entered();

        let previous = std::mem::take(&mut self.groups);
        self.tab_to_group.clear();

        let mut restored_ids: HashSet<GroupId> = HashSet::new();
        for record in &arrangement.groups {
            let id = match record.group_id() {
                Some(id) if restored_ids.insert(id) => {
                    self.issued_ids.insert(id);
                    id
                }
                _ => {
                    let id = self.allocate_id();
                    restored_ids.insert(id);
                    tracing::warn!(
                        guid = ?record.guid,
                        group_id = %id,
                        "Missing or duplicate group GUID, assigned a fresh one"
                    );
                    id
                }
            };
            let name = match record.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => self.settings.placeholder_name.clone(),
            };
            let color = record.color.as_ref().and_then(|color| {
                let resolved = color.resolve();
                if resolved.is_none() {
                    tracing::debug!(group_id = %id, "Group color did not resolve, using none");
                }
                resolved
            });
            self.groups.push(TabGroup::with_id(
                id,
                name,
                color,
                record.collapsed.unwrap_or(false),
            ));

            for guid in &record.tab_guids {
                let Some(tab) = TabId::parse(guid).filter(|tab| host.contains_tab(*tab)) else {
                    tracing::debug!(group_id = %id, guid = %guid, "Dropping unknown tab");
                    continue;
                };
                if self.tab_to_group.contains_key(&tab) {
                    tracing::debug!(tab_id = %tab, "Tab already restored into another group");
                    continue;
                }
                self.attach(tab, id, None);
            }
        }

        // Show everything the old groups hid, restored groups re-hide below
        for mut group in previous {
            if group.is_collapsed() {
                group.set_collapsed(false);
                host.collapsed_state_changed(&group);
            }
        }
        for group in &self.groups {
            host.collapsed_state_changed(group);
        }

        self.ensure_grouped_tabs_are_contiguous(host);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn group_mut(&mut self, id: GroupId) -> Option<&mut TabGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    fn membership_slices(&self) -> Vec<&[TabId]> {
        self.groups.iter().map(TabGroup::tabs).collect()
    }

    fn allocate_id(&mut self) -> GroupId {
        loop {
            let id = GroupId::new();
            if self.issued_ids.insert(id) {
                return id;
            }
        }
    }

    /// Removes a tab from its group. Returns the group it was in.
    fn detach(&mut self, tab: TabId) -> Option<GroupId> {
        let group_id = self.tab_to_group.remove(&tab)?;
        if let Some(group) = self.group_mut(group_id) {
            group.remove_tab(tab);
        }
        Some(group_id)
    }

    /// Expands a collapsed group whose membership is about to change.
    fn expand_for_edit(&mut self, host: &mut dyn TabGroupDelegate, id: GroupId) {
        if let Some(group) = self.group_mut(id)
            && group.is_collapsed()
        {
            group.set_collapsed(false);
            host.collapsed_state_changed(group);
        }
    }

    /// Moves a tab into a group without touching the physical order.
    ///
    /// Collapsed source and target groups are expanded when membership
    /// changes. Reordering inside the same group keeps it collapsed. Returns
    /// `false` (and changes nothing) for unknown tabs or groups.
    fn assign(
        &mut self,
        host: &mut dyn TabGroupDelegate,
        tab: TabId,
        group_id: GroupId,
        index: Option<usize>,
    ) -> bool {
        if self.index_of_group(group_id).is_none() {
            tracing::debug!(group_id = %group_id, "Ignoring assignment to unknown group");
            return false;
        }
        if !host.contains_tab(tab) {
            tracing::debug!(tab_id = %tab, "Ignoring assignment of unknown tab");
            return false;
        }
        let previous = self.tab_to_group.get(&tab).copied();
        if previous == Some(group_id) {
            self.detach(tab);
            self.attach(tab, group_id, index);
            if let Some(group) = self.group_with_id(group_id)
                && group.is_collapsed()
            {
                // The representative may have changed
                host.collapsed_state_changed(group);
            }
            return true;
        }
        if let Some(previous) = previous {
            self.expand_for_edit(host, previous);
        }
        self.expand_for_edit(host, group_id);
        self.detach(tab);
        self.attach(tab, group_id, index);
        true
    }

    /// Inserts a tab into a group's membership and the lookup table.
    fn attach(&mut self, tab: TabId, group_id: GroupId, index: Option<usize>) {
        if let Some(group) = self.group_mut(group_id) {
            match index {
                Some(index) => group.insert_tab(tab, index),
                None => group.add_tab(tab),
            }
            self.tab_to_group.insert(tab, group_id);
        }
    }
}
