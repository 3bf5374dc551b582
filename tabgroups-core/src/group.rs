//! Tab group entity
//!
//! A [`TabGroup`] is an ordered membership list of tab identifiers plus its
//! display metadata. It only does membership bookkeeping: exclusivity across
//! groups and physical ordering are the job of
//! [`TabGroupManager`](crate::manager::TabGroupManager).

use crate::color::GroupColor;
use crate::types::{GroupId, TabId};

/// A named, colored, collapsible group of tabs.
///
/// # Example
///
/// ```
/// use tabgroups_core::{TabGroup, TabId};
///
/// let mut group = TabGroup::new("Work", None);
/// let (a, b) = (TabId::new(), TabId::new());
/// group.add_tab(a);
/// group.insert_tab(b, 0);
/// assert_eq!(group.tabs(), &[b, a]);
/// assert_eq!(group.index_of_tab(a), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    id: GroupId,
    /// Display name, also the sole label while collapsed
    pub name: String,
    /// Optional group color
    pub color: Option<GroupColor>,
    collapsed: bool,
    tabs: Vec<TabId>,
}

impl TabGroup {
    /// Creates an expanded, empty group with a generated ID.
    #[must_use]
    pub fn new(name: impl Into<String>, color: Option<GroupColor>) -> Self {
        Self::with_id(GroupId::new(), name, color, false)
    }

    /// Creates an empty group with a specific ID (used on restore).
    #[must_use]
    pub fn with_id(
        id: GroupId,
        name: impl Into<String>,
        color: Option<GroupColor>,
        collapsed: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            collapsed,
            tabs: Vec::new(),
        }
    }

    /// Returns the group's identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns whether the group is collapsed.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Sets the collapsed flag.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Flips the collapsed flag.
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Member tabs in group order.
    #[must_use]
    pub fn tabs(&self) -> &[TabId] {
        &self.tabs
    }

    /// Number of member tabs.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The first member, which stays visible while collapsed.
    #[must_use]
    pub fn first_tab(&self) -> Option<TabId> {
        self.tabs.first().copied()
    }

    /// Appends a tab unless it is already a member.
    pub fn add_tab(&mut self, tab: TabId) {
        if !self.contains_tab(tab) {
            self.tabs.push(tab);
        }
    }

    /// Inserts a tab at `index` (clamped to the member count) unless it is
    /// already a member.
    pub fn insert_tab(&mut self, tab: TabId, index: usize) {
        if self.contains_tab(tab) {
            return;
        }
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, tab);
    }

    /// Removes a tab. Does nothing if it is not a member.
    pub fn remove_tab(&mut self, tab: TabId) {
        self.tabs.retain(|t| *t != tab);
    }

    /// Returns `true` if `tab` is a member.
    #[must_use]
    pub fn contains_tab(&self, tab: TabId) -> bool {
        self.tabs.contains(&tab)
    }

    /// Position of `tab` within the group, `None` if absent.
    #[must_use]
    pub fn index_of_tab(&self, tab: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| *t == tab)
    }

    /// Moves a member to `new_index` (clamped). Returns `false` if `tab` is
    /// not a member.
    pub fn move_tab_to_index(&mut self, tab: TabId, new_index: usize) -> bool {
        let Some(current) = self.index_of_tab(tab) else {
            return false;
        };
        let tab = self.tabs.remove(current);
        let new_index = new_index.min(self.tabs.len());
        self.tabs.insert(new_index, tab);
        true
    }

    /// Removes every member and returns them in group order.
    pub fn remove_all_tabs(&mut self) -> Vec<TabId> {
        std::mem::take(&mut self.tabs)
    }
}
