//! In-memory tab strip
//!
//! [`TabStrip`] is a minimal host: an ordered list of titled tabs with a
//! hidden flag per tab. It implements [`TabGroupDelegate`] so a
//! [`TabGroupManager`](crate::TabGroupManager) can drive it, and counts the
//! notifications it receives so callers can tell what changed.

use crate::delegate::TabGroupDelegate;
use crate::group::TabGroup;
use crate::types::{TabId, TabMove};

/// One tab in the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripTab {
    id: TabId,
    title: String,
    hidden: bool,
}

impl StripTab {
    /// Tab identifier
    #[must_use]
    pub const fn id(&self) -> TabId {
        self.id
    }

    /// Tab title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether a collapsed group currently hides the tab
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Ordered list of tabs driven by a tab group manager.
#[derive(Debug, Clone, Default)]
pub struct TabStrip {
    tabs: Vec<StripTab>,
    move_count: usize,
    update_count: usize,
    collapse_notifications: usize,
}

impl TabStrip {
    /// Creates an empty strip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new tab and returns its ID.
    pub fn push_tab(&mut self, title: impl Into<String>) -> TabId {
        let index = self.tabs.len();
        self.insert_tab(index, title)
    }

    /// Inserts a new tab at `index` (clamped) and returns its ID.
    pub fn insert_tab(&mut self, index: usize, title: impl Into<String>) -> TabId {
        let id = TabId::new();
        self.insert_tab_with_id(index, id, title);
        id
    }

    /// Inserts a tab with a known ID. Returns `false` if the ID is taken.
    pub fn insert_tab_with_id(&mut self, index: usize, id: TabId, title: impl Into<String>) -> bool {
        if self.contains_tab(id) {
            return false;
        }
        let index = index.min(self.tabs.len());
        self.tabs.insert(
            index,
            StripTab {
                id,
                title: title.into(),
                hidden: false,
            },
        );
        true
    }

    /// Removes a tab. Returns the index it had.
    pub fn remove_tab(&mut self, id: TabId) -> Option<usize> {
        let index = self.tabs.iter().position(|tab| tab.id == id)?;
        self.tabs.remove(index);
        Some(index)
    }

    /// All tabs in physical order.
    #[must_use]
    pub fn tabs(&self) -> &[StripTab] {
        &self.tabs
    }

    /// Tab IDs in physical order.
    #[must_use]
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(StripTab::id).collect()
    }

    /// Looks up a tab.
    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&StripTab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Tab at a physical index.
    #[must_use]
    pub fn tab_at(&self, index: usize) -> Option<&StripTab> {
        self.tabs.get(index)
    }

    /// Title of a tab.
    #[must_use]
    pub fn title(&self, id: TabId) -> Option<&str> {
        self.tab(id).map(StripTab::title)
    }

    /// Renames a tab. Returns `false` for unknown tabs.
    pub fn set_title(&mut self, id: TabId, title: impl Into<String>) -> bool {
        match self.tabs.iter_mut().find(|tab| tab.id == id) {
            Some(tab) => {
                tab.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Whether a tab is hidden. Unknown tabs are not hidden.
    #[must_use]
    pub fn is_hidden(&self, id: TabId) -> bool {
        self.tab(id).is_some_and(StripTab::is_hidden)
    }

    /// Number of tabs
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns `true` if the strip has no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Number of moves performed so far
    #[must_use]
    pub const fn move_count(&self) -> usize {
        self.move_count
    }

    /// Number of redraw requests received so far
    #[must_use]
    pub const fn update_count(&self) -> usize {
        self.update_count
    }

    /// Number of collapse or expand notifications received so far
    #[must_use]
    pub const fn collapse_notifications(&self) -> usize {
        self.collapse_notifications
    }
}

impl TabGroupDelegate for TabStrip {
    fn collapsed_state_changed(&mut self, group: &TabGroup) {
        self.collapse_notifications += 1;
        let representative = group.first_tab();
        for tab in &mut self.tabs {
            if group.contains_tab(tab.id) {
                tab.hidden = group.is_collapsed() && Some(tab.id) != representative;
            }
        }
    }

    fn tab_bar_needs_update(&mut self) {
        self.update_count += 1;
    }

    fn contains_tab(&self, tab: TabId) -> bool {
        self.tabs.iter().any(|t| t.id == tab)
    }

    fn all_tabs(&self) -> Vec<TabId> {
        self.tab_ids()
    }

    fn index_of_tab(&self, tab: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab)
    }

    fn move_tab(&mut self, from: usize, to: usize) {
        if from == to || from >= self.tabs.len() || to >= self.tabs.len() {
            return;
        }
        TabMove::new(from, to).apply(&mut self.tabs);
        self.move_count += 1;
    }
}
