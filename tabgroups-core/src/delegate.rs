//! Host contract for the tab group manager
//!
//! The host window owns the real tab objects and the visual tab strip. The
//! manager never holds on to the host: every operation that needs it borrows
//! the host for the duration of the call.

use crate::group::TabGroup;
use crate::types::TabId;

/// Capabilities the manager needs from the host's tab strip.
///
/// All calls are synchronous and happen on the UI thread. A move that the
/// host fails to perform has no error channel; it simply leaves the order
/// unchanged and is picked up by the next contiguity pass.
pub trait TabGroupDelegate {
    /// A group was collapsed or expanded; the host must hide or show the
    /// affected tab views.
    fn collapsed_state_changed(&mut self, group: &TabGroup);

    /// Group state changed in a way that needs the tab bar redrawn.
    fn tab_bar_needs_update(&mut self);

    /// Returns `true` if a tab with this identifier currently exists.
    fn contains_tab(&self, tab: TabId) -> bool;

    /// All tabs in physical order.
    fn all_tabs(&self) -> Vec<TabId>;

    /// Physical index of a tab, `None` if the host does not know it.
    fn index_of_tab(&self, tab: TabId) -> Option<usize> {
        self.all_tabs().iter().position(|t| *t == tab)
    }

    /// Moves the tab at physical index `from` so that it ends at `to`.
    fn move_tab(&mut self, from: usize, to: usize);
}
