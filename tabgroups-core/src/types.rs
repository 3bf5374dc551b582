//! Core identifier types for tab grouping
//!
//! Tabs and groups are both identified by UUIDs. The identifiers serialize as
//! plain UUID strings so they can be embedded directly in saved arrangements.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tab.
///
/// Tab identifiers are owned by the host's tab strip. The group manager only
/// stores them; it never creates tab objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub Uuid);

impl TabId {
    /// Creates a new random tab ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a tab ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a tab ID from its GUID string form.
    ///
    /// Returns `None` for anything that is not a valid UUID.
    #[must_use]
    pub fn parse(guid: &str) -> Option<Self> {
        Uuid::parse_str(guid.trim()).ok().map(Self)
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tab({})", self.0)
    }
}

/// Unique identifier for a tab group.
///
/// Group IDs are stable for the lifetime of a group and are persisted in
/// arrangements so that restored groups keep their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    /// Creates a new random group ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a group ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a group ID from its GUID string form.
    #[must_use]
    pub fn parse(guid: &str) -> Option<Self> {
        Uuid::parse_str(guid.trim()).ok().map(Self)
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// A single move request sent to the host's tab strip.
///
/// The tab currently at `from` is removed and reinserted so that it ends up
/// at index `to` of the resulting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabMove {
    /// Physical index the tab is taken from.
    pub from: usize,
    /// Physical index the tab ends up at.
    pub to: usize,
}

impl TabMove {
    /// Creates a new move request.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Applies this move to an ordered slice of items.
    ///
    /// Out-of-range moves leave the order untouched.
    pub fn apply<T>(self, order: &mut Vec<T>) {
        if self.from >= order.len() || self.to >= order.len() || self.from == self.to {
            return;
        }
        let item = order.remove(self.from);
        order.insert(self.to, item);
    }
}

impl fmt::Display for TabMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
