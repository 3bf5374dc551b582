//! `tabgroups` Core Library
//!
//! Named, colored, collapsible groups of terminal tabs. A group owns an
//! ordered list of tabs; the manager keeps each group's tabs physically
//! adjacent in the host's tab strip, tracks which tabs a collapsed group
//! hides, and saves and restores groups as part of a window arrangement.
//!
//! # Crate Structure
//!
//! - [`types`] - Tab and group identifiers, move requests
//! - [`color`] - Group color palette and its persisted form
//! - [`group`] - The [`TabGroup`] value type
//! - [`delegate`] - Contract the host tab strip implements
//! - [`contiguity`] - Planning contiguous tab orders and minimal move lists
//! - [`manager`] - [`TabGroupManager`], the owner of all groups of a window
//! - [`arrangement`] - Group records inside saved window arrangements
//! - [`strip`] - In-memory [`TabStrip`] host
//! - [`window`] - [`TerminalWindow`] commands and [`WindowArrangement`]
//! - [`config`] - User settings persisted as TOML
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod arrangement;
pub mod color;
pub mod config;
pub mod contiguity;
pub mod delegate;
pub mod error;
pub mod group;
pub mod manager;
pub mod strip;
pub mod tracing;
pub mod types;
pub mod window;

pub use arrangement::{GroupRecord, TAB_GROUPS_ARRANGEMENT_KEY, TabGroupArrangement};
pub use color::{
    ColorRotation, GroupColor, GroupColorType, PREDEFINED_COLORS, SerializedColor,
    color_for_type, color_type_for_color, name_for_color, parse_color, predefined_colors,
};
pub use config::TabGroupSettings;
pub use contiguity::{AnchorPolicy, is_contiguous, moves_between, plan_contiguous_order};
pub use delegate::TabGroupDelegate;
pub use error::{
    ArrangementError, ArrangementResult, ConfigError, ConfigResult, TabGroupError,
};
pub use group::TabGroup;
pub use manager::TabGroupManager;
pub use strip::{StripTab, TabStrip};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
};
pub use types::{GroupId, TabId, TabMove};
pub use window::{TabRecord, TerminalWindow, WindowArrangement};
