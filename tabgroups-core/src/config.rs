//! Tab group settings
//!
//! Settings are stored as TOML. Every field has a default, so partial or
//! empty files load fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contiguity::AnchorPolicy;
use crate::error::{ConfigError, ConfigResult};

/// Name of the directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "tabgroups";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Default base name for groups created without a name
pub const DEFAULT_GROUP_NAME: &str = "Group";

/// Name substituted for empty names in restored arrangements
pub const PLACEHOLDER_GROUP_NAME: &str = "Untitled Group";

/// User-adjustable tab group behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabGroupSettings {
    /// Where a group's block is anchored when contiguity is restored
    pub anchor_policy: AnchorPolicy,
    /// Base name for groups created without one
    pub default_group_name: String,
    /// Name used when a restored group has an empty name
    pub placeholder_name: String,
    /// Give groups created without a color the next palette color
    pub auto_assign_color: bool,
    /// Move the selection to the representative when its group collapses
    pub collapse_selects_representative: bool,
}

impl Default for TabGroupSettings {
    fn default() -> Self {
        Self {
            anchor_policy: AnchorPolicy::FirstMember,
            default_group_name: DEFAULT_GROUP_NAME.to_string(),
            placeholder_name: PLACEHOLDER_GROUP_NAME.to_string(),
            auto_assign_color: true,
            collapse_selects_representative: true,
        }
    }
}

impl TabGroupSettings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the anchor policy
    #[must_use]
    pub const fn with_anchor_policy(mut self, policy: AnchorPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    /// Enables or disables automatic color assignment
    #[must_use]
    pub const fn with_auto_assign_color(mut self, enabled: bool) -> Self {
        self.auto_assign_color = enabled;
        self
    }

    /// Returns the default settings file path.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoConfigDir`] if the platform has no config dir.
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Parses settings from TOML.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(input: &str) -> ConfigResult<Self> {
        let mut settings: Self = toml::from_str(input)?;
        settings.normalize();
        Ok(settings)
    }

    /// Serializes settings to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads settings from a file, returning defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Saves settings to a file, creating parent directories if needed.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces blank names with the built-in defaults.
    fn normalize(&mut self) {
        if self.default_group_name.trim().is_empty() {
            self.default_group_name = DEFAULT_GROUP_NAME.to_string();
        }
        if self.placeholder_name.trim().is_empty() {
            self.placeholder_name = PLACEHOLDER_GROUP_NAME.to_string();
        }
    }
}
