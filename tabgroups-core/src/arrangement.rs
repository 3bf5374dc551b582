//! Persisted form of tab groups
//!
//! Groups are saved as an ordered JSON array of records, stored under
//! [`TAB_GROUPS_ARRANGEMENT_KEY`] inside the host window's own arrangement
//! object. Reading is lenient: a malformed record is skipped, a malformed
//! field falls back to its default, and the manager repairs the rest
//! (missing GUIDs, empty names, unknown tabs) while restoring.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::color::{GroupColorType, SerializedColor};
use crate::error::{ArrangementError, ArrangementResult};
use crate::group::TabGroup;
use crate::types::GroupId;

/// Key under which the group records live in a window arrangement
pub const TAB_GROUPS_ARRANGEMENT_KEY: &str = "tab_groups";

/// Record key: group GUID
pub const KEY_GROUP_GUID: &str = "guid";
/// Record key: display name
pub const KEY_GROUP_NAME: &str = "name";
/// Record key: color
pub const KEY_GROUP_COLOR: &str = "color";
/// Record key: collapsed flag
pub const KEY_GROUP_COLLAPSED: &str = "collapsed";
/// Record key: member tab GUIDs in order
pub const KEY_GROUP_TAB_GUIDS: &str = "tab_guids";

/// One persisted group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Group GUID as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Group color; absent means no color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializedColor>,
    /// Collapsed flag; absent means expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Member tab GUIDs in membership order
    #[serde(default)]
    pub tab_guids: Vec<String>,
}

impl GroupRecord {
    /// Captures a group's state.
    #[must_use]
    pub fn from_group(group: &TabGroup) -> Self {
        Self {
            guid: Some(group.id().as_uuid().to_string()),
            name: Some(group.name.clone()),
            color: group.color.map(SerializedColor::from_color),
            collapsed: Some(group.is_collapsed()),
            tab_guids: group
                .tabs()
                .iter()
                .map(|tab| tab.as_uuid().to_string())
                .collect(),
        }
    }

    /// The record's GUID, if present and well formed.
    #[must_use]
    pub fn group_id(&self) -> Option<GroupId> {
        self.guid.as_deref().and_then(GroupId::parse)
    }

    /// Reads a record field by field, ignoring fields of the wrong type.
    ///
    /// Returns `None` if `value` is not an object. A color may be given
    /// either as an object or as a bare palette name.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);

        let color = object.get(KEY_GROUP_COLOR).and_then(|color| match color {
            Value::String(name) => GroupColorType::from_name(name).map(|color_type| {
                SerializedColor {
                    palette: Some(color_type.label().to_lowercase()),
                    rgba: None,
                }
            }),
            other => serde_json::from_value::<SerializedColor>(other.clone()).ok(),
        });

        let tab_guids = object
            .get(KEY_GROUP_TAB_GUIDS)
            .and_then(Value::as_array)
            .map(|guids| {
                guids
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            guid: text(KEY_GROUP_GUID),
            name: text(KEY_GROUP_NAME),
            color,
            collapsed: object.get(KEY_GROUP_COLLAPSED).and_then(Value::as_bool),
            tab_guids,
        })
    }
}

/// Ordered list of group records for one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TabGroupArrangement {
    /// Records in groups-list order
    pub groups: Vec<GroupRecord>,
}

impl<'de> Deserialize<'de> for TabGroupArrangement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl TabGroupArrangement {
    /// Creates an empty arrangement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Reads records leniently from a JSON array.
    ///
    /// Anything that is not an array yields an empty arrangement; entries
    /// that are not objects are skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(entries) = value.as_array() else {
            if !value.is_null() {
                tracing::warn!("Tab group arrangement is not an array, ignoring it");
            }
            return Self::default();
        };
        let groups = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let record = GroupRecord::from_value(entry);
                if record.is_none() {
                    tracing::warn!(index, "Skipping malformed tab group record");
                }
                record
            })
            .collect();
        Self { groups }
    }

    /// Converts to a JSON array.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> ArrangementResult<Value> {
        serde_json::to_value(self).map_err(ArrangementError::Serialization)
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ArrangementResult<String> {
        serde_json::to_string_pretty(self).map_err(ArrangementError::Serialization)
    }

    /// Parses JSON text. Only syntax errors fail; structure is read leniently.
    ///
    /// # Errors
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json(json: &str) -> ArrangementResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(ArrangementError::Deserialization)?;
        Ok(Self::from_value(&value))
    }

    /// Stores the records under [`TAB_GROUPS_ARRANGEMENT_KEY`] in a window
    /// arrangement, replacing any previous entry.
    ///
    /// # Errors
    /// Returns [`ArrangementError::NotAnObject`] if `window` is not an object.
    pub fn embed_into(&self, window: &mut Value) -> ArrangementResult<()> {
        let object: &mut Map<String, Value> =
            window.as_object_mut().ok_or(ArrangementError::NotAnObject)?;
        object.insert(TAB_GROUPS_ARRANGEMENT_KEY.to_string(), self.to_value()?);
        Ok(())
    }

    /// Extracts the records from a window arrangement.
    ///
    /// A window saved before tab groups existed has no entry and yields an
    /// empty arrangement.
    #[must_use]
    pub fn from_window_arrangement(window: &Value) -> Self {
        window
            .get(TAB_GROUPS_ARRANGEMENT_KEY)
            .map(Self::from_value)
            .unwrap_or_default()
    }
}
