//! Group colors and the predefined palette
//!
//! Groups may carry one of eight predefined colors or an arbitrary custom
//! color. Each predefined color maps bidirectionally to a [`GroupColorType`];
//! anything outside the palette is tagged [`GroupColorType::Custom`].
//!
//! Colors are persisted as a [`SerializedColor`]: the palette name for
//! predefined colors, raw RGBA components for custom ones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGBA color attached to a tab group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupColor {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha component (255 = opaque)
    pub a: u8,
}

impl GroupColor {
    /// Creates an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Creates a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let component = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(component(0)?, component(2)?, component(4)?)),
            8 => Some(Self::rgba(
                component(0)?,
                component(2)?,
                component(4)?,
                component(6)?,
            )),
            _ => None,
        }
    }

    /// Formats the color as `#rrggbb`, or `#rrggbbaa` when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Returns the palette type of this color, or `Custom`.
    #[must_use]
    pub fn color_type(self) -> GroupColorType {
        color_type_for_color(self)
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Predefined group color types, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColorType {
    /// Grey (0x5f6368)
    Grey,
    /// Blue (0x1a73e8)
    Blue,
    /// Red (0xd93025)
    Red,
    /// Yellow (0xf9ab00)
    Yellow,
    /// Green (0x1e8e3e)
    Green,
    /// Pink (0xd01884)
    Pink,
    /// Purple (0x9334e6)
    Purple,
    /// Cyan (0x007b83)
    Cyan,
    /// Any color that is not part of the palette
    Custom,
}

impl GroupColorType {
    /// All predefined types in palette order (excludes `Custom`).
    pub const PREDEFINED: [Self; 8] = [
        Self::Grey,
        Self::Blue,
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Pink,
        Self::Purple,
        Self::Cyan,
    ];

    /// Returns the display name of this color type.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grey => "Grey",
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Pink => "Pink",
            Self::Purple => "Purple",
            Self::Cyan => "Cyan",
            Self::Custom => "Custom",
        }
    }

    /// Looks up a color type by name (case-insensitive, "gray" accepted).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "grey" | "gray" => Some(Self::Grey),
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            "yellow" => Some(Self::Yellow),
            "green" => Some(Self::Green),
            "pink" => Some(Self::Pink),
            "purple" => Some(Self::Purple),
            "cyan" => Some(Self::Cyan),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Returns the palette color for this type, `None` for `Custom`.
    #[must_use]
    pub fn color(self) -> Option<GroupColor> {
        color_for_type(self)
    }
}

impl fmt::Display for GroupColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The predefined palette, indexed like [`GroupColorType::PREDEFINED`].
pub const PREDEFINED_COLORS: [GroupColor; 8] = [
    GroupColor::rgb(0x5f, 0x63, 0x68), // Grey
    GroupColor::rgb(0x1a, 0x73, 0xe8), // Blue
    GroupColor::rgb(0xd9, 0x30, 0x25), // Red
    GroupColor::rgb(0xf9, 0xab, 0x00), // Yellow
    GroupColor::rgb(0x1e, 0x8e, 0x3e), // Green
    GroupColor::rgb(0xd0, 0x18, 0x84), // Pink
    GroupColor::rgb(0x93, 0x34, 0xe6), // Purple
    GroupColor::rgb(0x00, 0x7b, 0x83), // Cyan
];

/// Returns the palette entry for a predefined type.
///
/// `Custom` has no fixed color and yields `None`.
#[must_use]
pub fn color_for_type(color_type: GroupColorType) -> Option<GroupColor> {
    GroupColorType::PREDEFINED
        .iter()
        .position(|t| *t == color_type)
        .map(|index| PREDEFINED_COLORS[index])
}

/// Returns the whole palette in enumeration order.
#[must_use]
pub fn predefined_colors() -> &'static [GroupColor] {
    &PREDEFINED_COLORS
}

/// Returns the palette type matching `color` exactly, or `Custom`.
#[must_use]
pub fn color_type_for_color(color: GroupColor) -> GroupColorType {
    PREDEFINED_COLORS
        .iter()
        .position(|c| *c == color)
        .map_or(GroupColorType::Custom, |index| GroupColorType::PREDEFINED[index])
}

/// Returns a display name for an optional group color.
#[must_use]
pub fn name_for_color(color: Option<GroupColor>) -> &'static str {
    color.map_or("None", |c| color_type_for_color(c).label())
}

/// Parses a user-supplied color: a palette name or a hex string.
#[must_use]
pub fn parse_color(input: &str) -> Option<GroupColor> {
    GroupColorType::from_name(input)
        .and_then(color_for_type)
        .or_else(|| GroupColor::from_hex(input))
}

/// Portable persisted form of a group color.
///
/// Predefined colors are stored by palette name so that a palette tweak
/// carries over to restored groups. Custom colors are stored as RGBA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedColor {
    /// Palette name (`"blue"`, `"red"`, …) for predefined colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
    /// Raw RGBA components for custom colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgba: Option<[u8; 4]>,
}

impl SerializedColor {
    /// Builds the persisted form of a color.
    #[must_use]
    pub fn from_color(color: GroupColor) -> Self {
        match color_type_for_color(color) {
            GroupColorType::Custom => Self {
                palette: None,
                rgba: Some([color.r, color.g, color.b, color.a]),
            },
            predefined => Self {
                palette: Some(predefined.label().to_lowercase()),
                rgba: None,
            },
        }
    }

    /// Resolves the persisted form back into a color.
    ///
    /// An unknown palette name falls back to the RGBA override if present,
    /// and to no color otherwise.
    #[must_use]
    pub fn resolve(&self) -> Option<GroupColor> {
        let from_palette = self
            .palette
            .as_deref()
            .and_then(GroupColorType::from_name)
            .and_then(color_for_type);
        from_palette.or_else(|| self.rgba.map(|[r, g, b, a]| GroupColor::rgba(r, g, b, a)))
    }
}

/// Hands out palette colors to newly created groups.
///
/// Rotation skips Grey and prefers colors that no existing group uses. When
/// every color is taken it keeps cycling through the palette.
#[derive(Debug, Default)]
pub struct ColorRotation {
    /// Next rotation slot to try
    next_index: usize,
}

/// Palette types used by [`ColorRotation`], in rotation order.
const ROTATION: [GroupColorType; 7] = [
    GroupColorType::Blue,
    GroupColorType::Red,
    GroupColorType::Yellow,
    GroupColorType::Green,
    GroupColorType::Pink,
    GroupColorType::Purple,
    GroupColorType::Cyan,
];

impl ColorRotation {
    /// Creates a rotation starting at Blue.
    #[must_use]
    pub fn new() -> Self {
        Self { next_index: 0 }
    }

    /// Returns the next color, skipping colors listed in `in_use` if possible.
    pub fn next_color(&mut self, in_use: &[GroupColor]) -> GroupColor {
        let start = self.next_index;
        for offset in 0..ROTATION.len() {
            let index = (start + offset) % ROTATION.len();
            let candidate = PREDEFINED_COLORS[ROTATION[index] as usize];
            if !in_use.contains(&candidate) {
                self.next_index = (index + 1) % ROTATION.len();
                return candidate;
            }
        }
        // All taken, keep cycling
        self.next_index = (start + 1) % ROTATION.len();
        PREDEFINED_COLORS[ROTATION[start] as usize]
    }
}
