//! Semantic colors rendered as CSS strings for each selection state.

use eyre::{eyre, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Alpha applied to elements outside the current selection.
pub const DESELECTED_ALPHA: f32 = 0.2;
pub const HOVER_ALPHA: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0x88, 0x88, 0x88)
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`, with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(eyre!("invalid hex color {hex:?}")),
        };
        if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(eyre!("invalid hex color {hex:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|e| eyre!("invalid hex color {hex:?}: {e}"))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(&self, alpha: f32) -> String {
        let alpha = alpha.clamp(0.0, 1.0);
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }

    pub fn selected_css(&self) -> String {
        self.to_rgba(1.0)
    }

    pub fn deselected_css(&self) -> String {
        self.to_rgba(DESELECTED_ALPHA)
    }

    pub fn hover_css(&self) -> String {
        self.to_rgba(HOVER_ALPHA)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
