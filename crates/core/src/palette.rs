//! Fixed colour palette offered by the picker.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-bit RGB colour stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Outline colour for a valid build target.
    pub const WHITE: Self = Self(0xffffff);
    /// Outline colour for an erase target.
    pub const RED: Self = Self(0xff3b30);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedColor {
    /// Display name.
    pub name: &'static str,
    /// RGB value.
    pub color: Color,
}

/// Built-in colours, in picker order.
pub const COLORS: [NamedColor; 8] = [
    NamedColor {
        name: "Red",
        color: Color(0xff3b30),
    },
    NamedColor {
        name: "Blue",
        color: Color(0x007aff),
    },
    NamedColor {
        name: "Green",
        color: Color(0x34c759),
    },
    NamedColor {
        name: "Yellow",
        color: Color(0xffcc00),
    },
    NamedColor {
        name: "Purple",
        color: Color(0xaf52de),
    },
    NamedColor {
        name: "White",
        color: Color(0xffffff),
    },
    NamedColor {
        name: "Black",
        color: Color(0x222222),
    },
    NamedColor {
        name: "Orange",
        color: Color(0xff9500),
    },
];

/// Read-only view over the palette.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    colors: &'static [NamedColor],
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Palette {
    /// The built-in eight-colour palette.
    pub fn builtin() -> Self {
        Self { colors: &COLORS }
    }

    /// Entry at picker index `index`.
    pub fn get(&self, index: usize) -> Option<&'static NamedColor> {
        self.colors.get(index)
    }

    /// Picker index of the colour named `name` (case-insensitive).
    pub fn index_of(&self, name: &str) -> Result<usize, CatalogError> {
        self.colors
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CatalogError::UnknownColor(name.to_string()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup_ignores_case() {
        let palette = Palette::builtin();
        assert_eq!(palette.index_of("blue"), Ok(1));
        assert_eq!(palette.get(1).unwrap().color, Color(0x007aff));
        assert!(palette.index_of("teal").is_err());
    }

    #[test]
    fn color_formats_as_hex() {
        assert_eq!(Color(0x007aff).to_string(), "#007aff");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }
}
