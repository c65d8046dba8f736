use byldr_core::{BrickCatalog, BrickType, Color, Mode, NamedColor, Palette, Rotation, BRICK_TYPES};
use serde::Serialize;
use thiserror::Error;

/// A selection command named an entry that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Catalog index out of range.
    #[error("brick type index {index} out of range (catalog has {len})")]
    BrickTypeOutOfRange {
        /// Requested index.
        index: usize,
        /// Catalog size.
        len: usize,
    },
    /// Palette index out of range.
    #[error("colour index {index} out of range (palette has {len})")]
    ColorOutOfRange {
        /// Requested index.
        index: usize,
        /// Palette size.
        len: usize,
    },
}

/// What the next BUILD will place, and whether actions build or erase.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    catalog: BrickCatalog,
    palette: Palette,
    brick_type_index: usize,
    brick_type: &'static BrickType,
    color_index: usize,
    rotation: Rotation,
    mode: Mode,
}

/// Serializable summary of a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionSummary {
    /// Catalog id of the selected piece.
    pub brick_type: &'static str,
    /// Name of the selected colour.
    pub color: &'static str,
    /// Rotation in degrees.
    pub rotation: u32,
    /// Current mode.
    pub mode: Mode,
}

const DEFAULT_COLOR_INDEX: usize = 1;

impl Selection {
    /// Defaults: first catalog entry, second palette entry, 0°, BUILD.
    pub fn new(catalog: BrickCatalog, palette: Palette) -> Self {
        Self {
            catalog,
            palette,
            brick_type_index: 0,
            brick_type: catalog.get(0).unwrap_or(&BRICK_TYPES[0]),
            color_index: DEFAULT_COLOR_INDEX.min(palette.len().saturating_sub(1)),
            rotation: Rotation::Deg0,
            mode: Mode::Build,
        }
    }

    /// Selected catalog index.
    pub fn brick_type_index(&self) -> usize {
        self.brick_type_index
    }

    /// Selected palette index.
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Selected piece.
    pub fn brick_type(&self) -> &'static BrickType {
        self.brick_type
    }

    /// Selected colour.
    pub fn color(&self) -> Color {
        self.named_color().map_or(Color::WHITE, |entry| entry.color)
    }

    fn named_color(&self) -> Option<&'static NamedColor> {
        self.palette.get(self.color_index)
    }

    /// Current rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Select catalog entry `index`.
    pub fn select_brick_type(&mut self, index: usize) -> Result<(), SelectionError> {
        let Some(brick_type) = self.catalog.get(index) else {
            return Err(SelectionError::BrickTypeOutOfRange {
                index,
                len: self.catalog.len(),
            });
        };
        self.brick_type_index = index;
        self.brick_type = brick_type;
        Ok(())
    }

    /// Select palette entry `index`.
    pub fn select_color(&mut self, index: usize) -> Result<(), SelectionError> {
        if index >= self.palette.len() {
            return Err(SelectionError::ColorOutOfRange {
                index,
                len: self.palette.len(),
            });
        }
        self.color_index = index;
        Ok(())
    }

    /// Flip between 0° and 90°.
    pub fn toggle_rotation(&mut self) -> Rotation {
        self.rotation = self.rotation.toggled();
        self.rotation
    }

    /// Switch between BUILD and ERASE.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Snapshot for status reporting.
    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            brick_type: self.brick_type().id,
            color: self.named_color().map_or("", |entry| entry.name),
            rotation: self.rotation.degrees(),
            mode: self.mode,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(BrickCatalog::builtin(), Palette::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byldr_core::Footprint;

    #[test]
    fn defaults_match_the_picker() {
        let selection = Selection::default();
        assert_eq!(selection.brick_type().id, "b11");
        assert_eq!(selection.color(), Color(0x007aff));
        assert_eq!(selection.rotation(), Rotation::Deg0);
        assert_eq!(selection.mode(), Mode::Build);
    }

    #[test]
    fn out_of_range_selection_is_rejected_and_ignored() {
        let mut selection = Selection::default();
        selection.select_brick_type(4).expect("in range");
        assert_eq!(
            selection.select_brick_type(7),
            Err(SelectionError::BrickTypeOutOfRange { index: 7, len: 7 })
        );
        assert_eq!(selection.brick_type_index(), 4);
        assert_eq!(selection.brick_type().footprint, Footprint::new(2, 4));

        assert!(selection.select_color(8).is_err());
        assert_eq!(selection.color_index(), 1);
    }

    #[test]
    fn rotation_toggles_back_and_forth() {
        let mut selection = Selection::default();
        assert_eq!(selection.toggle_rotation(), Rotation::Deg90);
        assert_eq!(selection.toggle_rotation(), Rotation::Deg0);
    }

    #[test]
    fn summary_names_the_selection() {
        let mut selection = Selection::default();
        selection.select_color(7).expect("in range");
        selection.set_mode(Mode::Erase);
        let summary = selection.summary();
        assert_eq!(summary.color, "Orange");
        assert_eq!(summary.mode, Mode::Erase);
        assert_eq!(summary.brick_type, "b11");
    }
}
