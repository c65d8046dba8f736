//! Brick type catalog.
//!
//! The catalog is a fixed table built at startup. Entries are looked up by
//! index (what the picker hands us) or by their short id (`b24`, `p11`, ...).

use crate::geometry::{Footprint, Rotation, BRICK_HEIGHT, PLATE_HEIGHT};
use crate::CatalogError;
use serde::Serialize;

/// Piece family. Bricks and plates differ only in height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrickCategory {
    /// Full-height brick.
    Brick,
    /// Third-height plate.
    Plate,
}

impl BrickCategory {
    /// Height of every piece in this category.
    pub fn height(self) -> f32 {
        match self {
            Self::Brick => BRICK_HEIGHT,
            Self::Plate => PLATE_HEIGHT,
        }
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickType {
    /// Short stable id (`b11`, `p12`, ...).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brick or plate.
    pub category: BrickCategory,
    /// Footprint in catalog orientation.
    pub footprint: Footprint,
}

impl BrickType {
    const fn new(
        id: &'static str,
        name: &'static str,
        category: BrickCategory,
        w: u32,
        l: u32,
    ) -> Self {
        Self {
            id,
            name,
            category,
            footprint: Footprint::new(w, l),
        }
    }

    /// Height derived from the category.
    pub fn height(&self) -> f32 {
        self.category.height()
    }

    /// Effective footprint once `rotation` is applied.
    pub fn footprint_for(&self, rotation: Rotation) -> Footprint {
        self.footprint.rotated(rotation)
    }
}

/// Built-in pieces, in picker order.
pub const BRICK_TYPES: [BrickType; 7] = [
    BrickType::new("b11", "Kostka", BrickCategory::Brick, 1, 1),
    BrickType::new("b21", "Kostka", BrickCategory::Brick, 2, 1),
    BrickType::new("b41", "Kostka", BrickCategory::Brick, 4, 1),
    BrickType::new("b22", "Kostka", BrickCategory::Brick, 2, 2),
    BrickType::new("b24", "Kostka", BrickCategory::Brick, 2, 4),
    BrickType::new("p11", "Plate", BrickCategory::Plate, 1, 1),
    BrickType::new("p12", "Plate", BrickCategory::Plate, 1, 2),
];

/// Read-only view over the piece table.
#[derive(Debug, Clone, Copy)]
pub struct BrickCatalog {
    types: &'static [BrickType],
}

impl Default for BrickCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BrickCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            types: &BRICK_TYPES,
        }
    }

    /// Entry at picker index `index`.
    pub fn get(&self, index: usize) -> Option<&'static BrickType> {
        self.types.get(index)
    }

    /// Picker index of the entry with id `id`.
    pub fn index_of(&self, id: &str) -> Result<usize, CatalogError> {
        self.types
            .iter()
            .position(|ty| ty.id == id)
            .ok_or_else(|| CatalogError::UnknownBrickType(id.to_string()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate entries in picker order.
    pub fn iter(&self) -> impl Iterator<Item = &'static BrickType> {
        self.types.iter()
    }
}
