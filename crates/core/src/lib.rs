#![warn(missing_docs)]
//! Core primitives shared across the workspace: the grid model, the brick
//! catalog and the colour palette.

pub mod catalog;
pub mod geometry;
pub mod palette;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use catalog::{BrickCatalog, BrickCategory, BrickType, BRICK_TYPES};
pub use geometry::{snap_axis, snap_to_grid, Footprint, Rotation, BRICK_HEIGHT, PLATE_HEIGHT, UNIT};
pub use palette::{Color, NamedColor, Palette, COLORS};

/// Simulation tick counter (one tick per rendered frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick of every session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// What the action trigger does: place the ghost or erase the brick under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Place a new brick at the ghost.
    #[default]
    Build,
    /// Remove the targeted brick.
    Erase,
}

impl Mode {
    /// Parse a mode name (`build` / `erase`, case-insensitive).
    pub fn parse(input: &str) -> Result<Self, CatalogError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "build" => Ok(Self::Build),
            "erase" => Ok(Self::Erase),
            other => Err(CatalogError::UnknownMode(other.to_string())),
        }
    }
}

/// Errors raised when looking up catalog, palette or mode names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No catalog entry has this id.
    #[error("unknown brick type `{0}`")]
    UnknownBrickType(String),
    /// No palette entry has this name.
    #[error("unknown colour `{0}`")]
    UnknownColor(String),
    /// Mode name is neither `build` nor `erase`.
    #[error("unknown mode `{0}`")]
    UnknownMode(String),
}
