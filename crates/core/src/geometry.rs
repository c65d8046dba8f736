//! Grid model: unit sizes, footprints, rotation and coordinate snapping.
//!
//! The horizontal plane is divided into unit cells whose centres sit on
//! integer coordinates. A piece spanning an odd number of cells along an axis
//! is centred on an integer; an even span is centred on a half-integer. This
//! keeps every stud on a cell centre no matter the piece size.

use serde::{Deserialize, Serialize};

/// Edge length of one grid cell in world units.
pub const UNIT: f32 = 1.0;
/// Height of a full brick.
pub const BRICK_HEIGHT: f32 = 1.2;
/// Height of a plate (a third of a brick).
pub const PLATE_HEIGHT: f32 = 0.4;

/// Yaw rotation of a piece. Only quarter turns that swap the footprint exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// Catalog orientation.
    #[default]
    Deg0,
    /// Quarter turn: width and length swap.
    Deg90,
}

impl Rotation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg0,
        }
    }

    /// Rotation in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
        }
    }
}

/// Horizontal size of a piece in grid cells (`w` along X, `l` along Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Cells along X.
    pub w: u32,
    /// Cells along Z.
    pub l: u32,
}

impl Footprint {
    /// Create a footprint.
    pub const fn new(w: u32, l: u32) -> Self {
        Self { w, l }
    }

    /// Footprint after applying `rotation`.
    pub fn rotated(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Deg0 => self,
            Rotation::Deg90 => Self::new(self.l, self.w),
        }
    }

    /// World-space extent along X.
    pub fn width(self) -> f32 {
        self.w as f32 * UNIT
    }

    /// World-space extent along Z.
    pub fn length(self) -> f32 {
        self.l as f32 * UNIT
    }

    /// Number of cells covered (one stud per cell).
    pub fn cells(self) -> u32 {
        self.w * self.l
    }
}

/// Snap one horizontal coordinate to the nearest valid centre for a span of `cells`.
pub fn snap_axis(coord: f32, cells: u32) -> f32 {
    let scaled = coord / UNIT;
    let snapped = if cells % 2 == 1 {
        scaled.round()
    } else {
        (scaled - 0.5).round() + 0.5
    };
    snapped * UNIT
}

/// Snap a horizontal point `(x, z)` to the centre a piece of `footprint` would occupy.
pub fn snap_to_grid(x: f32, z: f32, footprint: Footprint) -> (f32, f32) {
    (snap_axis(x, footprint.w), snap_axis(z, footprint.l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_spans_centre_on_integers() {
        assert_eq!(snap_axis(2.3, 1), 2.0);
        assert_eq!(snap_axis(-0.7, 3), -1.0);
    }

    #[test]
    fn even_spans_centre_on_half_integers() {
        assert_eq!(snap_axis(2.3, 2), 2.5);
        assert_eq!(snap_axis(1.9, 4), 1.5);
        assert_eq!(snap_axis(-0.2, 2), -0.5);
    }

    #[test]
    fn rotation_swaps_width_and_length() {
        let footprint = Footprint::new(2, 4);
        assert_eq!(footprint.rotated(Rotation::Deg90), Footprint::new(4, 2));
        assert_eq!(footprint.rotated(Rotation::Deg0), footprint);
    }

    #[test]
    fn rotation_toggles_back_and_forth() {
        assert_eq!(Rotation::Deg0.toggled(), Rotation::Deg90);
        assert_eq!(Rotation::Deg0.toggled().toggled(), Rotation::Deg0);
        assert_eq!(Rotation::Deg90.degrees(), 90);
    }

    #[test]
    fn mixed_parity_snaps_each_axis_independently() {
        let (x, z) = snap_to_grid(0.2, 0.2, Footprint::new(1, 2));
        assert_eq!(x, 0.0);
        assert_eq!(z, 0.5);
    }
}
