//! Placed bricks and the sub-parts they are built from.

use byldr_core::{Color, Footprint};
use byldr_physics::Aabb;
use glam::Vec3;
use serde::Serialize;
use std::fmt;

/// Edge length of the square box standing in for a stud.
pub const STUD_SIZE: f32 = 0.7;
/// Height of a stud above the brick's top face.
pub const STUD_HEIGHT: f32 = 0.15;

/// Stable identifier of a placed brick. Survives removal and re-insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BrickId(pub u64);

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A brick in the world. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBrick {
    /// Identity.
    pub id: BrickId,
    /// Catalog id of the piece it was built from.
    pub type_id: &'static str,
    /// World-space centre.
    pub position: Vec3,
    /// Footprint after rotation.
    pub footprint: Footprint,
    /// Body height.
    pub height: f32,
    /// Body colour.
    pub color: Color,
}

/// Which piece of a brick a [`BrickPart`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// The main box.
    Body,
    /// A stud on the top face, indexed by footprint cell.
    Stud {
        /// Cell along X.
        x: u32,
        /// Cell along Z.
        z: u32,
    },
}

/// A pickable sub-part. Always carries the id of the brick that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickPart {
    /// Owning brick.
    pub owner: BrickId,
    /// Body or stud.
    pub kind: PartKind,
    /// World-space bounds.
    pub bounds: Aabb,
}

impl PlacedBrick {
    /// Body size.
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.footprint.width(), self.height, self.footprint.length())
    }

    /// Body bounds (what the player collides with).
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size())
    }

    /// Y of the top face (excluding studs).
    pub fn top(&self) -> f32 {
        self.position.y + self.height * 0.5
    }

    /// Y of the bottom face.
    pub fn bottom(&self) -> f32 {
        self.position.y - self.height * 0.5
    }

    /// Body followed by one stud per footprint cell.
    pub fn parts(&self) -> impl Iterator<Item = BrickPart> + '_ {
        let owner = self.id;
        let body = BrickPart {
            owner,
            kind: PartKind::Body,
            bounds: self.aabb(),
        };

        let origin_x = self.position.x - (self.footprint.w as f32 - 1.0) * 0.5;
        let origin_z = self.position.z - (self.footprint.l as f32 - 1.0) * 0.5;
        let stud_y = self.top() + STUD_HEIGHT * 0.5;
        let studs = (0..self.footprint.w).flat_map(move |x| {
            (0..self.footprint.l).map(move |z| BrickPart {
                owner,
                kind: PartKind::Stud { x, z },
                bounds: Aabb::from_center_size(
                    Vec3::new(origin_x + x as f32, stud_y, origin_z + z as f32),
                    Vec3::new(STUD_SIZE, STUD_HEIGHT, STUD_SIZE),
                ),
            })
        });

        std::iter::once(body).chain(studs)
    }
}
