#![warn(missing_docs)]
//! Physics primitives (AABB, ray casts, player collision).

pub mod collision;
pub mod ray;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use collision::{resolve_collisions, Contact, PlayerBody, PlayerDimensions};
pub use ray::{Ray, RayHit};

/// Axis-aligned bounding box used for collisions and picking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (x, y, z).
    pub min: Vec3,
    /// Maximum corner (x, y, z).
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Box of `size` centred on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Centre point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Tests strict overlap with another AABB (touching faces do not count).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmplt(other.max).all() && self.max.cmpgt(other.min).all()
    }

    /// Penetration depth per axis: how far each box reaches into the other
    /// from the shallower side.
    pub fn overlap_depth(&self, other: &Self) -> Vec3 {
        (self.max - other.min).min(other.max - self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_depth_takes_shallow_side() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::new(Vec3::new(1.5, -1.0, 0.5), Vec3::new(4.0, 0.25, 1.0));
        assert!(a.overlaps(&b));
        assert_eq!(a.overlap_depth(&b), Vec3::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn centre_and_size_round_trip() {
        let aabb = Aabb::from_center_size(Vec3::new(1.0, 0.6, -2.0), Vec3::new(2.0, 1.2, 4.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 0.6, -2.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 1.2, 4.0));
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -4.0));
    }
}
