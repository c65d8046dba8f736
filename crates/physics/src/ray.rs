//! Ray casts against boxes and the ground plane.

use crate::Aabb;
use glam::Vec3;

/// A half-line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Direction (normalized).
    pub direction: Vec3,
}

/// Result of a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space position of the hit point.
    pub point: Vec3,
    /// Outward normal of the face that was hit.
    pub normal: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parametric distance `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab-method intersection with `aabb`.
    ///
    /// Only the entering face counts: a ray that starts inside the box does
    /// not hit it. Hits beyond `max_distance` are ignored.
    pub fn cast_aabb(&self, aabb: &Aabb, max_distance: f32) -> Option<RayHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let inv = if dir.abs() > 1e-10 {
                1.0 / dir
            } else {
                f32::MAX * dir.signum()
            };

            let t1 = (aabb.min[axis] - origin) * inv;
            let t2 = (aabb.max[axis] - origin) * inv;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

            if near > t_enter {
                t_enter = near;
                normal = Vec3::ZERO;
                normal[axis] = if dir > 0.0 { -1.0 } else { 1.0 };
            }
            t_exit = t_exit.min(far);
        }

        if t_exit < t_enter || t_enter <= 0.0 || t_enter > max_distance {
            return None;
        }

        Some(RayHit {
            distance: t_enter,
            point: self.at(t_enter),
            normal,
        })
    }

    /// Intersection with the horizontal plane `y = height`, seen from above,
    /// limited to `|x|, |z| <= half_extent`.
    pub fn cast_ground(&self, height: f32, half_extent: f32, max_distance: f32) -> Option<RayHit> {
        if self.direction.y >= 0.0 || self.origin.y <= height {
            return None;
        }

        let distance = (height - self.origin.y) / self.direction.y;
        if distance <= 0.0 || distance > max_distance {
            return None;
        }

        let point = self.at(distance);
        if point.x.abs() > half_extent || point.z.abs() > half_extent {
            return None;
        }

        Some(RayHit {
            distance,
            point,
            normal: Vec3::Y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, Vec3::ONE)
    }

    #[test]
    fn ray_hits_facing_side() {
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::X);
        let hit = ray
            .cast_aabb(&unit_box_at(Vec3::new(5.0, 0.5, 0.0)), 100.0)
            .expect("box ahead");
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn straight_down_ray_hits_top_face() {
        let ray = Ray::new(Vec3::new(0.2, 10.0, 0.3), Vec3::NEG_Y);
        let hit = ray
            .cast_aabb(&unit_box_at(Vec3::new(0.0, 0.5, 0.0)), 100.0)
            .expect("box below");
        assert_eq!(hit.normal, Vec3::Y);
        assert!((hit.point.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_behind_or_beside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ray.cast_aabb(&unit_box_at(Vec3::new(-5.0, 0.0, 0.0)), 100.0).is_none());
        assert!(ray.cast_aabb(&unit_box_at(Vec3::new(5.0, 3.0, 0.0)), 100.0).is_none());
    }

    #[test]
    fn ray_from_inside_box_does_not_hit_it() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ray.cast_aabb(&unit_box_at(Vec3::ZERO), 100.0).is_none());
    }

    #[test]
    fn hits_beyond_reach_are_ignored() {
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.5), Vec3::X);
        assert!(ray.cast_aabb(&unit_box_at(Vec3::new(5.0, 0.5, 0.5)), 3.0).is_none());
    }

    #[test]
    fn ground_hit_needs_downward_ray_inside_extent() {
        let down = Ray::new(Vec3::new(1.0, 2.0, 1.0), Vec3::new(0.0, -1.0, 1.0));
        let hit = down.cast_ground(0.0, 1000.0, 100.0).expect("looking down");
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.point.y.abs() < 1e-5);
        assert!((hit.point.z - 3.0).abs() < 1e-4);

        let up = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!(up.cast_ground(0.0, 1000.0, 100.0).is_none());
        assert!(down.cast_ground(0.0, 2.0, 100.0).is_none());
    }
}
