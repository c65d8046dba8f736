//! Player-vs-world collision resolution.
//!
//! The player is a vertical capsule approximated by an axis-aligned box. Each
//! tick the proposed position is clamped to the ground and then pushed out of
//! every overlapping obstacle along the axis of least penetration. Obstacles
//! are visited once, in the order supplied, against the player box computed
//! after the ground clamp; there is no re-settling pass.

use crate::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Size of the player collision box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDimensions {
    /// Distance from the feet to the eye (the tracked position).
    pub eye_height: f32,
    /// Horizontal half-extent.
    pub radius: f32,
    /// Extra box height above the eye.
    pub headroom: f32,
}

impl Default for PlayerDimensions {
    fn default() -> Self {
        Self {
            eye_height: 1.8,
            radius: 0.4,
            headroom: 0.2,
        }
    }
}

impl PlayerDimensions {
    /// Collision box for an eye at `eye`.
    pub fn aabb_at(&self, eye: Vec3) -> Aabb {
        Aabb::new(
            Vec3::new(eye.x - self.radius, eye.y - self.eye_height, eye.z - self.radius),
            Vec3::new(eye.x + self.radius, eye.y + self.headroom, eye.z + self.radius),
        )
    }
}

/// The part of the player state the resolver reads and corrects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Eye position.
    pub position: Vec3,
    /// Vertical velocity (horizontal motion is direct displacement).
    pub velocity_y: f32,
    /// Whether the player is standing on something and may jump.
    pub can_jump: bool,
}

impl PlayerBody {
    /// A body at rest at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            can_jump: false,
        }
    }
}

/// One correction applied by [`resolve_collisions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Contact {
    /// Clamped to the ground plane.
    Ground,
    /// Pushed up onto an obstacle's top face.
    Landed,
    /// Pushed down below an obstacle's bottom face.
    HeadBump,
    /// Pushed out along X.
    PushedX,
    /// Pushed out along Z.
    PushedZ,
}

/// Resolve `body` against the ground plane and `obstacles`, in place.
///
/// Returns every correction applied, in order.
pub fn resolve_collisions<I>(
    body: &mut PlayerBody,
    dims: &PlayerDimensions,
    obstacles: I,
) -> Vec<Contact>
where
    I: IntoIterator<Item = Aabb>,
{
    let mut contacts = Vec::new();

    if body.position.y < dims.eye_height {
        body.position.y = dims.eye_height;
        body.velocity_y = 0.0;
        body.can_jump = true;
        contacts.push(Contact::Ground);
    }

    let player = dims.aabb_at(body.position);

    for obstacle in obstacles {
        if !player.overlaps(&obstacle) {
            continue;
        }

        let depth = player.overlap_depth(&obstacle);
        let contact = if depth.y < depth.x && depth.y < depth.z {
            body.velocity_y = 0.0;
            if player.min.y < obstacle.min.y {
                body.position.y = obstacle.min.y - dims.headroom;
                Contact::HeadBump
            } else {
                body.position.y = obstacle.max.y + dims.eye_height;
                body.can_jump = true;
                Contact::Landed
            }
        } else if depth.x < depth.z {
            body.position.x = if body.position.x < obstacle.center().x {
                obstacle.min.x - dims.radius
            } else {
                obstacle.max.x + dims.radius
            };
            Contact::PushedX
        } else {
            body.position.z = if body.position.z < obstacle.center().z {
                obstacle.min.z - dims.radius
            } else {
                obstacle.max.z + dims.radius
            };
            Contact::PushedZ
        };

        trace!(?contact, ?depth, position = ?body.position, "resolved obstacle overlap");
        contacts.push(contact);
    }

    contacts
}
