//! Crosshair targeting: where the ghost goes in BUILD mode and which brick is
//! highlighted in ERASE mode.

use crate::brick::BrickId;
use crate::registry::BrickRegistry;
use byldr_core::{snap_to_grid, BrickType, Color, Footprint, Mode, Rotation};
use byldr_physics::{Ray, RayHit};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Targeting limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Maximum ray distance.
    pub reach: f32,
    /// Half-extent of the square floor around the origin.
    pub floor_half_extent: f32,
    /// Distance the hit point is pushed along the face normal before snapping.
    pub surface_nudge: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            reach: 1000.0,
            floor_half_extent: 1000.0,
            surface_nudge: 0.01,
        }
    }
}

/// What the crosshair ray struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// The ground plane.
    Floor,
    /// A sub-part of a placed brick.
    Brick(BrickId),
}

/// Nearest surface hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Surface struck.
    pub surface: Surface,
    /// Geometric hit.
    pub hit: RayHit,
}

/// Cast `ray` against every brick sub-part and, if `include_floor`, the floor.
///
/// The nearest hit wins; ties keep the earlier candidate (floor first, then
/// registry order).
pub fn cast(
    ray: &Ray,
    registry: &BrickRegistry,
    config: &TargetingConfig,
    include_floor: bool,
) -> Option<SurfaceHit> {
    let floor = include_floor
        .then(|| ray.cast_ground(0.0, config.floor_half_extent, config.reach))
        .flatten()
        .map(|hit| SurfaceHit {
            surface: Surface::Floor,
            hit,
        });

    registry
        .parts()
        .filter_map(|part| {
            ray.cast_aabb(&part.bounds, config.reach).map(|hit| SurfaceHit {
                surface: Surface::Brick(part.owner),
                hit,
            })
        })
        .fold(floor, |best, candidate| match best {
            Some(best) if best.hit.distance <= candidate.hit.distance => Some(best),
            _ => Some(candidate),
        })
}

/// Where a new brick would go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Snapped centre.
    pub position: Vec3,
    /// Footprint after rotation.
    pub footprint: Footprint,
    /// Piece height.
    pub height: f32,
}

/// The brick an erase would remove.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EraseTarget {
    /// Brick to remove.
    pub id: BrickId,
    /// Its centre.
    pub position: Vec3,
    /// Its stored footprint.
    pub footprint: Footprint,
    /// Its height.
    pub height: f32,
}

/// Current candidate under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// Nothing targeted; ghost and outline hidden.
    #[default]
    None,
    /// Ghost shown at the placement.
    Build(Placement),
    /// Brick highlighted for removal.
    Erase(EraseTarget),
}

/// Wireframe box drawn around the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    /// Box centre.
    pub position: Vec3,
    /// Box size.
    pub size: Vec3,
    /// White for BUILD, red for ERASE.
    pub color: Color,
}

fn box_size(footprint: Footprint, height: f32) -> Vec3 {
    Vec3::new(footprint.width(), height, footprint.length())
}

impl Target {
    /// Outline for the renderer, if anything is targeted.
    pub fn outline(&self) -> Option<Outline> {
        match self {
            Self::None => None,
            Self::Build(p) => Some(Outline {
                position: p.position,
                size: box_size(p.footprint, p.height),
                color: Color::WHITE,
            }),
            Self::Erase(e) => Some(Outline {
                position: e.position,
                size: box_size(e.footprint, e.height),
                color: Color::RED,
            }),
        }
    }
}

/// Turn a surface hit into a snapped placement for a piece of `footprint`
/// and `height`.
///
/// Returns `None` when the hit names a brick that is no longer registered.
pub fn placement_for_hit(
    hit: &SurfaceHit,
    registry: &BrickRegistry,
    footprint: Footprint,
    height: f32,
    config: &TargetingConfig,
) -> Option<Placement> {
    let normal = hit.hit.normal;
    let nudged = hit.hit.point + normal * config.surface_nudge;
    let (x, z) = snap_to_grid(nudged.x, nudged.z, footprint);
    let half = height * 0.5;

    let y = match hit.surface {
        Surface::Floor => half,
        Surface::Brick(id) => {
            let owner = registry.get(id)?;
            if normal.y > 0.5 {
                owner.top() + half
            } else if normal.y < -0.5 {
                (owner.bottom() - half).max(half)
            } else {
                owner.position.y
            }
        }
    };

    Some(Placement {
        position: Vec3::new(x, y, z),
        footprint,
        height,
    })
}

/// Compute the candidate for `mode` along `ray`.
pub fn compute_target(
    ray: &Ray,
    registry: &BrickRegistry,
    mode: Mode,
    brick_type: &BrickType,
    rotation: Rotation,
    config: &TargetingConfig,
) -> Target {
    match mode {
        Mode::Build => cast(ray, registry, config, true)
            .and_then(|hit| {
                placement_for_hit(
                    &hit,
                    registry,
                    brick_type.footprint_for(rotation),
                    brick_type.height(),
                    config,
                )
            })
            .map_or(Target::None, Target::Build),
        Mode::Erase => {
            let Some(SurfaceHit {
                surface: Surface::Brick(id),
                ..
            }) = cast(ray, registry, config, false)
            else {
                return Target::None;
            };
            registry.get(id).map_or(Target::None, |brick| {
                Target::Erase(EraseTarget {
                    id,
                    position: brick.position,
                    footprint: brick.footprint,
                    height: brick.height,
                })
            })
        }
    }
}
