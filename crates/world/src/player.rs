//! First-person player controller: look, jump, walk, gravity, collision.

use byldr_camera::Camera;
use byldr_input::FrameInput;
use byldr_physics::{resolve_collisions, Aabb, Contact, PlayerBody, PlayerDimensions};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Movement constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed in units per second at full stick.
    pub move_speed: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Upward velocity set by a jump.
    pub jump_velocity: f32,
    /// Eye position at session start.
    pub spawn: Vec3,
    /// Collision box.
    pub dimensions: PlayerDimensions,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            gravity: 30.0,
            jump_velocity: 12.0,
            spawn: Vec3::new(5.0, 1.8, 10.0),
            dimensions: PlayerDimensions::default(),
        }
    }
}

/// Player pose and motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerState {
    /// Position, vertical velocity and jump flag.
    pub body: PlayerBody,
    /// Yaw in `[0, 2π)`.
    pub yaw: f32,
    /// Pitch in `[-1.4, 1.4]`.
    pub pitch: f32,
}

impl PlayerState {
    /// Player standing at `spawn`, looking down -Z.
    pub fn spawn(spawn: Vec3) -> Self {
        Self {
            body: PlayerBody::at(spawn),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Eye position.
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Camera at the eye.
    pub fn camera(&self) -> Camera {
        Camera::new(self.body.position, self.yaw, self.pitch)
    }
}

/// Integrates [`PlayerState`] once per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerController {
    tuning: PlayerTuning,
}

impl PlayerController {
    /// Controller with the given constants.
    pub fn new(tuning: PlayerTuning) -> Self {
        Self { tuning }
    }

    /// Fresh state at the spawn point.
    pub fn spawn(&self) -> PlayerState {
        PlayerState::spawn(self.tuning.spawn)
    }

    /// Advance `state` by `dt` seconds against `obstacles`.
    ///
    /// Look is applied first so movement uses the new heading; collision runs
    /// last against the integrated position.
    pub fn step<I>(
        &self,
        state: &mut PlayerState,
        input: &FrameInput,
        dt: f32,
        obstacles: I,
    ) -> Vec<Contact>
    where
        I: IntoIterator<Item = Aabb>,
    {
        let mut camera = state.camera();
        camera.rotate(input.look_delta.x, input.look_delta.y);
        state.yaw = camera.yaw;
        state.pitch = camera.pitch;

        let body = &mut state.body;
        if input.jump && body.can_jump {
            body.velocity_y = self.tuning.jump_velocity;
            body.can_jump = false;
        }

        let axis = input.move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let heading = camera.right() * axis.x + camera.flat_forward() * axis.y;
        body.position += heading * self.tuning.move_speed * dt;

        body.velocity_y -= self.tuning.gravity * dt;
        body.position.y += body.velocity_y * dt;

        resolve_collisions(body, &self.tuning.dimensions, obstacles)
    }
}
