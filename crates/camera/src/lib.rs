#![warn(missing_docs)]
//! First-person camera: orientation, look integration and the crosshair ray.

use byldr_physics::Ray;
use glam::Vec3;
use serde::Serialize;

/// Pitch is clamped to this magnitude to avoid flipping over the vertical.
pub const PITCH_LIMIT: f32 = 1.4;

/// First-person camera with position and yaw/pitch orientation.
///
/// Yaw 0 looks down -Z; positive yaw turns left (counter-clockwise seen from above).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// Camera (eye) position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    /// Create a camera with the given pose.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Forward direction projected onto the ground plane.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Get the right direction vector (camera's local X axis, always horizontal).
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Rotate the camera (add to yaw and pitch).
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation delta in radians
    /// * `delta_pitch` - Vertical rotation delta in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Normalize yaw to [0, 2π)
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Ray through the crosshair (screen centre).
    pub fn crosshair_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}
