//! # Simulation Configuration
//!
//! All tunables of the walkthrough simulation in one serializable structure,
//! grouped by subsystem. Every group has defaults, so a config file only needs
//! the values it wants to change.
//!
//! ## Configuration Categories
//!
//! - **Collision**: iteration cap, back-off epsilon, broad-phase tolerance
//! - **Camera**: start position, bounding ellipsoid, movement and look limits
//! - **World**: gravity
//! - **Terrain**: heightmap grid dimensions and source

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::physics::{ResponseSettings, SPHERE_TOLERANCE};

pub use crate::config::{Config, ConfigError};

/// Collision detection and response tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Detect/respond iterations allowed per move
    pub max_iterations: u32,
    /// Back-off fraction at each contact; also the smallest displacement still processed
    pub epsilon: f32,
    /// Extra distance allowed in the bounding sphere pre-check
    pub sphere_tolerance: f32,
}

impl CollisionConfig {
    /// Settings for the sliding response controller
    pub fn response_settings(&self) -> ResponseSettings {
        ResponseSettings {
            max_iterations: self.max_iterations,
            epsilon: self.epsilon,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            epsilon: 0.1,
            sphere_tolerance: SPHERE_TOLERANCE,
        }
    }
}

/// First-person camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Start position in world space
    pub position: [f32; 3],
    /// Semi-axes of the camera's bounding ellipsoid
    pub ellipsoid_axes: [f32; 3],
    /// Walk and strafe speed in units per second
    pub walk_speed: f32,
    /// Degrees of rotation per unit of mouse movement
    pub mouse_sensitivity: f32,
    /// Pitch limit in degrees, either direction
    pub max_pitch: f32,
    /// Roll limit in degrees, either direction
    pub max_roll: f32,
}

impl CameraConfig {
    /// Start position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Ellipsoid semi-axes as a vector
    pub fn ellipsoid_axes(&self) -> Vec3 {
        Vec3::from(self.ellipsoid_axes)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [50.0, 20.0, 600.0],
            ellipsoid_axes: [2.0, 5.0, 2.0],
            walk_speed: 30.0,
            mouse_sensitivity: 10.0,
            max_pitch: 60.0,
            max_roll: 20.0,
        }
    }
}

/// Global forces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity acceleration, applied as `gravity * elapsed` each frame
    pub gravity: [f32; 3],
}

impl WorldConfig {
    /// Gravity as a vector
    pub fn gravity(&self) -> Vec3 {
        Vec3::from(self.gravity)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.8, 0.0],
        }
    }
}

/// Terrain heightmap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Vertices along each row (x direction)
    pub verts_per_row: usize,
    /// Vertices along each column (z direction)
    pub verts_per_col: usize,
    /// Distance between neighbouring vertices
    pub cell_spacing: f32,
    /// Multiplier applied to the raw 8-bit height samples
    pub height_scale: f32,
    /// Raw heightmap file, one byte per vertex; flat terrain when absent
    pub heightmap_path: Option<String>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            verts_per_row: 64,
            verts_per_col: 64,
            cell_spacing: 10.0,
            height_scale: 1.0,
            heightmap_path: None,
        }
    }
}

/// Complete simulation configuration
///
/// This is the main configuration structure the walkthrough loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Collision tuning
    pub collision: CollisionConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// World forces
    pub world: WorldConfig,
    /// Terrain settings
    pub terrain: TerrainConfig,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl SimulationConfig {
    /// Check the values that would break the collision math
    pub fn validate(&self) -> Result<(), ConfigError> {
        let collision = &self.collision;
        if collision.max_iterations == 0 {
            return Err(invalid("collision.max_iterations", "must be at least 1"));
        }
        if !(collision.epsilon > 0.0 && collision.epsilon < 1.0) {
            return Err(invalid(
                "collision.epsilon",
                format!("{} is outside (0, 1)", collision.epsilon),
            ));
        }
        if !(collision.sphere_tolerance >= 0.0) {
            return Err(invalid(
                "collision.sphere_tolerance",
                format!("{} is negative", collision.sphere_tolerance),
            ));
        }

        let camera = &self.camera;
        if camera.ellipsoid_axes.iter().any(|axis| !(axis.is_finite() && *axis > 0.0)) {
            return Err(invalid(
                "camera.ellipsoid_axes",
                format!("{:?} must be positive", camera.ellipsoid_axes),
            ));
        }
        if !(camera.max_pitch >= 0.0 && camera.max_roll >= 0.0) {
            return Err(invalid("camera.max_pitch", "angle limits must not be negative"));
        }

        let terrain = &self.terrain;
        if terrain.verts_per_row < 2 || terrain.verts_per_col < 2 {
            return Err(invalid(
                "terrain.verts_per_row",
                format!(
                    "{}x{} grid is smaller than one cell",
                    terrain.verts_per_row, terrain.verts_per_col
                ),
            ));
        }
        if !(terrain.cell_spacing.is_finite() && terrain.cell_spacing > 0.0) {
            return Err(invalid(
                "terrain.cell_spacing",
                format!("{} must be positive", terrain.cell_spacing),
            ));
        }

        Ok(())
    }
}

impl Config for SimulationConfig {}
