//! # Sweep Engine
//!
//! Continuous collision detection and sliding response for a first-person
//! camera walking over terrain and around static models.
//!
//! ## Features
//!
//! - **Swept Ellipsoids**: the camera is an ellipsoid swept through static triangles
//! - **Sliding Response**: contacts are resolved by sliding along the touched surface
//! - **Heightmap Terrain**: regular grid terrain with height lookup
//! - **Broad Phase**: bounding sphere rejection before any triangle is tested
//! - **Debug Shapes**: bounding volume and contact visualization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sweep_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SimulationConfig::default();
//!     let terrain = Terrain::flat(64, 64, 10.0, 0.0)?;
//!     let mut scene = Scene::new(config.clone(), Some(terrain), Camera::from_config(&config.camera));
//!
//!     scene.camera.intent = MovementIntent::WALK;
//!     let report = scene.step(1.0 / 60.0);
//!     println!("moved {:?}", report.lateral.committed + report.gravity.committed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod config;
pub mod core;
pub mod debug;
pub mod foundation;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, SimulationConfig},
        debug::{CollisionDebugVisualizer, DebugDrawSystem, DebugShape},
        foundation::math::{Mat4, Mat4Ext, Vec3},
        physics::{
            collide_and_respond,
            detect_collision,
            CollisionHit,
            CollisionStats,
            CollisionWorld,
            GeometryError,
            ModelMesh,
            MoveOutcome,
            MovingObject,
            Obstacle,
            ResponseSettings,
            Volumes,
        },
        scene::{Camera, FrameReport, MovementIntent, Scene, Terrain},
    };
}
