//! Debug module for visualization and debugging tools
//!
//! Records debug shapes for whatever front end draws the scene.

pub mod collision_debug;
pub mod draw;

pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer};
pub use draw::{DebugDrawSystem, DebugShape, DebugShapeId};
