//! # Core Module
//!
//! Shared configuration for the collision library and the applications built
//! on it.

pub mod config;

pub use config::{
    CameraConfig,
    CollisionConfig,
    Config,
    ConfigError,
    SimulationConfig,
    TerrainConfig,
    WorldConfig,
};
