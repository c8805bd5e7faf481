//! Swept collision detection primitives
//!
//! # Architecture
//!
//! The moving object is an ellipsoid. Every test divides positions and
//! displacements component-wise by the ellipsoid's semi-axes first, which turns
//! the problem into a unit sphere sweeping through scaled geometry, then
//! multiplies contact points back into world space.
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (triangles, planes, spheres, ellipsoids, boxes)
//! - [`sweep`] - Swept unit sphere against a single triangle
//! - [`mesh`] - Model meshes and the [`TriangleSource`] abstraction

pub mod primitives;
pub mod sweep;
pub mod mesh;

// Re-export commonly used types
pub use primitives::{BoundingBox, BoundingSphere, Ellipsoid, Plane, Triangle};
pub use sweep::{sweep_unit_sphere, SweepHit};
pub use mesh::{GeometryError, ModelMesh, TriangleSource, WorldMesh};
