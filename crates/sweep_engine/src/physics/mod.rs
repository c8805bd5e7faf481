//! Physics module for swept collision detection and sliding response
//!
//! Moving objects are approximated by ellipsoids and swept against static
//! triangle geometry (terrain and model meshes). Contacts are resolved by
//! sliding along the touched surface for a bounded number of iterations.

pub mod collision;
pub mod collision_system;
pub mod response;
pub mod volumes;

pub use collision::{
    BoundingBox,
    BoundingSphere,
    Ellipsoid,
    GeometryError,
    ModelMesh,
    Triangle,
    TriangleSource,
};
pub use collision_system::{
    detect_collision,
    CollisionHit,
    CollisionStats,
    CollisionWorld,
    MovingObject,
    Obstacle,
    SceneObject,
    SPHERE_TOLERANCE,
};
pub use response::{collide_and_respond, resolve_displacement, MoveOutcome, ResponseSettings};
pub use volumes::Volumes;
