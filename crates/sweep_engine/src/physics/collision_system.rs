//! Aggregate collision detection
//!
//! Follows the usual two-phase split: a broad phase that rejects objects whose
//! bounding spheres are nowhere near the moving object, and a narrow phase that
//! sweeps the moving ellipsoid against every triangle that survives.
//!
//! The narrow phase runs in the moving object's ellipsoid space: the source
//! position, the displacement and every candidate triangle are divided by the
//! ellipsoid axes, which turns the ellipsoid into a unit sphere. Only the
//! winning contact point is scaled back to world space.
//!
//! Nothing here owns scene data. [`CollisionWorld`] borrows the terrain and the
//! object list for the duration of one query.

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::collision::{sweep_unit_sphere, ModelMesh, SweepHit, TriangleSource};
use crate::physics::volumes::Volumes;

/// Default slack added to the bounding sphere overlap test
pub const SPHERE_TOLERANCE: f32 = 1.0;

/// One entry of the scene's object list
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Collision geometry in model space; `None` for objects that only carry
    /// volumes (the camera)
    pub mesh: Option<ModelMesh>,
    /// Bounding volumes and world matrix
    pub volumes: Volumes,
}

impl SceneObject {
    /// Object with geometry, placed in the world by `matrix`
    pub fn with_mesh(mesh: ModelMesh, matrix: Mat4) -> Self {
        let volumes = Volumes::from_mesh(&mesh, matrix);
        Self {
            mesh: Some(mesh),
            volumes,
        }
    }

    /// Object that has volumes but nothing to collide against
    pub fn volumes_only(volumes: Volumes) -> Self {
        Self { mesh: None, volumes }
    }
}

/// The object being moved, identified by its slot in the object list.
///
/// The volumes are carried separately from the list so the controller can
/// update them while the rest of the world stays borrowed.
#[derive(Debug, Clone)]
pub struct MovingObject {
    /// Index of the object in [`CollisionWorld::objects`]; skipped during tests
    pub index: usize,
    /// Current volumes of the moving object
    pub volumes: Volumes,
}

/// Borrowed view over everything a moving object can collide with
#[derive(Clone, Copy)]
pub struct CollisionWorld<'a> {
    /// Terrain triangles, if the scene has terrain
    pub terrain: Option<&'a dyn TriangleSource>,
    /// All scene objects, including the moving one
    pub objects: &'a [SceneObject],
    /// Slack for the bounding sphere pre-check
    pub sphere_tolerance: f32,
}

impl<'a> CollisionWorld<'a> {
    /// Creates a view with the default sphere tolerance
    pub fn new(terrain: Option<&'a dyn TriangleSource>, objects: &'a [SceneObject]) -> Self {
        Self {
            terrain,
            objects,
            sphere_tolerance: SPHERE_TOLERANCE,
        }
    }

    /// Override the sphere tolerance
    pub fn with_sphere_tolerance(mut self, tolerance: f32) -> Self {
        self.sphere_tolerance = tolerance;
        self
    }
}

/// What the moving object ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    /// The terrain heightmap
    Terrain,
    /// Scene object at this index
    Object(usize),
}

/// Earliest contact found by [`detect_collision`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionHit {
    /// What was hit
    pub obstacle: Obstacle,
    /// Fraction of the displacement travelled at contact, in `[0, 1]`
    pub time: f32,
    /// Contact point in world space
    pub point: Vec3,
}

/// Counters describing the work done by collision queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Calls to [`detect_collision`]
    pub queries: u64,
    /// Objects skipped because their bounding spheres did not overlap
    pub sphere_rejections: u64,
    /// Object meshes that went through the triangle sweep
    pub mesh_sweeps: u64,
    /// Individual triangle sweeps, terrain included
    pub triangle_tests: u64,
    /// Queries that found a contact
    pub hits: u64,
}

impl CollisionStats {
    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sweep against every triangle of `source`, all in ellipsoid space.
///
/// Returns the earliest hit; on equal times the first triangle found is kept.
fn sweep_source(
    source: &dyn TriangleSource,
    axes: &Vec3,
    origin: &Vec3,
    velocity: &Vec3,
    stats: &mut CollisionStats,
) -> Option<SweepHit> {
    let mut best: Option<SweepHit> = None;

    for index in 0..source.triangle_count() {
        stats.triangle_tests += 1;
        let triangle = source.triangle(index).scaled_down(axes);
        if let Some(hit) = sweep_unit_sphere(&triangle, origin, velocity) {
            if best.map_or(true, |b| hit.time < b.time) {
                best = Some(hit);
            }
        }
    }

    best
}

/// Find the earliest contact of `moving` travelling by `displacement`.
///
/// The terrain is tested first, then the objects in list order; a later
/// obstacle only wins with a strictly earlier time. The moving object itself
/// and objects without a mesh are skipped, as are objects whose bounding
/// sphere fails the overlap test against the moving object's sphere.
pub fn detect_collision(
    world: &CollisionWorld<'_>,
    moving: &MovingObject,
    displacement: &Vec3,
    stats: &mut CollisionStats,
) -> Option<CollisionHit> {
    stats.queries += 1;

    let ellipsoid = &moving.volumes.ellipsoid;
    let origin = ellipsoid.scaled_center();
    let velocity = ellipsoid.to_ellipsoid_space(displacement);

    let mut best: Option<(Obstacle, SweepHit)> = None;

    if let Some(terrain) = world.terrain {
        if let Some(hit) = sweep_source(terrain, &ellipsoid.axes, &origin, &velocity, stats) {
            best = Some((Obstacle::Terrain, hit));
        }
    }

    for (index, object) in world.objects.iter().enumerate() {
        if index == moving.index {
            continue;
        }
        let Some(mesh) = &object.mesh else {
            continue;
        };

        if !object.volumes.overlaps(&moving.volumes, world.sphere_tolerance) {
            stats.sphere_rejections += 1;
            continue;
        }

        stats.mesh_sweeps += 1;
        let world_mesh = mesh.in_world(&object.volumes.matrix);
        if let Some(hit) = sweep_source(&world_mesh, &ellipsoid.axes, &origin, &velocity, stats) {
            if best.map_or(true, |(_, b)| hit.time < b.time) {
                best = Some((Obstacle::Object(index), hit));
            }
        }
    }

    let (obstacle, hit) = best?;
    stats.hits += 1;

    let point = ellipsoid.to_world_space(&hit.point);
    log::trace!("Collision with {:?} at t={:.4}, point {:?}", obstacle, hit.time, point);

    Some(CollisionHit {
        obstacle,
        time: hit.time,
        point,
    })
}
