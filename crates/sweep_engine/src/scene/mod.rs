//! Scene context
//!
//! The [`Scene`] owns everything the walkthrough simulates: the camera, the
//! terrain and the list of collidable objects. The camera's bounding volumes
//! live in the object list like any other object (slot
//! [`camera_object`](Scene::camera_object), without a mesh) so collision
//! queries can skip it by index. The list is only grown through
//! [`Scene::add_model`], so the camera slot always exists.

pub mod camera;
pub mod terrain;

pub use camera::{Camera, MovementIntent};
pub use terrain::Terrain;

use crate::core::config::SimulationConfig;
use crate::foundation::math::{Mat4, Vec3};
use crate::physics::{
    collide_and_respond,
    CollisionStats,
    CollisionWorld,
    ModelMesh,
    MoveOutcome,
    MovingObject,
    SceneObject,
    TriangleSource,
    Volumes,
};

/// What happened to the camera during one [`Scene::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Walking and strafing, resolved against the scene
    pub lateral: MoveOutcome,
    /// Gravity, resolved after the lateral move
    pub gravity: MoveOutcome,
    /// True if the camera's bounding sphere swept into another object's this frame
    pub near_object: bool,
}

/// Camera, terrain and objects of one walkthrough
#[derive(Debug, Clone)]
pub struct Scene {
    /// The moving camera
    pub camera: Camera,
    camera_object: usize,
    /// Terrain, if any
    pub terrain: Option<Terrain>,
    objects: Vec<SceneObject>,
    /// Simulation settings
    pub settings: SimulationConfig,
    /// Collision work counters, accumulated over all frames
    pub stats: CollisionStats,
    /// Result of the last frame's bounding sphere sweep
    pub near_object: bool,
}

impl Scene {
    /// Creates a scene whose only object is the camera
    pub fn new(settings: SimulationConfig, terrain: Option<Terrain>, camera: Camera) -> Self {
        let volumes = Volumes::for_camera(camera.position, settings.camera.ellipsoid_axes());
        log::debug!(
            "Scene created: camera at {:?}, ellipsoid axes {:?}, terrain: {}",
            camera.position,
            volumes.ellipsoid.axes,
            terrain.is_some()
        );

        Self {
            camera,
            camera_object: 0,
            terrain,
            objects: vec![SceneObject::volumes_only(volumes)],
            settings,
            stats: CollisionStats::default(),
            near_object: false,
        }
    }

    /// Add a static model placed by `matrix`; returns its object index
    pub fn add_model(&mut self, mesh: ModelMesh, matrix: Mat4) -> usize {
        let index = self.objects.len();
        log::debug!("Adding model {} with {} triangles", index, mesh.triangle_count());
        self.objects.push(SceneObject::with_mesh(mesh, matrix));
        index
    }

    /// Slot of the camera's volumes in [`objects`](Self::objects)
    pub fn camera_object(&self) -> usize {
        self.camera_object
    }

    /// All objects, the camera's volumes included
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Translate object `index`; returns its updated volumes, or `None` for an unknown index
    pub fn place_object(&mut self, index: usize, displacement: &Vec3) -> Option<&Volumes> {
        let object = self.objects.get_mut(index)?;
        object.volumes.translate(displacement);
        Some(&object.volumes)
    }

    /// Terrain height at world `(x, z)`
    pub fn ground_height(&self, x: f32, z: f32) -> Option<f32> {
        self.terrain.as_ref().and_then(|terrain| terrain.height_at(x, z))
    }

    /// Put the camera `clearance` above the terrain under it.
    ///
    /// Returns the new camera height, or `None` (camera untouched) when there
    /// is no terrain below the camera.
    pub fn snap_to_ground(&mut self, clearance: f32) -> Option<f32> {
        let position = self.camera.position;
        let height = self.ground_height(position.x, position.z)? + clearance;

        let lift = Vec3::new(0.0, height - position.y, 0.0);
        self.camera.position.y = height;
        self.objects[self.camera_object].volumes.translate(&lift);
        log::debug!("Camera snapped to height {:.3}", height);
        Some(height)
    }

    /// Current volumes of the camera
    pub fn camera_volumes(&self) -> &Volumes {
        &self.objects[self.camera_object].volumes
    }

    /// Borrowed view of the scene for collision queries
    pub fn collision_world(&self) -> CollisionWorld<'_> {
        CollisionWorld::new(self.terrain.as_ref().map(|t| t as &dyn TriangleSource), &self.objects)
            .with_sphere_tolerance(self.settings.collision.sphere_tolerance)
    }

    /// Advance the camera by one frame of `elapsed` seconds.
    ///
    /// The walk and strafe intents are resolved first, then gravity, each with
    /// its own iteration budget. If the camera was moved directly since the
    /// last frame, its volumes are brought along before any test runs.
    pub fn step(&mut self, elapsed: f32) -> FrameReport {
        let settings = self.settings.collision.response_settings();
        let lateral_displacement = self.camera.intended_displacement(elapsed, self.settings.camera.walk_speed);
        let gravity_displacement = self.settings.world.gravity() * elapsed;

        let mut moving = MovingObject {
            index: self.camera_object,
            volumes: self.objects[self.camera_object].volumes.clone(),
        };
        let drift = self.camera.position - moving.volumes.ellipsoid.center;
        moving.volumes.translate(&drift);

        self.near_object = self.objects.iter().enumerate().any(|(index, object)| {
            index != self.camera_object
                && object.mesh.is_some()
                && moving.volumes.sweep_sphere(&object.volumes, &lateral_displacement).is_some()
        });

        let world = CollisionWorld::new(self.terrain.as_ref().map(|t| t as &dyn TriangleSource), &self.objects)
            .with_sphere_tolerance(self.settings.collision.sphere_tolerance);

        let lateral = collide_and_respond(
            &settings,
            &mut self.camera.position,
            &world,
            &mut moving,
            lateral_displacement,
            &mut self.stats,
        );
        let gravity = collide_and_respond(
            &settings,
            &mut self.camera.position,
            &world,
            &mut moving,
            gravity_displacement,
            &mut self.stats,
        );

        self.objects[self.camera_object].volumes = moving.volumes;

        log::trace!(
            "Frame {:.4}s: camera at {:?}, lateral {} iterations, gravity {} iterations",
            elapsed,
            self.camera.position,
            lateral.iterations,
            gravity.iterations
        );

        FrameReport {
            lateral,
            gravity,
            near_object: self.near_object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_camera_config() -> SimulationConfig {
        let mut settings = SimulationConfig::default();
        settings.camera.ellipsoid_axes = [1.0, 1.0, 1.0];
        settings
    }

    #[test]
    fn test_camera_is_object_zero_without_mesh() {
        let scene = Scene::new(SimulationConfig::default(), None, Camera::default());
        assert_eq!(scene.camera_object(), 0);
        assert_eq!(scene.objects().len(), 1);
        assert!(scene.objects()[0].mesh.is_none());
        assert_eq!(scene.camera_volumes().ellipsoid.center, scene.camera.position);
        assert_eq!(scene.camera_volumes().ellipsoid.axes, Vec3::new(2.0, 5.0, 2.0));
    }

    #[test]
    fn test_add_and_place_model() {
        let mut scene = Scene::new(SimulationConfig::default(), None, Camera::default());
        let index = scene.add_model(ModelMesh::cuboid(Vec3::new(1.0, 1.0, 1.0)), Mat4::identity());
        assert_eq!(index, 1);

        let volumes = scene.place_object(index, &Vec3::new(5.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(volumes.sphere.center, Vec3::new(5.0, 2.0, 0.0));
        assert!(scene.place_object(7, &Vec3::zeros()).is_none());
    }

    #[test]
    fn test_gravity_settles_on_flat_terrain() {
        let terrain = Terrain::flat(8, 8, 10.0, 0.0).unwrap();
        // Well inside one triangle, away from every edge
        let camera = Camera::new(Vec3::new(33.0, 3.0, 34.0));
        let mut scene = Scene::new(unit_camera_config(), Some(terrain), camera);

        for _ in 0..120 {
            scene.step(1.0 / 30.0);
        }

        let bottom = scene.camera.position.y - 1.0;
        assert!(bottom >= 0.0, "camera sank to {bottom}");
        assert!(bottom < 0.05, "camera hovering at {bottom}");
        assert_relative_eq!(scene.camera_volumes().ellipsoid.center, scene.camera.position, epsilon = 1e-4);
    }

    #[test]
    fn test_walking_into_box_is_blocked_and_flags_near() {
        let mut settings = unit_camera_config();
        settings.world.gravity = [0.0, 0.0, 0.0];
        let mut scene = Scene::new(settings, None, Camera::new(Vec3::new(0.3, 0.2, 10.0)));
        scene.add_model(ModelMesh::cuboid(Vec3::new(2.0, 2.0, 2.0)), Mat4::identity());

        scene.camera.intent = MovementIntent::WALK;
        let mut saw_near = false;
        for _ in 0..60 {
            let report = scene.step(0.1);
            saw_near |= report.near_object;
        }

        assert!(saw_near);
        // Front face of the box is at z = 2, camera radius is 1
        assert!(scene.camera.position.z >= 3.0 - 1e-3, "went through the box: {:?}", scene.camera.position);
        assert!(scene.stats.hits > 0);
    }

    #[test]
    fn test_snap_to_ground() {
        let terrain = Terrain::flat(8, 8, 10.0, 3.0).unwrap();
        let mut scene = Scene::new(SimulationConfig::default(), Some(terrain), Camera::new(Vec3::new(33.0, 20.0, 34.0)));

        assert_eq!(scene.snap_to_ground(5.0), Some(8.0));
        assert_relative_eq!(scene.camera.position, Vec3::new(33.0, 8.0, 34.0));
        assert_relative_eq!(scene.camera_volumes().ellipsoid.center, scene.camera.position);
        assert_relative_eq!(scene.camera_volumes().sphere.center, scene.camera.position);

        // Outside the grid nothing moves
        scene.camera.position = Vec3::new(-5.0, 20.0, 34.0);
        assert_eq!(scene.snap_to_ground(5.0), None);
        assert_eq!(scene.camera.position.y, 20.0);

        let mut bare = Scene::new(SimulationConfig::default(), None, Camera::default());
        assert_eq!(bare.snap_to_ground(5.0), None);
    }

    #[test]
    fn test_direct_camera_moves_are_picked_up() {
        let mut settings = unit_camera_config();
        settings.world.gravity = [0.0, 0.0, 0.0];
        let mut scene = Scene::new(settings, None, Camera::new(Vec3::zeros()));

        scene.camera.fly(4.0, true);
        scene.step(0.016);
        assert_relative_eq!(scene.camera_volumes().ellipsoid.center, Vec3::new(0.0, 4.0, 0.0));
    }
}
