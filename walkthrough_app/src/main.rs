//! Headless walkthrough demo
//!
//! Builds the terrain-and-crate scene, drives the camera with a scripted
//! sequence of movement intents and logs where the collision system lets it
//! go. Takes an optional path to a `.toml` or `.ron` configuration file.

use sweep_engine::core::config::{Config, ConfigError, SimulationConfig};
use sweep_engine::debug::CollisionDebugVisualizer;
use sweep_engine::foundation::logging;
use sweep_engine::foundation::math::{Mat4, Vec3};
use sweep_engine::physics::{detect_collision, CollisionStats, GeometryError, ModelMesh, MovingObject};
use sweep_engine::scene::{Camera, MovementIntent, Scene, Terrain};

const FRAME_TIME: f32 = 1.0 / 60.0;
const TURN_RATE: f32 = 45.0; // degrees per second
const CRATE_SCALE: f32 = 4.0;
const CRATE_POSITION: (f32, f32) = (50.0, 550.0);

/// Errors that stop the demo before it runs
#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("cannot read heightmap {path}: {source}")]
    Heightmap {
        path: String,
        source: std::io::Error,
    },
}

/// One scripted segment: hold `intent` and a steady mouse drag for `frames` frames
struct Segment {
    label: &'static str,
    intent: MovementIntent,
    mouse: (f32, f32),
    frames: u32,
}

impl Segment {
    fn keys(label: &'static str, intent: MovementIntent, frames: u32) -> Self {
        Self { label, intent, mouse: (0.0, 0.0), frames }
    }
}

fn script() -> Vec<Segment> {
    vec![
        Segment::keys("settle", MovementIntent::empty(), 120),
        Segment::keys("walk towards the crate", MovementIntent::WALK, 240),
        Segment::keys("strafe along it", MovementIntent::STRAFE, 90),
        Segment::keys("turn left", MovementIntent::YAW, 60),
        Segment { label: "walk and look around", intent: MovementIntent::WALK, mouse: (-4.0, 2.0), frames: 120 },
        Segment::keys("back off", MovementIntent::WALK_BACK | MovementIntent::STRAFE_BACK, 120),
    ]
}

fn load_config() -> Result<SimulationConfig, AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            SimulationConfig::load_from_file(&path)?
        }
        None => {
            log::info!("No configuration file given, using defaults");
            SimulationConfig::default()
        }
    };
    config.validate()?;
    Ok(config)
}

fn load_terrain(config: &SimulationConfig) -> Result<Terrain, AppError> {
    let terrain = &config.terrain;
    match &terrain.heightmap_path {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|source| AppError::Heightmap {
                path: path.clone(),
                source,
            })?;
            log::info!("Heightmap {} ({} bytes)", path, bytes.len());
            Ok(Terrain::from_heightmap(
                &bytes,
                terrain.verts_per_row,
                terrain.verts_per_col,
                terrain.cell_spacing,
                terrain.height_scale,
            )?)
        }
        None => {
            log::info!("No heightmap configured, using flat terrain");
            Ok(Terrain::flat(
                terrain.verts_per_row,
                terrain.verts_per_col,
                terrain.cell_spacing,
                0.0,
            )?)
        }
    }
}

fn build_scene(config: SimulationConfig) -> Result<Scene, AppError> {
    let terrain = load_terrain(&config)?;
    let (width, depth) = terrain.extent();
    log::info!(
        "Terrain {}x{} vertices, {} apart ({} x {} units)",
        terrain.verts_per_row(),
        terrain.verts_per_col(),
        terrain.cell_spacing(),
        width,
        depth
    );
    let camera = Camera::from_config(&config.camera);
    let mut scene = Scene::new(config, Some(terrain), camera);

    // A unit crate scaled up and dropped onto the terrain
    let crate_mesh = ModelMesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
    let index = scene.add_model(crate_mesh, Mat4::new_scaling(CRATE_SCALE));
    let (x, z) = CRATE_POSITION;
    let ground = scene.ground_height(x, z).unwrap_or(0.0);
    if let Some(volumes) = scene.place_object(index, &Vec3::new(x, ground + CRATE_SCALE, z)) {
        log::info!("Crate placed at {:?}", volumes.sphere.center);
    }

    // Start standing on the ground instead of dropping in from the configured height
    let clearance = scene.camera_volumes().ellipsoid.axes.y + scene.settings.collision.epsilon;
    match scene.snap_to_ground(clearance) {
        Some(height) => log::info!("Camera starts at height {:.2}", height),
        None => log::warn!("Camera starts outside the terrain at {:?}", scene.camera.position),
    }

    Ok(scene)
}

/// Probe straight down from the camera and mark what is underneath
fn probe_ground(scene: &Scene, visualizer: &mut CollisionDebugVisualizer) {
    let moving = MovingObject {
        index: scene.camera_object(),
        volumes: scene.camera_volumes().clone(),
    };
    let mut stats = CollisionStats::default();
    let probe = Vec3::new(0.0, -10.0, 0.0);

    match detect_collision(&scene.collision_world(), &moving, &probe, &mut stats) {
        Some(hit) => {
            log::debug!("Ground probe: {:?} at {:?}", hit.obstacle, hit.point);
            visualizer.draw_contact(&hit);
        }
        None => log::debug!("Ground probe found nothing within {:?}", probe),
    }
}

fn run(mut scene: Scene) {
    let mut visualizer = CollisionDebugVisualizer::new();
    for (index, object) in scene.objects().iter().enumerate() {
        visualizer.draw_volumes(index, &object.volumes);
    }

    let mut frame = 0u32;
    for segment in script() {
        log::info!("Segment: {} ({} frames)", segment.label, segment.frames);
        scene.camera.intent = segment.intent;
        let sensitivity = scene.settings.camera.mouse_sensitivity;

        for _ in 0..segment.frames {
            scene.camera.rotate_by_intent(TURN_RATE * FRAME_TIME);
            let (dx, dy) = segment.mouse;
            scene.camera.look_around(dx, dy, FRAME_TIME, sensitivity);
            let report = scene.step(FRAME_TIME);

            visualizer.draw_volumes(scene.camera_object(), scene.camera_volumes());
            visualizer.update(FRAME_TIME);

            if report.lateral.collided() {
                log::debug!(
                    "Frame {}: slid {:?} in {} iterations",
                    frame,
                    report.lateral.committed,
                    report.lateral.iterations
                );
            }
            if frame % 30 == 0 {
                probe_ground(&scene, &mut visualizer);
                log::info!(
                    "Frame {:4}: camera at ({:7.2}, {:6.2}, {:7.2}), near object: {}",
                    frame,
                    scene.camera.position.x,
                    scene.camera.position.y,
                    scene.camera.position.z,
                    report.near_object
                );
            }
            frame += 1;
        }
    }

    let stats = &scene.stats;
    log::info!(
        "Done after {} frames: {} queries, {} hits, {} sphere rejections, {} mesh sweeps, {} triangle tests",
        frame,
        stats.queries,
        stats.hits,
        stats.sphere_rejections,
        stats.mesh_sweeps,
        stats.triangle_tests
    );
    log::info!("{} debug shapes recorded", visualizer.debug_draw().shape_count());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    log::info!("Starting walkthrough");

    let config = load_config()?;
    let scene = build_scene(config)?;
    run(scene);

    Ok(())
}
