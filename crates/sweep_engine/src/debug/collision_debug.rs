//! Collision-specific debug visualization
//!
//! Turns bounding volumes and collision hits into debug shapes: box
//! wireframes, bounding spheres, moving ellipsoids and contact points.

use crate::debug::draw::{DebugDrawSystem, DebugShape};
use crate::foundation::math::Vec4;
use crate::physics::{CollisionHit, Obstacle, Volumes};

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Bounding box wireframe
    pub bounding_box: Vec4,
    /// Bounding sphere
    pub sphere: Vec4,
    /// Bounding ellipsoid
    pub ellipsoid: Vec4,
    /// Contact with the terrain
    pub terrain_contact: Vec4,
    /// Contact with a scene object
    pub object_contact: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            bounding_box: Vec4::new(0.0, 0.0, 1.0, 0.2),    // Blue, transparent
            sphere: Vec4::new(0.5, 0.8, 1.0, 0.15),         // Light blue, transparent
            ellipsoid: Vec4::new(0.0, 1.0, 0.0, 0.3),       // Green, semi-transparent
            terrain_contact: Vec4::new(1.0, 1.0, 0.0, 1.0), // Yellow
            object_contact: Vec4::new(1.0, 0.0, 0.0, 1.0),  // Red
        }
    }
}

/// Collision-specific debug visualizer
///
/// Volumes are kept as persistent shapes keyed by object index and replaced on
/// every redraw; contacts are temporary points.
#[derive(Debug, Clone)]
pub struct CollisionDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: CollisionDebugColors,

    /// Seconds a contact point stays visible
    pub contact_duration: f32,

    /// Show bounding boxes
    pub show_boxes: bool,

    /// Show bounding spheres
    pub show_spheres: bool,

    /// Show bounding ellipsoids
    pub show_ellipsoids: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: CollisionDebugColors::default(),
            contact_duration: 1.0,
            show_boxes: true,
            show_spheres: true,
            show_ellipsoids: true,
        }
    }

    fn key(id: usize) -> String {
        format!("volumes_{id}_")
    }

    /// Draw (or redraw) the volumes of object `id`
    pub fn draw_volumes(&mut self, id: usize, volumes: &Volumes) {
        let key = Self::key(id);
        self.debug_draw.clear_persistent_prefix(&key);

        if self.show_boxes {
            for (edge, (start, end)) in volumes.bounding_box.edges().into_iter().enumerate() {
                self.debug_draw.draw_persistent(
                    format!("{key}edge_{edge}"),
                    DebugShape::Line {
                        start,
                        end,
                        color: self.colors.bounding_box,
                        duration: f32::INFINITY,
                    },
                );
            }
        }

        if self.show_spheres {
            self.debug_draw.draw_persistent(
                format!("{key}sphere"),
                DebugShape::Sphere {
                    center: volumes.sphere.center,
                    radius: volumes.sphere.radius,
                    color: self.colors.sphere,
                    duration: f32::INFINITY,
                },
            );
        }

        if self.show_ellipsoids {
            self.debug_draw.draw_persistent(
                format!("{key}ellipsoid"),
                DebugShape::Ellipsoid {
                    center: volumes.ellipsoid.center,
                    axes: volumes.ellipsoid.axes,
                    color: self.colors.ellipsoid,
                    duration: f32::INFINITY,
                },
            );
        }
    }

    /// Mark a contact point
    pub fn draw_contact(&mut self, hit: &CollisionHit) {
        let color = match hit.obstacle {
            Obstacle::Terrain => self.colors.terrain_contact,
            Obstacle::Object(_) => self.colors.object_contact,
        };
        self.debug_draw.draw_point(hit.point, color, 6.0, self.contact_duration);
    }

    /// Remove the volumes of object `id`
    pub fn clear_volumes(&mut self, id: usize) {
        self.debug_draw.clear_persistent_prefix(&Self::key(id));
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.debug_draw.clear();
    }

    /// Update debug system (expire temporary shapes)
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Get all debug shapes for rendering
    pub fn shapes(&self) -> Vec<&DebugShape> {
        self.debug_draw.shapes()
    }

    /// Enable/disable the entire debug system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
    }

    /// Check if debug system is enabled
    pub fn is_enabled(&self) -> bool {
        self.debug_draw.enabled
    }

    /// Get reference to underlying debug draw system
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
