//! Debug drawing primitives and system
//!
//! Shapes are only recorded here; whatever renders the scene asks for
//! [`DebugDrawSystem::shapes`] each frame. Temporary shapes expire after their
//! duration, persistent shapes stay until removed by id.

use crate::foundation::math::{Vec3, Vec4};
use std::collections::HashMap;

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Segment start
        start: Vec3,
        /// Segment end
        end: Vec3,
        /// RGBA color
        color: Vec4,
        /// Seconds left to live
        duration: f32,
    },

    /// Sphere at center with radius
    Sphere {
        /// Sphere center
        center: Vec3,
        /// Sphere radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds left to live
        duration: f32,
    },

    /// Axis-aligned ellipsoid
    Ellipsoid {
        /// Ellipsoid center
        center: Vec3,
        /// Semi-axis lengths
        axes: Vec3,
        /// RGBA color
        color: Vec4,
        /// Seconds left to live
        duration: f32,
    },

    /// Point at position
    Point {
        /// Point position
        position: Vec3,
        /// RGBA color
        color: Vec4,
        /// Point size in pixels
        size: f32,
        /// Seconds left to live
        duration: f32,
    },
}

impl DebugShape {
    fn duration_mut(&mut self) -> &mut f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Ellipsoid { duration, .. }
            | DebugShape::Point { duration, .. } => duration,
        }
    }

    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Ellipsoid { duration, .. }
            | DebugShape::Point { duration, .. } => *duration,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        *self.duration_mut() = new_duration;
        self
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = self.duration_mut();
        *duration -= delta_time;
        *duration <= 0.0
    }
}

/// Debug drawing system for rendering debug shapes
///
/// Supports both temporary shapes, which expire after a certain time, and
/// persistent shapes, which remain until explicitly removed.
#[derive(Debug, Clone)]
pub struct DebugDrawSystem {
    /// Temporary shapes that expire after their duration
    temporary_shapes: Vec<DebugShape>,

    /// Persistent shapes that remain until manually removed
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Record a temporary shape
    pub fn draw(&mut self, shape: DebugShape) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.push(shape);
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, duration: f32) {
        self.draw(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    /// Draw a sphere (temporary)
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Vec4, duration: f32) {
        self.draw(DebugShape::Sphere {
            center,
            radius,
            color,
            duration,
        });
    }

    /// Draw a point (temporary)
    pub fn draw_point(&mut self, position: Vec3, color: Vec4, size: f32, duration: f32) {
        self.draw(DebugShape::Point {
            position,
            color,
            size,
            duration,
        });
    }

    /// Draw a persistent shape that remains until explicitly removed
    pub fn draw_persistent(&mut self, id: impl Into<String>, shape: DebugShape) {
        if !self.enabled {
            return;
        }

        self.persistent_shapes.insert(id.into(), shape);
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Remove every persistent shape whose id starts with `prefix`
    pub fn clear_persistent_prefix(&mut self, prefix: &str) {
        self.persistent_shapes.retain(|id, _| !id.starts_with(prefix));
    }

    /// Update shape lifetimes and remove expired temporary shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// All shapes for rendering (both temporary and persistent)
    pub fn shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
            .collect()
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Vec4 {
        Vec4::new(1.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn test_temporary_shape_expiration() {
        let mut system = DebugDrawSystem::new();
        system.draw_sphere(Vec3::zeros(), 1.0, red(), 1.0);
        assert_eq!(system.shape_count(), 1);

        system.update(0.5);
        assert_eq!(system.shape_count(), 1);

        // 1.1 seconds in total
        system.update(0.6);
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_persistent_shapes() {
        let mut system = DebugDrawSystem::new();
        system.draw_persistent(
            "camera_ellipsoid",
            DebugShape::Ellipsoid {
                center: Vec3::zeros(),
                axes: Vec3::new(2.0, 5.0, 2.0),
                color: red(),
                duration: f32::INFINITY,
            },
        );
        assert_eq!(system.shape_count(), 1);

        for _ in 0..100 {
            system.update(1.0);
        }
        assert_eq!(system.shape_count(), 1);

        system.clear_persistent("camera_ellipsoid");
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_disabled_system_records_nothing() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;
        system.draw_line(Vec3::zeros(), Vec3::x(), red(), 1.0);
        system.draw_point(Vec3::zeros(), red(), 4.0, 1.0);
        assert_eq!(system.shape_count(), 0);
        assert!(system.shapes().is_empty());
    }

    #[test]
    fn test_with_duration() {
        let shape = DebugShape::Ellipsoid {
            center: Vec3::zeros(),
            axes: Vec3::new(1.0, 2.0, 1.0),
            color: red(),
            duration: 0.0,
        }
        .with_duration(2.5);
        assert_eq!(shape.duration(), 2.5);
    }
}
