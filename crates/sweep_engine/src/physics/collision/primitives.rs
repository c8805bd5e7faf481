//! Primitive collision shapes
//!
//! Provides the basic geometric primitives (triangles, planes, spheres,
//! ellipsoids and boxes) the swept collision tests operate on.

use crate::foundation::math::{in_unit_interval, Vec3};

/// A plane stored as unit normal and signed distance from the origin
///
/// Points `p` on the plane satisfy `normal · p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal of the plane
    pub normal: Vec3,
    /// Signed distance term
    pub d: f32,
}

impl Plane {
    /// Creates a plane through `point` with the given unit normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            d: -normal.dot(&point),
        }
    }

    /// Signed distance from `point` to the plane
    #[inline]
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Orthogonal projection of `point` onto the plane
    #[inline]
    pub fn project(&self, point: &Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }
}

/// A triangle for collision detection
///
/// Corners are in whatever space the caller works in (world space or
/// ellipsoid space); nothing here converts between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner
    pub p0: Vec3,
    /// Second corner
    pub p1: Vec3,
    /// Third corner
    pub p2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self { p0, p1, p2 }
    }

    /// Unit normal `(p2 - p0) x (p1 - p0)`.
    ///
    /// A degenerate triangle yields NaN components.
    pub fn normal(&self) -> Vec3 {
        let n = (self.p2 - self.p0).cross(&(self.p1 - self.p0));
        n / n.norm()
    }

    /// Plane containing the triangle
    pub fn plane(&self) -> Plane {
        Plane::from_point_normal(self.p0, self.normal())
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.p0 + self.p1 + self.p2) / 3.0
    }

    /// Component-wise division of every corner, used to move a triangle into
    /// the ellipsoid space of a moving object
    pub fn scaled_down(&self, axes: &Vec3) -> Triangle {
        Triangle::new(
            self.p0.component_div(axes),
            self.p1.component_div(axes),
            self.p2.component_div(axes),
        )
    }

    /// The three edges as `(start, start -> end)` pairs: p0→p1, p1→p2, p2→p0
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [
            (self.p0, self.p1 - self.p0),
            (self.p1, self.p2 - self.p1),
            (self.p2, self.p0 - self.p2),
        ]
    }

    /// Barycentric point-in-triangle test for a point on the triangle's plane
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let v0 = self.p1 - self.p0;
        let v1 = self.p2 - self.p0;
        let v2 = point - self.p0;

        let v0v0 = v0.dot(&v0);
        let v1v1 = v1.dot(&v1);
        let v0v1 = v0.dot(&v1);
        let v0v2 = v0.dot(&v2);
        let v1v2 = v1.dot(&v2);

        let den = v0v0 * v1v1 - v0v1 * v0v1;
        let u = (v1v1 * v0v2 - v0v1 * v1v2) / den;
        let v = (v0v0 * v1v2 - v0v1 * v0v2) / den;

        in_unit_interval(u) && in_unit_interval(v) && in_unit_interval(u + v)
    }
}

/// A bounding sphere for coarse collision tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere overlaps another, inflated by `tolerance`
    pub fn intersects(&self, other: &BoundingSphere, tolerance: f32) -> bool {
        let distance_squared = (self.center - other.center).norm_squared();
        let radius_sum = self.radius + other.radius + tolerance;
        distance_squared <= radius_sum * radius_sum
    }
}

/// An axis-aligned ellipsoid given by center and semi-axis lengths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Center in world space
    pub center: Vec3,
    /// Semi-axis lengths along x, y and z
    pub axes: Vec3,
}

impl Ellipsoid {
    /// Creates a new ellipsoid
    pub fn new(center: Vec3, axes: Vec3) -> Self {
        Self { center, axes }
    }

    /// Converts a world-space point or vector into this ellipsoid's space
    #[inline]
    pub fn to_ellipsoid_space(&self, v: &Vec3) -> Vec3 {
        v.component_div(&self.axes)
    }

    /// Converts an ellipsoid-space point or vector back into world space
    #[inline]
    pub fn to_world_space(&self, v: &Vec3) -> Vec3 {
        v.component_mul(&self.axes)
    }

    /// Center expressed in ellipsoid space
    #[inline]
    pub fn scaled_center(&self) -> Vec3 {
        self.to_ellipsoid_space(&self.center)
    }

    /// Largest semi-axis
    pub fn max_axis(&self) -> f32 {
        self.axes.x.max(self.axes.y).max(self.axes.z)
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a new box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that any point will expand
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Grow the box to contain `point`
    pub fn expand(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// True until at least one point has been added to an [`empty`](Self::empty) box
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.max - self.min) * 0.5 + self.min
    }

    /// Full size along each axis (absolute difference of the corners)
    pub fn extent(&self) -> Vec3 {
        (self.max - self.min).abs()
    }

    /// The 8 corners, back face (min z) first
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
        ]
    }

    /// The 12 wireframe edges as line segments
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let c = self.corners();
        [
            // back face
            (c[0], c[1]),
            (c[1], c[2]),
            (c[2], c[3]),
            (c[3], c[0]),
            // front face
            (c[4], c[5]),
            (c[5], c[6]),
            (c[6], c[7]),
            (c[7], c[4]),
            // connecting edges
            (c[0], c[4]),
            (c[1], c[5]),
            (c[2], c[6]),
            (c[3], c[7]),
        ]
    }

    /// Shift both corners
    pub fn translate(&mut self, offset: &Vec3) {
        self.min += offset;
        self.max += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_triangle_normal_winding() {
        // (p2 - p0) x (p1 - p0) = z x x = +y
        let normal = unit_triangle().normal();
        assert_relative_eq!(normal, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_point_inside_triangle() {
        let tri = unit_triangle();
        assert!(tri.contains_point(&Vec3::new(0.25, 0.0, 0.25)));
        assert!(tri.contains_point(&tri.p0));
        assert!(tri.contains_point(&Vec3::new(0.5, 0.0, 0.5)));
        assert!(!tri.contains_point(&Vec3::new(0.75, 0.0, 0.75)));
        assert!(!tri.contains_point(&Vec3::new(-0.1, 0.0, 0.2)));
    }

    #[test]
    fn test_degenerate_triangle_contains_nothing() {
        let tri = Triangle::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros());
        assert!(!tri.contains_point(&Vec3::zeros()));
    }

    #[test]
    fn test_plane_projection() {
        let plane = unit_triangle().plane();
        let point = Vec3::new(0.3, 2.5, 0.1);
        assert_relative_eq!(plane.signed_distance(&point), 2.5);
        assert_relative_eq!(plane.project(&point), Vec3::new(0.3, 0.0, 0.1));
    }

    #[test]
    fn test_sphere_intersection_with_tolerance() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(2.5, 0.0, 0.0), 1.0);
        assert!(!a.intersects(&b, 0.0));
        assert!(a.intersects(&b, 1.0));
    }

    #[test]
    fn test_ellipsoid_space_round_trip() {
        let ellipsoid = Ellipsoid::new(Vec3::new(4.0, 10.0, 2.0), Vec3::new(2.0, 5.0, 2.0));
        assert_relative_eq!(ellipsoid.scaled_center(), Vec3::new(2.0, 2.0, 1.0));
        let v = Vec3::new(3.0, -7.0, 1.0);
        assert_relative_eq!(ellipsoid.to_world_space(&ellipsoid.to_ellipsoid_space(&v)), v);
        assert_relative_eq!(ellipsoid.max_axis(), 5.0);
    }

    #[test]
    fn test_box_expand_and_edges() {
        let mut aabb = BoundingBox::empty();
        assert!(aabb.is_empty());
        aabb.expand(&Vec3::new(-1.0, 0.0, 2.0));
        aabb.expand(&Vec3::new(1.0, 4.0, -2.0));
        assert!(!aabb.is_empty());
        assert_relative_eq!(aabb.center(), Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(aabb.extent(), Vec3::new(2.0, 4.0, 4.0));

        for (start, end) in aabb.edges() {
            // Every wireframe edge runs along exactly one axis
            let d = end - start;
            let axes_used = [d.x, d.y, d.z].iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(axes_used, 1);
        }
    }
}
