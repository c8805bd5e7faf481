//! Bounding volume bundles
//!
//! Every scene object carries one [`Volumes`]: an ellipsoid (used when the
//! object moves), a sphere (used for the cheap overlap pre-check), an
//! axis-aligned box (coarse bounds and debug drawing) and its world matrix.
//! The bundle is computed once from geometry and afterwards only translated, so
//! the bounds and the matrix stay in sync without touching the mesh again.

use crate::foundation::math::{in_unit_interval, Mat4, Mat4Ext, Vec3};
use super::collision::{BoundingBox, BoundingSphere, Ellipsoid, ModelMesh, SweepHit};

/// Bounding volumes and world transform of one object
#[derive(Debug, Clone, PartialEq)]
pub struct Volumes {
    /// Bounding ellipsoid; its axes define the collision space when the object moves
    pub ellipsoid: Ellipsoid,
    /// Bounding sphere for broad-phase rejection
    pub sphere: BoundingSphere,
    /// Axis-aligned bounding box
    pub bounding_box: BoundingBox,
    /// World matrix applied to the object's model-space vertices
    pub matrix: Mat4,
}

impl Volumes {
    /// Compute the volumes of `mesh` placed in the world by `matrix`.
    ///
    /// The ellipsoid is found by normalizing every vertex by the box size on
    /// each axis, taking the farthest normalized vertex as a common radius and
    /// scaling it back per axis. An axis along which the mesh is flat gets a
    /// zero semi-axis.
    pub fn from_mesh(mesh: &ModelMesh, matrix: Mat4) -> Self {
        let world_vertices: Vec<Vec3> = mesh
            .vertices()
            .iter()
            .map(|v| matrix.transform_coord(v))
            .collect();

        let mut bounding_box = BoundingBox::empty();
        for vertex in &world_vertices {
            bounding_box.expand(vertex);
        }
        if bounding_box.is_empty() {
            let origin = matrix.transform_coord(&Vec3::zeros());
            bounding_box = BoundingBox::new(origin, origin);
        }

        let extent = bounding_box.extent();
        let center = bounding_box.center();
        let normalize = |v: &Vec3| {
            Vec3::from_fn(|i, _| if extent[i] > 0.0 { v[i] / extent[i] } else { 0.0 })
        };
        let scaled_center = normalize(&center);

        let mut sphere_radius_sq = 0.0f32;
        let mut ellipsoid_radius_sq = 0.0f32;
        for vertex in &world_vertices {
            sphere_radius_sq = sphere_radius_sq.max((vertex - center).norm_squared());
            ellipsoid_radius_sq = ellipsoid_radius_sq.max((normalize(vertex) - scaled_center).norm_squared());
        }

        let volumes = Self {
            ellipsoid: Ellipsoid::new(center, extent * ellipsoid_radius_sq.sqrt()),
            sphere: BoundingSphere::new(center, sphere_radius_sq.sqrt()),
            bounding_box,
            matrix,
        };

        log::debug!(
            "Bounding volumes: box {:?}..{:?}, sphere r={:.2} at {:?}, ellipsoid axes {:?}",
            volumes.bounding_box.min,
            volumes.bounding_box.max,
            volumes.sphere.radius,
            volumes.sphere.center,
            volumes.ellipsoid.axes,
        );

        volumes
    }

    /// Volumes for a camera: a fixed ellipsoid centered on the camera position
    pub fn for_camera(position: Vec3, axes: Vec3) -> Self {
        let ellipsoid = Ellipsoid::new(position, axes);
        Self {
            sphere: BoundingSphere::new(position, ellipsoid.max_axis()),
            ellipsoid,
            bounding_box: BoundingBox::new(position - axes, position + axes),
            matrix: Mat4::identity(),
        }
    }

    /// Move every volume by `displacement` and prepend the translation to the matrix
    pub fn translate(&mut self, displacement: &Vec3) {
        // Zero displacement leaves every field untouched, bit for bit
        if *displacement == Vec3::zeros() {
            return;
        }

        self.bounding_box.translate(displacement);
        self.sphere.center += displacement;
        self.ellipsoid.center += displacement;
        self.matrix = Mat4::translation(displacement) * self.matrix;
    }

    /// Sphere-overlap pre-check with an extra `tolerance` of slack
    pub fn overlaps(&self, other: &Volumes, tolerance: f32) -> bool {
        self.sphere.intersects(&other.sphere, tolerance)
    }

    /// Sweep this object's bounding sphere by `displacement` against `other`'s.
    ///
    /// Returns the first in-frame contact time and the point on this sphere's
    /// surface facing the other sphere at that time.
    pub fn sweep_sphere(&self, other: &Volumes, displacement: &Vec3) -> Option<SweepHit> {
        let offset = self.sphere.center - other.sphere.center;
        let radius_sum = self.sphere.radius + other.sphere.radius;

        let a = displacement.norm_squared();
        let b = 2.0 * displacement.dot(&offset);
        let c = offset.norm_squared() - radius_sum * radius_sum;

        let (lo, hi) = crate::foundation::math::solve_quadratic(a, b, c)?;
        let time = [lo, hi].into_iter().find(|t| in_unit_interval(*t))?;

        let center = self.sphere.center + displacement * time;
        let toward = (other.sphere.center - center).normalize();
        Some(SweepHit {
            time,
            point: center + toward * self.sphere.radius,
        })
    }
}
