//! Collision mesh representations
//!
//! Model meshes are stored in MODEL SPACE as a flat vertex buffer plus a
//! triangle index buffer. They are transformed to world space on the fly by the
//! owning object's world matrix during collision tests and never modified.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use super::primitives::Triangle;

/// Errors raised while building collision geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The index buffer does not describe whole triangles
    #[error("index buffer length {0} is not a multiple of 3")]
    PartialTriangle(usize),

    /// An index points past the end of the vertex buffer
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Number of vertices available
        vertex_count: usize,
    },

    /// A heightmap grid needs at least 2x2 vertices to form a cell
    #[error("terrain grid {rows}x{cols} is too small (need at least 2x2)")]
    TerrainTooSmall {
        /// Vertices per row
        rows: usize,
        /// Vertices per column
        cols: usize,
    },

    /// The number of height samples does not match the grid
    #[error("heightmap has {actual} samples, expected {expected}")]
    HeightmapSize {
        /// Samples required by the grid dimensions
        expected: usize,
        /// Samples supplied
        actual: usize,
    },

    /// Cell spacing must be a positive finite number
    #[error("invalid cell spacing {0}")]
    CellSpacing(f32),
}

/// Anything that can hand out triangles by index
///
/// Implemented by the terrain heightmap and by model meshes viewed through a
/// world matrix. The aggregate collision test walks every triangle of a source.
pub trait TriangleSource {
    /// Number of triangles available
    fn triangle_count(&self) -> usize;

    /// Triangle `index` in world space; `index < triangle_count()`
    fn triangle(&self, index: usize) -> Triangle;
}

/// Model geometry as loaded from an asset: vertices plus triangle indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl ModelMesh {
    /// Creates a mesh, validating that indices form whole triangles and stay in range
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, GeometryError> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle(indices.len()));
        }

        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self { vertices, indices })
    }

    /// Axis-aligned box mesh centered on the origin with the given half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        let h = half_extents;
        let vertices = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            3, 2, 1,  3, 1, 0, // back
            4, 5, 6,  4, 6, 7, // front
            7, 3, 0,  7, 0, 4, // bottom
            5, 1, 2,  5, 2, 6, // top
            0, 1, 5,  0, 5, 4, // left
            7, 6, 2,  7, 2, 3, // right
        ];
        Self { vertices, indices }
    }

    /// Model-space vertices
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle corner indices, three per triangle
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles described by the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// View this mesh through a world matrix
    pub fn in_world<'a>(&'a self, matrix: &'a Mat4) -> WorldMesh<'a> {
        WorldMesh { mesh: self, matrix }
    }
}

/// A model mesh seen through its world matrix; borrowed for one query
#[derive(Debug, Clone, Copy)]
pub struct WorldMesh<'a> {
    mesh: &'a ModelMesh,
    matrix: &'a Mat4,
}

impl TriangleSource for WorldMesh<'_> {
    fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    fn triangle(&self, index: usize) -> Triangle {
        let base = index * 3;
        let corner = |k: usize| {
            let vertex = self.mesh.vertices[self.mesh.indices[base + k] as usize];
            self.matrix.transform_coord(&vertex)
        };
        Triangle::new(corner(0), corner(1), corner(2))
    }
}
