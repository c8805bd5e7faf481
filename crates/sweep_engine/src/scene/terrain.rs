//! Heightmap terrain
//!
//! A regular grid of height samples. Vertex `(row, col)` sits at
//! `(col * spacing, height, row * spacing)`, so rows run along +z and columns
//! along +x. Every grid cell
//!
//! ```text
//!   A---B
//!   |  /|
//!   | / |
//!   |/  |
//!   C---D
//! ```
//!
//! is split into the triangles `ABC` and `BDC`, both facing up. Triangle `k`
//! of cell `c` has index `2c + k`, with cells numbered row by row.

use crate::foundation::math::Vec3;
use crate::physics::collision::{GeometryError, Triangle, TriangleSource};

/// Static terrain built from a heightmap
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    heights: Vec<f32>,
    verts_per_row: usize,
    verts_per_col: usize,
    cell_spacing: f32,
}

impl Terrain {
    /// Creates a terrain from `verts_per_row * verts_per_col` heights in row order
    pub fn new(
        heights: Vec<f32>,
        verts_per_row: usize,
        verts_per_col: usize,
        cell_spacing: f32,
    ) -> Result<Self, GeometryError> {
        if verts_per_row < 2 || verts_per_col < 2 {
            return Err(GeometryError::TerrainTooSmall {
                rows: verts_per_row,
                cols: verts_per_col,
            });
        }

        let expected = verts_per_row * verts_per_col;
        if heights.len() != expected {
            return Err(GeometryError::HeightmapSize {
                expected,
                actual: heights.len(),
            });
        }

        if !(cell_spacing.is_finite() && cell_spacing > 0.0) {
            return Err(GeometryError::CellSpacing(cell_spacing));
        }

        log::debug!(
            "Terrain {}x{} vertices, spacing {}, {} triangles",
            verts_per_row,
            verts_per_col,
            cell_spacing,
            2 * (verts_per_row - 1) * (verts_per_col - 1)
        );

        Ok(Self {
            heights,
            verts_per_row,
            verts_per_col,
            cell_spacing,
        })
    }

    /// Terrain from raw 8-bit height samples, one byte per vertex
    pub fn from_heightmap(
        bytes: &[u8],
        verts_per_row: usize,
        verts_per_col: usize,
        cell_spacing: f32,
        height_scale: f32,
    ) -> Result<Self, GeometryError> {
        let heights = bytes.iter().map(|&b| f32::from(b) * height_scale).collect();
        Self::new(heights, verts_per_row, verts_per_col, cell_spacing)
    }

    /// Terrain with the same height everywhere
    pub fn flat(
        verts_per_row: usize,
        verts_per_col: usize,
        cell_spacing: f32,
        height: f32,
    ) -> Result<Self, GeometryError> {
        Self::new(
            vec![height; verts_per_row * verts_per_col],
            verts_per_row,
            verts_per_col,
            cell_spacing,
        )
    }

    /// Vertices along x
    pub fn verts_per_row(&self) -> usize {
        self.verts_per_row
    }

    /// Vertices along z
    pub fn verts_per_col(&self) -> usize {
        self.verts_per_col
    }

    /// Distance between neighbouring vertices
    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing
    }

    /// World-space size along x and z
    pub fn extent(&self) -> (f32, f32) {
        (
            (self.verts_per_row - 1) as f32 * self.cell_spacing,
            (self.verts_per_col - 1) as f32 * self.cell_spacing,
        )
    }

    /// Position of vertex `(row, col)`
    pub fn vertex(&self, row: usize, col: usize) -> Vec3 {
        Vec3::new(
            col as f32 * self.cell_spacing,
            self.heights[row * self.verts_per_row + col],
            row as f32 * self.cell_spacing,
        )
    }

    /// Interpolated height at world `(x, z)`, or `None` outside the grid
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let gx = x / self.cell_spacing;
        let gz = z / self.cell_spacing;
        let max_x = (self.verts_per_row - 1) as f32;
        let max_z = (self.verts_per_col - 1) as f32;
        if !((0.0..=max_x).contains(&gx) && (0.0..=max_z).contains(&gz)) {
            return None;
        }

        // The far edges belong to the last cell
        let col = (gx.floor() as usize).min(self.verts_per_row - 2);
        let row = (gz.floor() as usize).min(self.verts_per_col - 2);
        let dx = gx - col as f32;
        let dz = gz - row as f32;

        let h = |r: usize, c: usize| self.heights[r * self.verts_per_row + c];
        let (a, b, c, d) = (h(row, col), h(row, col + 1), h(row + 1, col), h(row + 1, col + 1));

        let height = if dx + dz < 1.0 {
            a + (b - a) * dx + (c - a) * dz
        } else {
            d + (c - d) * (1.0 - dx) + (b - d) * (1.0 - dz)
        };
        Some(height)
    }
}

impl TriangleSource for Terrain {
    fn triangle_count(&self) -> usize {
        2 * (self.verts_per_row - 1) * (self.verts_per_col - 1)
    }

    fn triangle(&self, index: usize) -> Triangle {
        let cell = index / 2;
        let cells_per_row = self.verts_per_row - 1;
        let (row, col) = (cell / cells_per_row, cell % cells_per_row);

        let a = self.vertex(row, col);
        let b = self.vertex(row, col + 1);
        let c = self.vertex(row + 1, col);
        let d = self.vertex(row + 1, col + 1);

        if index % 2 == 0 {
            Triangle::new(a, b, c)
        } else {
            Triangle::new(b, d, c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 3 vertices along x, 2 along z
    fn ramp() -> Terrain {
        #[rustfmt::skip]
        let heights = vec![
            0.0, 1.0, 2.0,
            4.0, 5.0, 6.0,
        ];
        Terrain::new(heights, 3, 2, 10.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            Terrain::new(vec![0.0; 2], 1, 2, 1.0),
            Err(GeometryError::TerrainTooSmall { rows: 1, cols: 2 })
        );
        assert_eq!(
            Terrain::new(vec![0.0; 5], 3, 2, 1.0),
            Err(GeometryError::HeightmapSize { expected: 6, actual: 5 })
        );
        assert_eq!(
            Terrain::new(vec![0.0; 4], 2, 2, 0.0),
            Err(GeometryError::CellSpacing(0.0))
        );
    }

    #[test]
    fn test_triangle_indexing() {
        let terrain = ramp();
        assert_eq!(terrain.triangle_count(), 4);

        // Second cell of the first row: A=(0,1) B=(0,2) C=(1,1) D=(1,2)
        let abc = terrain.triangle(2);
        assert_relative_eq!(abc.p0, Vec3::new(10.0, 1.0, 0.0));
        assert_relative_eq!(abc.p1, Vec3::new(20.0, 2.0, 0.0));
        assert_relative_eq!(abc.p2, Vec3::new(10.0, 5.0, 10.0));

        let bdc = terrain.triangle(3);
        assert_relative_eq!(bdc.p0, Vec3::new(20.0, 2.0, 0.0));
        assert_relative_eq!(bdc.p1, Vec3::new(20.0, 6.0, 10.0));
        assert_relative_eq!(bdc.p2, Vec3::new(10.0, 5.0, 10.0));
    }

    #[test]
    fn test_triangles_face_up() {
        let terrain = ramp();
        for i in 0..terrain.triangle_count() {
            assert!(terrain.triangle(i).normal().y > 0.0, "triangle {i} faces down");
        }
    }

    #[test]
    fn test_height_at_matches_vertices_and_interpolates() {
        let terrain = ramp();
        assert_relative_eq!(terrain.height_at(0.0, 0.0).unwrap(), 0.0);
        assert_relative_eq!(terrain.height_at(20.0, 10.0).unwrap(), 6.0);
        assert_relative_eq!(terrain.height_at(10.0, 10.0).unwrap(), 5.0);

        // First triangle of the first cell
        assert_relative_eq!(terrain.height_at(2.5, 2.5).unwrap(), 0.25 + 1.0, epsilon = 1e-5);
        // Second triangle: D + (C - D)(1 - dx) + (B - D)(1 - dz) with dx = dz = 0.75
        let expected = 5.0 + (4.0 - 5.0) * 0.25 + (1.0 - 5.0) * 0.25;
        assert_relative_eq!(terrain.height_at(7.5, 7.5).unwrap(), expected, epsilon = 1e-5);

        assert!(terrain.height_at(-0.1, 5.0).is_none());
        assert!(terrain.height_at(5.0, 10.5).is_none());
    }

    #[test]
    fn test_height_at_lies_on_collision_triangle() {
        let terrain = ramp();
        let (x, z) = (13.0, 4.0);
        let height = terrain.height_at(x, z).unwrap();
        // Cell 1, triangle ABC (dx + dz = 0.7)
        let plane = terrain.triangle(2).plane();
        assert_relative_eq!(plane.signed_distance(&Vec3::new(x, height, z)), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_from_heightmap_scales_bytes() {
        let terrain = Terrain::from_heightmap(&[0, 10, 200, 255], 2, 2, 5.0, 0.5).unwrap();
        assert_relative_eq!(terrain.vertex(1, 1), Vec3::new(5.0, 127.5, 5.0));
        assert_relative_eq!(terrain.vertex(0, 1), Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(terrain.extent(), (5.0, 5.0));
    }

    #[test]
    fn test_flat() {
        let terrain = Terrain::flat(4, 5, 2.0, 3.0).unwrap();
        assert_eq!(terrain.triangle_count(), 2 * 3 * 4);
        assert_relative_eq!(terrain.height_at(5.0, 7.0).unwrap(), 3.0);
    }
}
