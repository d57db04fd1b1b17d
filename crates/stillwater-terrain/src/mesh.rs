//! Terrain grid mesh generation

use crate::noise::HeightField;
use crate::region::{apply_region_modifiers, RegionParams};
use crate::tangent::{accumulate_normals, compute_tangents};

/// A single terrain vertex, mutable during construction.
///
/// After `TerrainMesh::generate` the normal, tangent, and bitangent are
/// unit length and the tangent is orthogonal to the normal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

/// Parameters for terrain generation
pub struct TerrainParams {
    /// Number of grid cells per edge (vertices per edge = grid_size + 1)
    pub grid_size: u32,
    /// World-space size of one grid cell
    pub tile_size: f32,
    /// Region (lake/mountain/plain) shaping parameters
    pub region: RegionParams,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            grid_size: 256,
            tile_size: 1.0,
            region: RegionParams::default(),
        }
    }
}

/// A generated terrain mesh: a regular grid of vertices plus its index list
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    pub grid_size: u32,
}

impl TerrainMesh {
    /// Generate the full terrain mesh.
    ///
    /// Pipeline order matters: raw heights, then region modifiers, then
    /// normals, then tangents. Region modifiers rewrite heights, so the
    /// normal pass must not run before them; the tangent pass consumes the
    /// finalized normals.
    pub fn generate(field: &HeightField, params: &TerrainParams) -> Self {
        let mut vertices = build_height_grid(field, params.grid_size, params.tile_size);

        apply_region_modifiers(&mut vertices, params.grid_size, field, &params.region);

        let indices = build_grid_indices(params.grid_size);

        accumulate_normals(&mut vertices, &indices);
        compute_tangents(&mut vertices, &indices);

        Self {
            vertices,
            indices,
            grid_size: params.grid_size,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Sample the height field over the grid and fill in positions, colors, and
/// UVs. Normals are a placeholder (straight up) until the accumulation pass.
fn build_height_grid(field: &HeightField, grid_size: u32, tile_size: f32) -> Vec<TerrainVertex> {
    let verts_per_edge = (grid_size + 1) as usize;
    let mut vertices = vec![TerrainVertex::default(); verts_per_edge * verts_per_edge];

    for z in 0..=grid_size {
        for x in 0..=grid_size {
            let fx = x as f32 * tile_size;
            let fz = z as f32 * tile_size;
            let height = field.height(fx, fz);

            let vertex = &mut vertices[z as usize * verts_per_edge + x as usize];
            // Grid rows extend into -Z
            vertex.position = [fx, height, -fz];

            // Debug visualization only: green above water level zero, blue below
            vertex.color = if height > 0.0 {
                [0.0, 1.0, 0.0, 1.0]
            } else {
                [0.0, 0.0, 1.0, 1.0]
            };

            vertex.normal = [0.0, 1.0, 0.0];
            vertex.uv = [x as f32 / grid_size as f32, z as f32 / grid_size as f32];
        }
    }

    vertices
}

/// Emit two triangles per grid cell.
///
/// Rows extend into -Z, so (tl, tr, bl) / (tr, br, bl) is counter-clockwise
/// seen from above. The normal accumulation pass relies on this order for
/// face-normal sign, and the pipelines treat counter-clockwise as front
/// facing; do not reorder.
fn build_grid_indices(grid_size: u32) -> Vec<u32> {
    let verts_per_edge = grid_size + 1;
    let mut indices = Vec::with_capacity((grid_size * grid_size * 6) as usize);

    for z in 0..grid_size {
        for x in 0..grid_size {
            let top_left = z * verts_per_edge + x;
            let top_right = top_left + 1;
            let bottom_left = (z + 1) * verts_per_edge + x;
            let bottom_right = bottom_left + 1;

            indices.push(top_left);
            indices.push(top_right);
            indices.push(bottom_left);

            indices.push(top_right);
            indices.push(bottom_right);
            indices.push(bottom_left);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::DEFAULT_SEED;

    fn no_regions() -> RegionParams {
        RegionParams {
            lakes: 0,
            mountains: 0,
            plains: 0,
            ..RegionParams::default()
        }
    }

    #[test]
    fn index_buffer_has_six_indices_per_cell() {
        let field = HeightField::new(DEFAULT_SEED);
        let params = TerrainParams {
            grid_size: 8,
            tile_size: 1.0,
            region: no_regions(),
        };
        let mesh = TerrainMesh::generate(&field, &params);

        assert_eq!(mesh.indices.len(), 6 * 8 * 8);
        assert_eq!(mesh.vertices.len(), 9 * 9);
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.vertices.len());
        }
    }

    #[test]
    fn grid_triangles_wind_counter_clockwise_from_above() {
        // Every face of a grid mesh must face upward once heights are flat,
        // otherwise back-face culling removes the terrain entirely.
        let indices = build_grid_indices(4);
        let verts_per_edge = 5u32;

        for tri in indices.chunks_exact(3) {
            let pos = |i: u32| {
                let x = (i % verts_per_edge) as f32;
                let z = (i / verts_per_edge) as f32;
                [x, 0.0, -z]
            };
            let (p0, p1, p2) = (pos(tri[0]), pos(tri[1]), pos(tri[2]));
            let e1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
            let e2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
            let cross_y = e1[2] * e2[0] - e1[0] * e2[2];
            assert!(cross_y > 0.0, "triangle {tri:?} faces downward");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let params = || TerrainParams {
            grid_size: 16,
            tile_size: 2.0,
            region: RegionParams::default(),
        };
        let a = TerrainMesh::generate(&HeightField::new(DEFAULT_SEED), &params());
        let b = TerrainMesh::generate(&HeightField::new(DEFAULT_SEED), &params());

        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn raw_heights_match_noise_sum_without_regions() {
        let field = HeightField::new(DEFAULT_SEED);
        let params = TerrainParams {
            grid_size: 4,
            tile_size: 1.0,
            region: no_regions(),
        };
        let mesh = TerrainMesh::generate(&field, &params);

        for z in 0..=4u32 {
            for x in 0..=4u32 {
                let v = &mesh.vertices[(z * 5 + x) as usize];
                let expected = field.height(x as f32, z as f32);
                assert!((v.position[1] - expected).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn positions_and_uvs_follow_grid_layout() {
        let field = HeightField::new(DEFAULT_SEED);
        let params = TerrainParams {
            grid_size: 4,
            tile_size: 2.0,
            region: no_regions(),
        };
        let mesh = TerrainMesh::generate(&field, &params);

        let v = &mesh.vertices[(3 * 5 + 2) as usize]; // x=2, z=3
        assert_eq!(v.position[0], 4.0);
        assert_eq!(v.position[2], -6.0);
        assert!((v.uv[0] - 0.5).abs() < 1e-6);
        assert!((v.uv[1] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn debug_color_tracks_height_sign() {
        let field = HeightField::new(DEFAULT_SEED);
        let params = TerrainParams {
            grid_size: 8,
            tile_size: 1.0,
            region: no_regions(),
        };
        let mesh = TerrainMesh::generate(&field, &params);

        for v in &mesh.vertices {
            if v.position[1] > 0.0 {
                assert_eq!(v.color, [0.0, 1.0, 0.0, 1.0]);
            } else {
                assert_eq!(v.color, [0.0, 0.0, 1.0, 1.0]);
            }
        }
    }
}
