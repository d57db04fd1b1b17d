//! Mesh primitives (water plane, pyramid, sphere) and terrain conversion

use bytemuck::{Pod, Zeroable};
use stillwater_terrain::TerrainMesh;

/// A vertex with position, normal, tangent frame, color, and UV coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x3,   // position
        1 => Float32x3,   // normal
        2 => Float32x3,   // tangent
        3 => Float32x3,   // bitangent
        4 => Float32x4,   // color
        5 => Float32x2,   // uv
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    fn flat(position: [f32; 3], normal: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tangent: [1.0, 0.0, 0.0],
            bitangent: [0.0, 0.0, 1.0],
            color,
            uv,
        }
    }
}

/// A mesh with vertices and indices
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Convert a generated terrain mesh into renderer vertices
    pub fn from_terrain(terrain: &TerrainMesh) -> Self {
        let vertices = terrain
            .vertices
            .iter()
            .map(|v| Vertex {
                position: v.position,
                normal: v.normal,
                tangent: v.tangent,
                bitangent: v.bitangent,
                color: v.color,
                uv: v.uv,
            })
            .collect();

        Self {
            vertices,
            indices: terrain.indices.clone(),
        }
    }
}

/// Create the water plane mesh: a single horizontal quad facing up
pub fn create_water_plane_mesh(width: f32, depth: f32) -> Mesh {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    let up = [0.0, 1.0, 0.0];
    let white = [1.0, 1.0, 1.0, 1.0];

    let vertices = vec![
        Vertex::flat([-hw, 0.0, -hd], up, white, [0.0, 1.0]),
        Vertex::flat([hw, 0.0, -hd], up, white, [1.0, 1.0]),
        Vertex::flat([hw, 0.0, hd], up, white, [1.0, 0.0]),
        Vertex::flat([-hw, 0.0, hd], up, white, [0.0, 0.0]),
    ];

    // Counter-clockwise seen from above, so the quad survives back-face
    // culling in the surface pass
    let indices = vec![0, 2, 1, 0, 3, 2];

    Mesh { vertices, indices }
}

/// Create a square-based pyramid: four base corners plus an apex
pub fn create_pyramid_mesh(base_size: f32, height: f32) -> Mesh {
    let hb = base_size / 2.0;
    let up = [0.0, 1.0, 0.0];
    let white = [1.0, 1.0, 1.0, 1.0];

    let vertices = vec![
        Vertex::flat([-hb, 0.0, -hb], up, white, [0.0, 1.0]),
        Vertex::flat([hb, 0.0, -hb], up, white, [1.0, 1.0]),
        Vertex::flat([hb, 0.0, hb], up, white, [1.0, 0.0]),
        Vertex::flat([-hb, 0.0, hb], up, white, [0.0, 0.0]),
        Vertex::flat([0.0, height, 0.0], up, white, [0.5, 0.5]),
    ];

    // All faces wind counter-clockwise seen from outside the solid
    let indices = vec![
        // Base, facing down
        0, 1, 2, 0, 2, 3, // Sides, apex last
        0, 4, 1, 1, 4, 2, 2, 4, 3, 3, 4, 0,
    ];

    Mesh { vertices, indices }
}

/// Create a latitude/longitude sphere mesh
pub fn create_sphere_mesh(radius: f32, lat_segments: u32, lon_segments: u32) -> Mesh {
    let white = [1.0, 1.0, 1.0, 1.0];
    let mut vertices = Vec::with_capacity(((lat_segments + 1) * (lon_segments + 1)) as usize);

    for i in 0..=lat_segments {
        let theta = i as f32 * std::f32::consts::PI / lat_segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..=lon_segments {
            let phi = j as f32 * 2.0 * std::f32::consts::PI / lon_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let unit = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            let position = [unit[0] * radius, unit[1] * radius, unit[2] * radius];
            let uv = [
                j as f32 / lon_segments as f32,
                i as f32 / lat_segments as f32,
            ];

            // Unit position doubles as the outward normal
            vertices.push(Vertex::flat(position, unit, white, uv));
        }
    }

    let mut indices = Vec::with_capacity((lat_segments * lon_segments * 6) as usize);
    for i in 0..lat_segments {
        for j in 0..lon_segments {
            let first = i * (lon_segments + 1) + j;
            let second = first + lon_segments + 1;

            indices.push(first);
            indices.push(first + 1);
            indices.push(second);

            indices.push(second);
            indices.push(first + 1);
            indices.push(second + 1);
        }
    }

    Mesh { vertices, indices }
}
