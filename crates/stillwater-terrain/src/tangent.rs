//! Per-vertex normal, tangent, and bitangent accumulation

use crate::mesh::TerrainVertex;

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Returns the unit vector, or zero for a zero-length input.
fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Accumulate smooth per-vertex normals from face normals.
///
/// Every face contributes its unit normal equally (no area or angle
/// weighting) to each of its three vertices; the sums are divided by the
/// adjacent-face count and renormalized. A vertex touched by no face keeps
/// the zero vector, which cannot happen on a fully connected grid.
pub fn accumulate_normals(vertices: &mut [TerrainVertex], indices: &[u32]) {
    let mut accumulated = vec![[0.0f32; 3]; vertices.len()];
    let mut adjacent_faces = vec![0u32; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

        let edge1 = sub(vertices[i1].position, vertices[i0].position);
        let edge2 = sub(vertices[i2].position, vertices[i0].position);
        let face_normal = normalize(cross(edge1, edge2));

        for &i in &[i0, i1, i2] {
            accumulated[i][0] += face_normal[0];
            accumulated[i][1] += face_normal[1];
            accumulated[i][2] += face_normal[2];
            adjacent_faces[i] += 1;
        }
    }

    for (i, vertex) in vertices.iter_mut().enumerate() {
        let mut normal = accumulated[i];
        if adjacent_faces[i] > 0 {
            let count = adjacent_faces[i] as f32;
            normal = normalize([normal[0] / count, normal[1] / count, normal[2] / count]);
        }
        vertex.normal = normal;
    }
}

/// Accumulate per-vertex tangents and bitangents from UV derivatives.
///
/// Must run AFTER `accumulate_normals`: the final Gram-Schmidt step
/// orthogonalizes each tangent against the vertex's finished normal, and the
/// bitangent is rebuilt as cross(normal, tangent) rather than taken from the
/// accumulated sum. Accumulation is an unweighted sum across adjacent faces.
pub fn compute_tangents(vertices: &mut [TerrainVertex], indices: &[u32]) {
    let mut tangents = vec![[0.0f32; 3]; vertices.len()];
    let mut bitangents = vec![[0.0f32; 3]; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

        let edge1 = sub(vertices[i1].position, vertices[i0].position);
        let edge2 = sub(vertices[i2].position, vertices[i0].position);

        let duv1 = [
            vertices[i1].uv[0] - vertices[i0].uv[0],
            vertices[i1].uv[1] - vertices[i0].uv[1],
        ];
        let duv2 = [
            vertices[i2].uv[0] - vertices[i0].uv[0],
            vertices[i2].uv[1] - vertices[i0].uv[1],
        ];

        // Inverse-Jacobian determinant; clamped away from zero so degenerate
        // UVs produce a huge-but-finite vector that washes out in the final
        // normalize instead of NaN-poisoning the whole buffer.
        let mut det = duv1[0] * duv2[1] - duv2[0] * duv1[1];
        if det.abs() < 1e-8 {
            det = if det < 0.0 { -1e-8 } else { 1e-8 };
        }
        let f = 1.0 / det;

        let tangent = [
            f * (duv2[1] * edge1[0] - duv1[1] * edge2[0]),
            f * (duv2[1] * edge1[1] - duv1[1] * edge2[1]),
            f * (duv2[1] * edge1[2] - duv1[1] * edge2[2]),
        ];
        let bitangent = [
            f * (-duv2[0] * edge1[0] + duv1[0] * edge2[0]),
            f * (-duv2[0] * edge1[1] + duv1[0] * edge2[1]),
            f * (-duv2[0] * edge1[2] + duv1[0] * edge2[2]),
        ];

        for &i in &[i0, i1, i2] {
            for k in 0..3 {
                tangents[i][k] += tangent[k];
                bitangents[i][k] += bitangent[k];
            }
        }
    }

    for (i, vertex) in vertices.iter_mut().enumerate() {
        let normal = vertex.normal;
        let accumulated = tangents[i];

        // Gram-Schmidt against the finished normal
        let projection = dot(accumulated, normal);
        let tangent = normalize([
            accumulated[0] - projection * normal[0],
            accumulated[1] - projection * normal[1],
            accumulated[2] - projection * normal[2],
        ]);

        vertex.tangent = tangent;
        vertex.bitangent = normalize(cross(normal, tangent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1x2 strip of two cells in the XZ plane with grid-style UVs
    fn flat_strip() -> (Vec<TerrainVertex>, Vec<u32>) {
        let mut vertices = Vec::new();
        for z in 0..2u32 {
            for x in 0..3u32 {
                vertices.push(TerrainVertex {
                    position: [x as f32, 0.0, -(z as f32)],
                    uv: [x as f32 / 2.0, z as f32],
                    ..TerrainVertex::default()
                });
            }
        }
        // Counter-clockwise seen from above, same as the grid mesh builder
        let indices = vec![0, 1, 3, 1, 4, 3, 1, 2, 4, 2, 5, 4];
        (vertices, indices)
    }

    #[test]
    fn flat_grid_normals_point_up() {
        let (mut vertices, indices) = flat_strip();
        accumulate_normals(&mut vertices, &indices);

        for v in &vertices {
            assert!(v.normal[0].abs() < 1e-6);
            assert!((v.normal[1] - 1.0).abs() < 1e-6);
            assert!(v.normal[2].abs() < 1e-6);
        }
    }

    #[test]
    fn accumulated_normals_are_unit_length() {
        let (mut vertices, indices) = flat_strip();
        // Perturb heights so faces tilt
        vertices[1].position[1] = 2.0;
        vertices[4].position[1] = -1.0;

        accumulate_normals(&mut vertices, &indices);

        for v in &vertices {
            let len = dot(v.normal, v.normal).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal length {}", len);
        }
    }

    #[test]
    fn untouched_vertex_keeps_zero_normal() {
        let (mut vertices, indices) = flat_strip();
        vertices.push(TerrainVertex::default()); // referenced by nothing

        accumulate_normals(&mut vertices, &indices);
        assert_eq!(vertices.last().unwrap().normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn tangents_are_orthogonal_to_normals() {
        let (mut vertices, indices) = flat_strip();
        vertices[1].position[1] = 2.0;
        vertices[4].position[1] = -1.5;

        accumulate_normals(&mut vertices, &indices);
        compute_tangents(&mut vertices, &indices);

        for v in &vertices {
            assert!(dot(v.tangent, v.normal).abs() < 1e-4);
            let len = dot(v.tangent, v.tangent).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn bitangent_is_cross_of_normal_and_tangent() {
        let (mut vertices, indices) = flat_strip();
        vertices[2].position[1] = 1.0;

        accumulate_normals(&mut vertices, &indices);
        compute_tangents(&mut vertices, &indices);

        for v in &vertices {
            let expected = normalize(cross(v.normal, v.tangent));
            for k in 0..3 {
                assert!((v.bitangent[k] - expected[k]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn degenerate_uvs_do_not_produce_nan() {
        let (mut vertices, indices) = flat_strip();
        // Collapse all UVs; every triangle now has a zero UV determinant
        for v in &mut vertices {
            v.uv = [0.5, 0.5];
        }

        accumulate_normals(&mut vertices, &indices);
        compute_tangents(&mut vertices, &indices);

        for v in &vertices {
            assert!(v.tangent.iter().all(|c| c.is_finite()));
            assert!(v.bitangent.iter().all(|c| c.is_finite()));
        }
    }
}
