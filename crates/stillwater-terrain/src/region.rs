//! Region-based terrain shaping (lakes, mountains, plains)

use crate::mesh::TerrainVertex;
use crate::noise::HeightField;

/// Counts and scale for the region falloff fields
#[derive(Clone, Copy, Debug)]
pub struct RegionParams {
    /// Influence radius factor relative to the grid size
    pub region_scale: f32,
    pub lakes: u32,
    pub mountains: u32,
    pub plains: u32,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            region_scale: 0.5,
            lakes: 2,
            mountains: 2,
            plains: 2,
        }
    }
}

/// A 2D influence-point center in grid units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfluencePoint {
    pub x: f32,
    pub z: f32,
}

/// Derive the i-th influence point of a region kind from the noise field.
///
/// Centers are sampled at synthetic offsets (i * offset_step along one axis,
/// zero along the other) and scaled by the grid size, so placement is
/// deterministic per seed rather than random.
fn influence_point(field: &HeightField, i: u32, offset_step: f32, grid_size: u32) -> InfluencePoint {
    let offset = i as f32 * offset_step;
    InfluencePoint {
        x: field.noise01(offset, 0.0) * grid_size as f32,
        z: field.noise01(0.0, offset) * grid_size as f32,
    }
}

/// Influence-point centers for each region kind. Lakes sample at i*10,
/// mountains at i*20, plains at i*30.
pub fn region_centers(
    field: &HeightField,
    grid_size: u32,
    params: &RegionParams,
) -> (Vec<InfluencePoint>, Vec<InfluencePoint>, Vec<InfluencePoint>) {
    let lakes = (0..params.lakes)
        .map(|i| influence_point(field, i, 10.0, grid_size))
        .collect();
    let mountains = (0..params.mountains)
        .map(|i| influence_point(field, i, 20.0, grid_size))
        .collect();
    let plains = (0..params.plains)
        .map(|i| influence_point(field, i, 30.0, grid_size))
        .collect();
    (lakes, mountains, plains)
}

/// Rewrite vertex heights in place with the lake/mountain/plain falloffs.
///
/// Each vertex carries a single pending adjustment. Lakes subtract into it
/// and mountains add into it, but each plain REPLACES it with a lerp of the
/// raw height toward zero. The last plain therefore wins, discarding earlier
/// plains and any lake/mountain contribution, and the pending adjustment is
/// added to the height exactly once at the end. Zero-count kinds are simply
/// skipped.
pub fn apply_region_modifiers(
    vertices: &mut [TerrainVertex],
    grid_size: u32,
    field: &HeightField,
    params: &RegionParams,
) {
    let region_size = grid_size as f32 * params.region_scale;
    let (lakes, mountains, plains) = region_centers(field, grid_size, params);

    for z in 0..=grid_size {
        for x in 0..=grid_size {
            let index = (z * (grid_size + 1) + x) as usize;
            let height = vertices[index].position[1];
            let (fx, fz) = (x as f32, z as f32);
            let mut adjustment = 0.0;

            for lake in &lakes {
                let distance = ((fx - lake.x).powi(2) + (fz - lake.z).powi(2)).sqrt();
                adjustment -= 10.0 * (-distance / (region_size * 0.25)).exp();
            }

            for mountain in &mountains {
                let distance = ((fx - mountain.x).powi(2) + (fz - mountain.z).powi(2)).sqrt();
                adjustment += 50.0 * (-distance / (region_size * 0.2)).exp();
            }

            for plain in &plains {
                let distance = ((fx - plain.x).powi(2) + (fz - plain.z).powi(2)).sqrt();
                let t = (-distance / (region_size * 0.3)).exp();
                // Replaces whatever is pending, does not accumulate
                adjustment = height + (0.0 - height) * t;
            }

            vertices[index].position[1] = height + adjustment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::DEFAULT_SEED;

    fn flat_grid(grid_size: u32, height: f32) -> Vec<TerrainVertex> {
        let edge = (grid_size + 1) as usize;
        let mut vertices = vec![TerrainVertex::default(); edge * edge];
        for v in &mut vertices {
            v.position[1] = height;
        }
        vertices
    }

    #[test]
    fn centers_are_deterministic_per_seed() {
        let a = HeightField::new(DEFAULT_SEED);
        let b = HeightField::new(DEFAULT_SEED);
        let params = RegionParams::default();
        assert_eq!(region_centers(&a, 64, &params), region_centers(&b, 64, &params));
    }

    #[test]
    fn zero_counts_leave_heights_untouched() {
        let field = HeightField::new(DEFAULT_SEED);
        let params = RegionParams {
            lakes: 0,
            mountains: 0,
            plains: 0,
            ..RegionParams::default()
        };
        let mut vertices = flat_grid(8, 7.5);
        apply_region_modifiers(&mut vertices, 8, &field, &params);
        assert!(vertices.iter().all(|v| v.position[1] == 7.5));
    }

    #[test]
    fn lakes_lower_and_mountains_raise() {
        let field = HeightField::new(DEFAULT_SEED);

        let mut lake_only = flat_grid(8, 0.0);
        apply_region_modifiers(
            &mut lake_only,
            8,
            &field,
            &RegionParams { region_scale: 0.5, lakes: 1, mountains: 0, plains: 0 },
        );
        assert!(lake_only.iter().all(|v| v.position[1] < 0.0));

        let mut mountain_only = flat_grid(8, 0.0);
        apply_region_modifiers(
            &mut mountain_only,
            8,
            &field,
            &RegionParams { region_scale: 0.5, lakes: 0, mountains: 1, plains: 0 },
        );
        assert!(mountain_only.iter().all(|v| v.position[1] > 0.0));
    }

    #[test]
    fn plain_adjustment_fades_with_distance_from_its_center() {
        // A plain replaces the pending adjustment with lerp(height, 0, t),
        // so a flat grid at 40 ends up at 40 + lerp(40, 0, t): exactly 40 at
        // the plain's center (t = 1) and approaching 80 far away (t -> 0).
        let field = HeightField::new(DEFAULT_SEED);
        let mut vertices = flat_grid(8, 40.0);
        apply_region_modifiers(
            &mut vertices,
            8,
            &field,
            &RegionParams { region_scale: 0.5, lakes: 0, mountains: 0, plains: 1 },
        );

        for v in &vertices {
            assert!(v.position[1] >= 40.0 - 1e-4 && v.position[1] < 80.0);
        }

        // noise01(0, 0) is exactly 0.5, so plain 0 sits on the grid's center
        // vertex, where the lerp cancels the adjustment entirely
        let center = &vertices[(4 * 9 + 4) as usize];
        assert!((center.position[1] - 40.0).abs() < 1e-4);
    }

    #[test]
    fn only_the_last_plain_sets_the_adjustment() {
        let field = HeightField::new(DEFAULT_SEED);
        let params =
            RegionParams { region_scale: 0.5, lakes: 0, mountains: 0, plains: 2 };
        let region_size = 8.0 * params.region_scale;
        let (_, _, plains) = region_centers(&field, 8, &params);
        let last = plains[1];

        let mut vertices = flat_grid(8, 25.0);
        apply_region_modifiers(&mut vertices, 8, &field, &params);

        // Earlier plains must leave no trace: the result is fully determined
        // by the last plain's falloff alone
        for z in 0..=8u32 {
            for x in 0..=8u32 {
                let got = vertices[(z * 9 + x) as usize].position[1];
                let distance =
                    ((x as f32 - last.x).powi(2) + (z as f32 - last.z).powi(2)).sqrt();
                let t = (-distance / (region_size * 0.3)).exp();
                let expected = 25.0 + (25.0 + (0.0 - 25.0) * t);
                assert!((got - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn plains_discard_pending_lake_and_mountain_adjustments() {
        let field = HeightField::new(DEFAULT_SEED);
        let with_all =
            RegionParams { region_scale: 0.5, lakes: 1, mountains: 1, plains: 1 };
        let plain_only =
            RegionParams { region_scale: 0.5, lakes: 0, mountains: 0, plains: 1 };

        let mut a = flat_grid(8, 12.0);
        apply_region_modifiers(&mut a, 8, &field, &with_all);
        let mut b = flat_grid(8, 12.0);
        apply_region_modifiers(&mut b, 8, &field, &plain_only);

        for (va, vb) in a.iter().zip(&b) {
            assert!((va.position[1] - vb.position[1]).abs() < 1e-6);
        }
    }

    #[test]
    fn lake_then_plain_differs_from_plain_then_lake() {
        // Plains lerp toward zero, so they scale whatever came before them,
        // while lakes add a fixed dip; the two orders must not commute.
        let field = HeightField::new(DEFAULT_SEED);
        let lake = RegionParams { region_scale: 0.5, lakes: 1, mountains: 0, plains: 0 };
        let plain = RegionParams { region_scale: 0.5, lakes: 0, mountains: 0, plains: 1 };

        let mut lake_first = flat_grid(8, 20.0);
        apply_region_modifiers(&mut lake_first, 8, &field, &lake);
        apply_region_modifiers(&mut lake_first, 8, &field, &plain);

        let mut plain_first = flat_grid(8, 20.0);
        apply_region_modifiers(&mut plain_first, 8, &field, &plain);
        apply_region_modifiers(&mut plain_first, 8, &field, &lake);

        let differs = lake_first
            .iter()
            .zip(&plain_first)
            .any(|(a, b)| (a.position[1] - b.position[1]).abs() > 1e-6);
        assert!(differs, "region application order must matter where falloffs overlap");
    }
}
