//! Demo configuration loaded from TOML

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use stillwater_terrain::{RegionParams, TerrainParams, DEFAULT_SEED};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub terrain: TerrainConfig,
    pub water: WaterConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Stillwater".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub grid_size: u32,
    pub tile_size: f32,
    pub seed: u32,
    pub region_scale: f32,
    pub lakes: u32,
    pub mountains: u32,
    pub plains: u32,
    pub position: [f32; 3],
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_size: 256,
            tile_size: 1.0,
            seed: DEFAULT_SEED,
            region_scale: 0.5,
            lakes: 2,
            mountains: 2,
            plains: 2,
            position: [0.0, -25.0, 100.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Height of the reflection plane, and the water plane's Y position
    pub height: f32,
    pub size: f32,
    pub position_x: f32,
    pub position_z: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            height: 50.0,
            size: 1000.0,
            position_x: 100.0,
            position_z: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub directory: String,
    pub terrain_texture: String,
    pub terrain_normal_map: String,
    pub water_texture: String,
    pub pyramid_texture: String,
    pub sphere_texture: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            directory: "assets".to_string(),
            terrain_texture: "terrain.png".to_string(),
            terrain_normal_map: "terrain_normal.png".to_string(),
            water_texture: "water.png".to_string(),
            pyramid_texture: "pyramid.png".to_string(),
            sphere_texture: "sphere.png".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            grid_size: self.terrain.grid_size,
            tile_size: self.terrain.tile_size,
            region: RegionParams {
                region_scale: self.terrain.region_scale,
                lakes: self.terrain.lakes,
                mountains: self.terrain.mountains,
                plains: self.terrain.plains,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let config = DemoConfig::default();
        assert_eq!(config.terrain.grid_size, 256);
        assert_eq!(config.terrain.seed, DEFAULT_SEED);
        assert_eq!(config.terrain.position, [0.0, -25.0, 100.0]);
        assert!((config.water.height - 50.0).abs() < 1e-6);
        assert!((config.water.size - 1000.0).abs() < 1e-6);
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn toml_override_changes_only_named_fields() {
        let config: DemoConfig = toml::from_str(
            r#"
            [terrain]
            seed = 42
            lakes = 5

            [water]
            height = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.terrain.seed, 42);
        assert_eq!(config.terrain.lakes, 5);
        assert!((config.water.height - 30.0).abs() < 1e-6);
        // Untouched fields keep their defaults
        assert_eq!(config.terrain.grid_size, 256);
        assert_eq!(config.terrain.mountains, 2);
        assert_eq!(config.window.title, "Stillwater");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: DemoConfig = toml::from_str("").unwrap();
        assert_eq!(config.terrain.seed, DemoConfig::default().terrain.seed);
    }

    #[test]
    fn terrain_params_carry_region_settings() {
        let mut config = DemoConfig::default();
        config.terrain.plains = 7;
        let params = config.terrain_params();
        assert_eq!(params.region.plains, 7);
        assert_eq!(params.grid_size, 256);
    }
}
