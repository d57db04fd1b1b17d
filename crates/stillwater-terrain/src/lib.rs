//! Stillwater Terrain - Procedural terrain generation
//!
//! Generates the demo's terrain as a regular grid mesh from seeded fractal
//! noise: multi-octave height sampling, region-based shaping (lakes,
//! mountains, plains), and per-vertex normal/tangent/bitangent
//! accumulation. Does not depend on stillwater-render — outputs raw vertex
//! data for the renderer to upload.

pub mod mesh;
pub mod noise;
pub mod region;
pub mod tangent;

pub use mesh::{TerrainMesh, TerrainParams, TerrainVertex};
pub use noise::{HeightField, DEFAULT_SEED};
pub use region::{apply_region_modifiers, region_centers, InfluencePoint, RegionParams};
