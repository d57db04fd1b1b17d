//! Stillwater Core - Foundational types for the Stillwater demo
//!
//! This crate provides the small set of types the other crates depend on:
//! - `Vec3` - 3D vector math
//! - `Transform` - Position/rotation/scale composed into a model matrix
//! - `Color` - RGBA color
//! - Column-major 4x4 matrix helpers

mod types;

pub use types::{mat4_identity, mat4_mul, Color, Transform, Vec3};
