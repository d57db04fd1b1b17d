//! Stillwater Render - wgpu-based renderer for the terrain demo
//!
//! Renders a procedurally generated terrain scene with a planar-reflective
//! water surface. Every frame is drawn twice: once mirrored through the
//! water plane into an offscreen capture, then once normally with the
//! capture bound to the water shader.

mod camera;
mod context;
mod lighting;
mod pipeline;
mod primitives;
mod reflection;
mod scene;
mod texture_cache;

pub use camera::Camera;
pub use context::{DepthBuffer, RenderContext, RenderError};
pub use lighting::{time_of_day, LightUniforms, DAY_CYCLE_SECONDS};
pub use pipeline::{FrameUniforms, ObjectUniforms, PassPipelines, RenderMode, ScenePipelines};
pub use primitives::{
    create_pyramid_mesh, create_sphere_mesh, create_water_plane_mesh, Mesh, Vertex,
};
pub use reflection::ReflectionTarget;
pub use scene::{ObjectKind, ObjectMaterial, SceneRenderer};
pub use texture_cache::{GpuTexture, TextureCache};

#[cfg(test)]
mod tests {
    #[test]
    fn scene_shader_wgsl_parses() {
        let source = include_str!("scene_shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("scene_shader.wgsl failed to parse");
    }

    #[test]
    fn terrain_shader_wgsl_parses() {
        let source = include_str!("terrain_shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("terrain_shader.wgsl failed to parse");
    }

    #[test]
    fn water_shader_wgsl_parses() {
        let source = include_str!("water_shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("water_shader.wgsl failed to parse");
    }
}
