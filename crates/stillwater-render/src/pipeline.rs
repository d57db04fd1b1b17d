//! Render pipeline setup

use crate::context::DepthBuffer;
use crate::primitives::Vertex;
use bytemuck::{Pod, Zeroable};

/// Per-frame uniform buffer data (bind group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub resolution: [f32; 2],
    pub water_height: f32,
    pub _pad: f32,
}

impl FrameUniforms {
    pub fn new() -> Self {
        let identity = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self {
            view_proj: identity,
            camera_pos: [0.0, 0.0, 0.0],
            time: 0.0,
            resolution: [1.0, 1.0],
            water_height: 0.0,
            _pad: 0.0,
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-object uniform buffer data (bind group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
}

impl ObjectUniforms {
    pub fn from_matrix(model: [[f32; 4]; 4]) -> Self {
        Self { model }
    }
}

/// Which terrain shading variant to draw with
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Normal,
    DiffuseOnly,
    SpecularOnly,
}

/// A pipeline built for each pass of a frame: the reflection pass mirrors
/// the world through the water plane, which flips triangle winding, so it
/// culls front faces where the main pass culls back faces.
pub struct PassPipelines {
    pub back_cull: wgpu::RenderPipeline,
    pub front_cull: wgpu::RenderPipeline,
}

impl PassPipelines {
    pub fn for_pass(&self, reflection: bool) -> &wgpu::RenderPipeline {
        if reflection {
            &self.front_cull
        } else {
            &self.back_cull
        }
    }
}

/// All pipelines and bind group layouts for the demo scene
pub struct ScenePipelines {
    pub scene: PassPipelines,
    pub terrain_combined: PassPipelines,
    pub terrain_diffuse: PassPipelines,
    pub terrain_specular: PassPipelines,
    pub water: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    pub light_bind_group_layout: wgpu::BindGroupLayout,
    pub material_bind_group_layout: wgpu::BindGroupLayout,
    pub water_material_bind_group_layout: wgpu::BindGroupLayout,
}

impl ScenePipelines {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene_shader.wgsl").into()),
        });
        let terrain_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Terrain Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("terrain_shader.wgsl").into()),
        });
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("water_shader.wgsl").into()),
        });

        // Bind group 0: Frame uniforms (vertex + fragment)
        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Frame Bind Group Layout"),
            });

        // Bind group 1: Object uniforms (vertex only)
        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Object Bind Group Layout"),
            });

        // Bind group 2: Light uniforms (fragment only)
        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Light Bind Group Layout"),
            });

        // Bind group 3: Material textures (fragment only)
        let material_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    // binding 0: base_texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // binding 1: base_sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                    // binding 2: normal_map_texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // binding 3: normal_map_sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
                label: Some("Material Bind Group Layout"),
            });

        // Bind group 3 (water variant): base texture + reflection capture
        let water_material_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    // binding 0: base_texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // binding 1: base_sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                    // binding 2: reflection_texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // binding 3: reflection_sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
                label: Some("Water Material Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &object_bind_group_layout,
                &light_bind_group_layout,
                &material_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let water_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Water Pipeline Layout"),
                bind_group_layouts: &[
                    &frame_bind_group_layout,
                    &object_bind_group_layout,
                    &light_bind_group_layout,
                    &water_material_bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let build = |label: &str,
                     shader: &wgpu::ShaderModule,
                     layout: &wgpu::PipelineLayout,
                     fs_entry: &str,
                     cull_mode: wgpu::Face| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some(fs_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(cull_mode),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthBuffer::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let build_pair = |label: &str,
                          shader: &wgpu::ShaderModule,
                          layout: &wgpu::PipelineLayout,
                          fs_entry: &str| -> PassPipelines {
            PassPipelines {
                back_cull: build(label, shader, layout, fs_entry, wgpu::Face::Back),
                front_cull: build(label, shader, layout, fs_entry, wgpu::Face::Front),
            }
        };

        let scene = build_pair("Scene Pipeline", &scene_shader, &pipeline_layout, "fs_main");
        let terrain_combined = build_pair(
            "Terrain Pipeline",
            &terrain_shader,
            &pipeline_layout,
            "fs_main",
        );
        let terrain_diffuse = build_pair(
            "Terrain Diffuse Pipeline",
            &terrain_shader,
            &pipeline_layout,
            "fs_diffuse",
        );
        let terrain_specular = build_pair(
            "Terrain Specular Pipeline",
            &terrain_shader,
            &pipeline_layout,
            "fs_specular",
        );
        // Water is only drawn in the main pass, so it never needs a
        // front-cull variant.
        let water = build(
            "Water Pipeline",
            &water_shader,
            &water_pipeline_layout,
            "fs_main",
            wgpu::Face::Back,
        );

        Self {
            scene,
            terrain_combined,
            terrain_diffuse,
            terrain_specular,
            water,
            frame_bind_group_layout,
            object_bind_group_layout,
            light_bind_group_layout,
            material_bind_group_layout,
            water_material_bind_group_layout,
        }
    }

    pub fn terrain(&self, mode: RenderMode) -> &PassPipelines {
        match mode {
            RenderMode::Normal => &self.terrain_combined,
            RenderMode::DiffuseOnly => &self.terrain_diffuse,
            RenderMode::SpecularOnly => &self.terrain_specular,
        }
    }
}
