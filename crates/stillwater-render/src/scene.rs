//! Scene objects and the two-pass frame renderer

use crate::camera::Camera;
use crate::context::RenderContext;
use crate::lighting::{time_of_day, LightUniforms};
use crate::pipeline::{FrameUniforms, ObjectUniforms, RenderMode, ScenePipelines};
use crate::primitives::Mesh;
use crate::reflection::ReflectionTarget;
use crate::texture_cache::GpuTexture;
use stillwater_core::Transform;
use wgpu::util::DeviceExt;

const SKY_CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.4,
    b: 0.6,
    a: 1.0,
};

/// What kind of object this is, which decides its pipeline
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Terrain,
    Water,
    Prop,
}

/// Textures an object is shaded with
pub struct ObjectMaterial<'a> {
    pub base: &'a GpuTexture,
    pub normal: &'a GpuTexture,
}

/// A GPU-resident object in the demo scene
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    /// Objects with this unset are skipped in the reflection pass.
    /// The water plane never reflects itself.
    pub reflects_in_water: bool,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    // None when the object's texture failed to load; the object is
    // silently skipped at draw time rather than aborting the frame.
    material_bind_group: Option<wgpu::BindGroup>,
}

/// Renders the scene twice per frame: once mirrored through the water
/// plane into an offscreen target, then once normally to the surface with
/// the capture bound to the water shader.
pub struct SceneRenderer {
    pub pipelines: ScenePipelines,
    pub water_height: f32,
    objects: Vec<SceneObject>,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    reflection_target: ReflectionTarget,
    water_base: Option<GpuTexture>,
    water_material_bind_group: Option<wgpu::BindGroup>,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        water_height: f32,
    ) -> Self {
        let pipelines = ScenePipelines::new(device, format);

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::cast_slice(&[FrameUniforms::new()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &pipelines.frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Uniform Buffer"),
            contents: bytemuck::cast_slice(&[LightUniforms::for_time_of_day(12.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Light Bind Group"),
            layout: &pipelines.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        let reflection_target = ReflectionTarget::new(device, width, height, format);

        Self {
            pipelines,
            water_height,
            objects: Vec::new(),
            frame_buffer,
            frame_bind_group,
            light_buffer,
            light_bind_group,
            reflection_target,
            water_base: None,
            water_material_bind_group: None,
        }
    }

    /// Upload a mesh and register it as a scene object.
    pub fn add_object(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        kind: ObjectKind,
        mesh: &Mesh,
        transform: Transform,
        material: Option<ObjectMaterial<'_>>,
    ) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let object_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Object Uniform Buffer", name)),
            contents: bytemuck::cast_slice(&[ObjectUniforms::from_matrix(transform.to_matrix())]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Object Bind Group", name)),
            layout: &self.pipelines.object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        let material_bind_group = material.map(|mat| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} Material Bind Group", name)),
                layout: &self.pipelines.material_bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&mat.base.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&mat.base.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&mat.normal.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&mat.normal.sampler),
                    },
                ],
            })
        });

        self.objects.push(SceneObject {
            name: name.to_string(),
            kind,
            transform,
            reflects_in_water: kind != ObjectKind::Water,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            object_buffer,
            object_bind_group,
            material_bind_group,
        });
    }

    /// Set the water plane's base texture. None leaves the water undrawn.
    pub fn set_water_base(&mut self, device: &wgpu::Device, base: Option<GpuTexture>) {
        self.water_base = base;
        self.rebuild_water_bind_group(device);
    }

    /// Recreate the reflection target at a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.reflection_target.resize(device, width, height);
        self.rebuild_water_bind_group(device);
    }

    // The water bind group references the reflection texture, so it has to
    // be rebuilt whenever the target is recreated.
    fn rebuild_water_bind_group(&mut self, device: &wgpu::Device) {
        let Some(base) = &self.water_base else {
            self.water_material_bind_group = None;
            return;
        };
        self.water_material_bind_group =
            Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Water Material Bind Group"),
                layout: &self.pipelines.water_material_bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&base.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&base.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&self.reflection_target.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&self.reflection_target.sampler),
                    },
                ],
            }));
    }

    /// Render one frame: reflection pass into the offscreen target, then
    /// the main pass to the surface, then present.
    pub fn render_frame(
        &mut self,
        context: &RenderContext,
        camera: &Camera,
        total_time: f64,
        mode: RenderMode,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = context.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let lights = LightUniforms::for_time_of_day(time_of_day(total_time));
        context
            .queue
            .write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[lights]));

        for object in &self.objects {
            let uniforms = ObjectUniforms::from_matrix(object.transform.to_matrix());
            context
                .queue
                .write_buffer(&object.object_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }

        let resolution = [context.size.width as f32, context.size.height as f32];

        // Pass 1: mirrored world from beneath the water plane. Submitted
        // before the main pass so the second frame-uniform write lands
        // after this pass executes.
        let reflected = camera.reflected(self.water_height);
        self.write_frame_uniforms(context, &reflected, total_time, resolution);
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Reflection Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Reflection Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.reflection_target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.set_bind_group(2, &self.light_bind_group, &[]);

            for object in &self.objects {
                if !object.reflects_in_water {
                    continue;
                }
                let Some(material) = &object.material_bind_group else {
                    continue;
                };
                let pipeline = match object.kind {
                    ObjectKind::Terrain => self.pipelines.terrain(mode).for_pass(true),
                    ObjectKind::Prop => self.pipelines.scene.for_pass(true),
                    ObjectKind::Water => continue,
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, &object.object_bind_group, &[]);
                pass.set_bind_group(3, material, &[]);
                pass.set_vertex_buffer(0, object.vertex_buffer.slice(..));
                pass.set_index_buffer(object.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..object.index_count, 0, 0..1);
            }
        }
        context.queue.submit(std::iter::once(encoder.finish()));

        // Pass 2: the world as seen, with the capture bound to the water
        self.write_frame_uniforms(context, camera, total_time, resolution);
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.set_bind_group(2, &self.light_bind_group, &[]);

            for object in &self.objects {
                let (pipeline, material) = match object.kind {
                    ObjectKind::Terrain => {
                        let Some(material) = &object.material_bind_group else {
                            continue;
                        };
                        (self.pipelines.terrain(mode).for_pass(false), material)
                    }
                    ObjectKind::Prop => {
                        let Some(material) = &object.material_bind_group else {
                            continue;
                        };
                        (self.pipelines.scene.for_pass(false), material)
                    }
                    ObjectKind::Water => {
                        let Some(material) = &self.water_material_bind_group else {
                            continue;
                        };
                        (&self.pipelines.water, material)
                    }
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, &object.object_bind_group, &[]);
                pass.set_bind_group(3, material, &[]);
                pass.set_vertex_buffer(0, object.vertex_buffer.slice(..));
                pass.set_index_buffer(object.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..object.index_count, 0, 0..1);
            }
        }
        context.queue.submit(std::iter::once(encoder.finish()));

        output.present();
        Ok(())
    }

    fn write_frame_uniforms(
        &self,
        context: &RenderContext,
        camera: &Camera,
        total_time: f64,
        resolution: [f32; 2],
    ) {
        let uniforms = FrameUniforms {
            view_proj: camera.view_projection_matrix(),
            camera_pos: camera.position_array(),
            time: total_time as f32,
            resolution,
            water_height: self.water_height,
            _pad: 0.0,
        };
        context
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }
}
