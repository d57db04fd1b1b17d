//! Demo application implementing winit ApplicationHandler
//!
//! Runs the frame loop: input, fly camera, and the two-pass reflective
//! scene render.

use crate::clock::GameClock;
use crate::config::DemoConfig;
use crate::input::InputState;
use std::path::Path;
use std::sync::Arc;
use stillwater_core::{Transform, Vec3};
use stillwater_render::{
    create_pyramid_mesh, create_sphere_mesh, create_water_plane_mesh, Camera, Mesh, ObjectKind,
    ObjectMaterial, RenderContext, RenderMode, SceneRenderer, TextureCache,
};
use stillwater_terrain::{HeightField, TerrainMesh};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const MOVE_SPEED: f32 = 30.0;
const SPRINT_MULTIPLIER: f32 = 3.0;
const LOOK_SENSITIVITY: f32 = 0.002;
const MAX_PITCH: f32 = 1.54;

pub struct DemoApp {
    pub config: DemoConfig,
    pub clock: GameClock,
    pub input: InputState,

    window: Option<Arc<Window>>,
    context: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    camera: Camera,

    pub fullscreen: bool,
}

impl DemoApp {
    pub fn new(config: DemoConfig, fullscreen: bool) -> Self {
        Self {
            config,
            clock: GameClock::new(),
            input: InputState::new(),
            window: None,
            context: None,
            renderer: None,
            camera: Camera::new(),
            fullscreen,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

        if self.fullscreen {
            window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let context = pollster::block_on(RenderContext::new(window.clone())).unwrap();
        self.camera.aspect = context.aspect_ratio();

        let mut renderer = SceneRenderer::new(
            &context.device,
            context.config.format,
            context.size.width,
            context.size.height,
            self.config.water.height,
        );

        let mut textures = TextureCache::new(&context.device, &context.queue);
        self.load_textures(&context, &mut textures);

        self.populate_scene(&context, &mut renderer, &mut textures);

        self.context = Some(context);
        self.renderer = Some(renderer);
    }

    fn load_textures(&self, context: &RenderContext, textures: &mut TextureCache) {
        let assets = Path::new(&self.config.assets.directory);
        let files = [
            ("terrain", &self.config.assets.terrain_texture),
            ("terrain_normal", &self.config.assets.terrain_normal_map),
            ("water", &self.config.assets.water_texture),
            ("pyramid", &self.config.assets.pyramid_texture),
            ("sphere", &self.config.assets.sphere_texture),
        ];

        for (name, file) in files {
            let path = assets.join(file);
            if let Err(e) = textures.load_file(&context.device, &context.queue, name, &path) {
                println!("Warning: {}", e);
            }
        }
    }

    fn populate_scene(
        &self,
        context: &RenderContext,
        renderer: &mut SceneRenderer,
        textures: &mut TextureCache,
    ) {
        let field = HeightField::new(self.config.terrain.seed);
        let params = self.config.terrain_params();
        let terrain = TerrainMesh::generate(&field, &params);
        println!(
            "Generated terrain: {} vertices, {} triangles",
            terrain.vertices.len(),
            terrain.indices.len() / 3
        );

        let terrain_mesh = Mesh::from_terrain(&terrain);
        let terrain_material = textures.get("terrain").map(|base| ObjectMaterial {
            base,
            normal: textures.get("terrain_normal").unwrap_or(&textures.default_normal),
        });
        renderer.add_object(
            &context.device,
            "terrain",
            ObjectKind::Terrain,
            &terrain_mesh,
            Transform::from_position(Vec3::from_array(self.config.terrain.position)),
            terrain_material,
        );

        let water_mesh = create_water_plane_mesh(self.config.water.size, self.config.water.size);
        renderer.add_object(
            &context.device,
            "water",
            ObjectKind::Water,
            &water_mesh,
            Transform::from_position(Vec3::new(
                self.config.water.position_x,
                self.config.water.height,
                self.config.water.position_z,
            )),
            None,
        );
        renderer.set_water_base(&context.device, textures.take("water"));

        let pyramid_mesh = create_pyramid_mesh(1.0, 1.0);
        let pyramid_material = textures.get("pyramid").map(|base| ObjectMaterial {
            base,
            normal: &textures.default_normal,
        });
        renderer.add_object(
            &context.device,
            "pyramid",
            ObjectKind::Prop,
            &pyramid_mesh,
            Transform::from_position(Vec3::new(-30.0, 60.0, 60.0))
                .with_rotation(Vec3::new(0.0, 45.0, 0.0))
                .with_scale(Vec3::new(10.0, 10.0, 10.0)),
            pyramid_material,
        );

        let sphere_mesh = create_sphere_mesh(1.0, 20, 20);
        let sphere_material = textures.get("sphere").map(|base| ObjectMaterial {
            base,
            normal: &textures.default_normal,
        });
        renderer.add_object(
            &context.device,
            "sphere",
            ObjectKind::Prop,
            &sphere_mesh,
            Transform::from_position(Vec3::new(60.0, 70.0, 40.0))
                .with_scale(Vec3::new(10.0, 10.0, 10.0)),
            sphere_material,
        );
    }

    /// Shading variant selected from currently held keys, rechecked every
    /// frame so releasing the key drops straight back to normal shading.
    fn current_render_mode(&self) -> RenderMode {
        if self.input.is_key_down(KeyCode::Digit1) {
            RenderMode::DiffuseOnly
        } else if self.input.is_key_down(KeyCode::Digit2) {
            RenderMode::SpecularOnly
        } else {
            RenderMode::Normal
        }
    }

    fn update_camera(&mut self) {
        let dt = self.clock.delta_time as f32;

        // Mouse look while the right button is held
        if self.input.is_mouse_button_down(1) {
            let (dx, dy) = self.input.raw_mouse_delta();
            self.camera.yaw += dx as f32 * LOOK_SENSITIVITY;
            self.camera.pitch =
                (self.camera.pitch - dy as f32 * LOOK_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
        }

        let forward = self.camera.forward();
        let right = self.camera.right();
        let mut movement = Vec3::ZERO;
        if self.input.is_key_down(KeyCode::KeyW) {
            movement = movement + forward;
        }
        if self.input.is_key_down(KeyCode::KeyS) {
            movement = movement - forward;
        }
        if self.input.is_key_down(KeyCode::KeyD) {
            movement = movement + right;
        }
        if self.input.is_key_down(KeyCode::KeyA) {
            movement = movement - right;
        }
        if self.input.is_key_down(KeyCode::KeyE) {
            movement = movement + Vec3::UP;
        }
        if self.input.is_key_down(KeyCode::KeyQ) {
            movement = movement - Vec3::UP;
        }

        if movement.length() > 0.0 {
            let speed = if self.input.is_key_down(KeyCode::ShiftLeft) {
                MOVE_SPEED * SPRINT_MULTIPLIER
            } else {
                MOVE_SPEED
            };
            self.camera.position = self.camera.position + movement.normalized() * (speed * dt);
        }
    }

    fn tick(&mut self) {
        self.clock.tick();
        self.update_camera();

        let mode = self.current_render_mode();

        if let (Some(context), Some(renderer)) = (&self.context, &mut self.renderer) {
            match renderer.render_frame(context, &self.camera, self.clock.total_time, mode) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    // Recoverable; the surface is reconfigured on the next
                    // resize event
                }
                Err(e) => {
                    eprintln!("Render error: {:?}", e);
                }
            }
        }

        self.input.end_frame();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.initialize(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.context {
                    context.resize(new_size);
                    self.camera.aspect = context.aspect_ratio();
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&context.device, new_size.width, new_size.height);
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if key_code == KeyCode::Escape {
                                event_loop.exit();
                                return;
                            }
                            self.input.process_key_down(key_code);
                        }
                        ElementState::Released => {
                            self.input.process_key_up(key_code);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = match button {
                    MouseButton::Left => 0,
                    MouseButton::Right => 1,
                    MouseButton::Middle => 2,
                    _ => return,
                };

                match state {
                    ElementState::Pressed => self.input.process_mouse_button_down(btn),
                    ElementState::Released => self.input.process_mouse_button_up(btn),
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_raw_delta(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
