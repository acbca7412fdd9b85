//! Retro Platformer -- frame driver and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Simulation runs inside
//! `RedrawRequested` on a fixed 60 Hz tick (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed the accumulator
//!   2. `while should_step()` -- one `GameState::tick` per fixed slice; while
//!      paused, pending ticks are discarded uncounted (or one runs on single step)
//!   3. Rebuild the shape batch from the game state
//!   4. Upload camera + geometry, draw the scene, composite the egui layer
//!
//! Hotkeys (Escape, F3, P, R) act on the key press itself rather than inside the
//! tick loop, so a frame that runs several ticks cannot toggle them twice.
//! The level file is watched by mtime and reloaded between ticks.

mod collision;
mod controller;
mod draw;
mod entity;
mod game;
mod kinematics;
mod level;
mod pickup;
#[cfg(test)]
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use controller::ControllerInput;
use game::{GameState, TickReport};
use level::{load_level_from_path, LevelFile, LevelWatcher};
use rp_core::input::{InputState, Key};
use rp_core::time::TimeState;
use rp_devtools::{DebugOverlay, HudStats, OverlayStats};
use rp_platform::window::PlatformConfig;
use rp_render::{Camera2D, GpuContext, ShapeBatch, ShapePipeline, ShapeVertex};

const LEVEL_PATH: &str = "assets/levels/retro.json";

/// All mutable runtime state. Built in `ApplicationHandler::resumed` once a
/// window exists to attach the GPU surface to.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: Camera2D,
    shape_pipeline: ShapePipeline,
    debug_overlay: DebugOverlay,

    level_path: PathBuf,
    level_watcher: LevelWatcher,
    game: GameState,
    paused: bool,
    single_step_requested: bool,

    // The batch is rebuilt on the CPU after any tick, then streamed into these
    // buffers. Buffers grow (power-of-two) but never shrink.
    batch: ShapeBatch,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    index_count: u32,
}

impl EngineState {
    fn new(window: Arc<Window>, config: &PlatformConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let shape_pipeline = ShapePipeline::new(&gpu.device, gpu.surface_format);
        let mut debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        match &config.hud_font_path {
            Some(font_path) => {
                if let Err(err) = debug_overlay.load_hud_font(font_path) {
                    log::warn!("{err}. Score HUD disabled; score is reported in the log.");
                }
            }
            None => log::info!("No HUD font configured; score is reported in the log."),
        }

        let level_path = PathBuf::from(LEVEL_PATH);
        let level_watcher = LevelWatcher::new(level_path.clone());
        let level = load_initial_level(&level_path);
        let game = GameState::from_level(&level);
        log::info!(
            "Level '{}' ready: {} platforms, {} tokens",
            game.level_id,
            game.platforms.len(),
            game.tokens.len()
        );

        let camera = Camera2D::new(
            game.physics.screen_width,
            game.physics.screen_height,
            gpu.size.0,
            gpu.size.1,
        );
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            shape_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            gpu,
            time: TimeState::new(),
            input: InputState::new(),
            camera,
            shape_pipeline,
            debug_overlay,
            level_path,
            level_watcher,
            game,
            paused: false,
            single_step_requested: false,
            batch: ShapeBatch::new(),
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            index_count: 0,
        };
        state.rebuild_batch();
        Ok(state)
    }

    fn reload_level(&mut self, reason: &str) {
        match load_level_from_path(&self.level_path) {
            Ok(level) => {
                self.game = GameState::from_level(&level);
                self.camera.world_size =
                    glam::Vec2::new(self.game.physics.screen_width, self.game.physics.screen_height);
                log::info!(
                    "Level reloaded ({reason}): {} ({})",
                    level.level_id,
                    level.version
                );
            }
            Err(err) => {
                log::error!("Level reload failed ({reason}): {err}");
            }
        }
    }

    fn handle_hotkey(&mut self, key: Key, event_loop: &ActiveEventLoop) {
        match key {
            Key::Escape => {
                log::info!("Escape pressed, exiting.");
                event_loop.exit();
            }
            Key::F3 => self.debug_overlay.toggle(),
            Key::P => self.toggle_pause(),
            Key::R => {
                // Reload picks up edits; reset covers a missing or broken file.
                self.game.reset();
                self.reload_level("manual trigger (R)");
                self.rebuild_batch();
            }
            _ => {}
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!(
            "Simulation {}",
            if self.paused { "PAUSED" } else { "RESUMED" }
        );
    }

    fn run_tick(&mut self) {
        let input = ControllerInput::from_input(&self.input);
        let report = self.game.tick(input);
        self.log_tick(&report);
    }

    fn log_tick(&self, report: &TickReport) {
        if report.respawned {
            log::info!(
                "Player fell off the level, respawned at ({}, {})",
                self.game.spawn.x,
                self.game.spawn.y
            );
        }
        if report.tokens_collected > 0 {
            log::info!("Score: {}", self.game.score.value());
            if self.game.all_collected() {
                log::info!(
                    "All {} tokens collected! Press R to play again.",
                    self.game.tokens.len()
                );
            }
        }
    }

    fn rebuild_batch(&mut self) {
        draw::build_batch(&self.game, &mut self.batch);
        let vertex_count = self.batch.vertices().len();
        let index_count = self.batch.indices().len();
        self.ensure_mesh_capacity(vertex_count, index_count);
        self.index_count = index_count as u32;

        if vertex_count > 0 {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(self.batch.vertices()),
            );
        }
        if index_count > 0 {
            self.gpu.queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(self.batch.indices()),
            );
        }
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn overlay_stats(&self) -> OverlayStats {
        let player = &self.game.player;
        OverlayStats {
            level_id: self.game.level_id.clone(),
            player_position: (player.position.x, player.position.y),
            player_velocity: (player.velocity.x, player.velocity.y),
            grounded: player.grounded,
            tokens_collected: self.game.tokens_collected(),
            tokens_total: self.game.tokens.len(),
            respawns: self.game.respawns,
            triangle_count: self.index_count / 3,
            paused: self.paused,
        }
    }

    fn render(&mut self) {
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = self.overlay_stats();
        let hud = HudStats {
            score: self.game.score.value(),
        };
        let (egui_primitives, egui_textures_delta, overlay_actions) =
            self.debug_overlay
                .prepare(&self.window, &self.time, hud, &stats);

        if overlay_actions.toggle_pause {
            self.toggle_pause();
        }
        if overlay_actions.single_step {
            self.single_step_requested = true;
        }
        if overlay_actions.reset_level {
            self.game.reset();
            log::info!("Level '{}' reset", self.game.level_id);
            self.rebuild_batch();
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(draw::sky_clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if self.index_count > 0 {
                render_pass.set_pipeline(&self.shape_pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.debug_overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: PlatformConfig,
    state: Option<EngineState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = match rp_platform::window::create_window(event_loop, &self.config) {
            Ok(window) => window,
            Err(err) => {
                log::error!("{err}");
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        match EngineState::new(window, &self.config) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Renderer initialisation failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.camera.viewport = (w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::Focused(false) => {
                // Release events for keys held while unfocused never arrive.
                state.input.clear();
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(engine_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => {
                                state.input.key_down(engine_key);
                                if !event.repeat {
                                    state.handle_hotkey(engine_key, event_loop);
                                }
                            }
                            ElementState::Released => state.input.key_up(engine_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.time.begin_frame();

                if state.level_watcher.should_reload() {
                    state.reload_level("file watcher");
                    state.rebuild_batch();
                }

                if state.paused {
                    if state.single_step_requested && state.time.should_step() {
                        state.single_step_requested = false;
                        state.run_tick();
                    }
                    state.time.discard_pending();
                } else {
                    while state.time.should_step() {
                        state.run_tick();
                    }
                }

                if state.time.steps_this_frame > 0 {
                    state.rebuild_batch();
                }

                state.render();
            }

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<ShapeVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Load the level file, falling back to the built-in layout so a missing or
/// broken file never stops the game from starting.
fn load_initial_level(path: &std::path::Path) -> LevelFile {
    if !path.exists() {
        log::warn!(
            "Level file '{}' not found, using built-in level.",
            path.display()
        );
        return LevelFile::builtin();
    }
    match load_level_from_path(path) {
        Ok(level) => {
            log::info!("Loaded level '{}' ({})", level.level_id, level.version);
            level
        }
        Err(err) => {
            log::error!("{err}. Using built-in level.");
            LevelFile::builtin()
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyP => Some(Key::P),
        KeyCode::KeyR => Some(Key::R),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Retro Platformer starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_and_jump_bindings_are_mapped() {
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key(KeyCode::KeyA), Some(Key::A));
        assert_eq!(map_key(KeyCode::KeyD), Some(Key::D));
        assert_eq!(map_key(KeyCode::Space), Some(Key::Space));
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::ArrowUp), Some(Key::Up));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn missing_level_file_falls_back_to_builtin() {
        let level = load_initial_level(std::path::Path::new("no/such/level.json"));
        assert_eq!(level.level_id, "builtin");
        assert_eq!(level.tokens.len(), 6);
    }
}
