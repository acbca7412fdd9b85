//! egui layer drawn on top of the game: the score HUD and the F3 debug panel.
//!
//! egui needs its render pass split from the scene pass because
//! `egui_wgpu::Renderer::render()` wants a `RenderPass<'static>`:
//!
//!   1. `prepare()` -- run UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and buffers (borrows the encoder)
//!   3. `paint()`   -- render into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! HUD text only appears once a font has been installed with
//! `load_hud_font()`. Without one the HUD is skipped and the game reports the
//! score on the console instead.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rp_core::time::TimeState;
use winit::window::Window;

const HUD_FONT_NAME: &str = "hud";
const HUD_TEXT_SIZE: f32 = 24.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct HudStats {
    pub score: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub level_id: String,
    pub player_position: (f32, f32),
    pub player_velocity: (f32, f32),
    pub grounded: bool,
    pub tokens_collected: usize,
    pub tokens_total: usize,
    pub respawns: u32,
    pub triangle_count: u32,
    /// Whether simulation is paused
    pub paused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayActions {
    pub toggle_pause: bool,
    /// Advance one fixed tick while paused
    pub single_step: bool,
    pub reset_level: bool,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
    hud_font_loaded: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
            hud_font_loaded: false,
        }
    }

    /// Install the HUD font. On failure the overlay stays usable with the
    /// built-in egui font for the debug panel, but HUD text stays off.
    pub fn load_hud_font(&mut self, path: &Path) -> Result<(), String> {
        install_hud_font(&self.egui_ctx, path)?;
        self.hud_font_loaded = true;
        log::info!("HUD font loaded from {}", path.display());
        Ok(())
    }

    pub fn has_hud_font(&self) -> bool {
        self.hud_font_loaded
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        hud: HudStats,
        stats: &OverlayStats,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let show_hud = self.hud_font_loaded;
        let visible = self.visible;
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_hud {
                egui::Area::new(egui::Id::new("score_hud"))
                    .fixed_pos([20.0, 20.0])
                    .interactable(false)
                    .show(ctx, |ui| {
                        ui.label(
                            egui::RichText::new(format!("Score: {}", hud.score))
                                .family(egui::FontFamily::Name(HUD_FONT_NAME.into()))
                                .size(HUD_TEXT_SIZE)
                                .color(egui::Color32::WHITE),
                        );
                    });
            }

            if visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 60.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                        ui.label(format!("Ticks this frame: {}", time.steps_this_frame));
                        ui.label(format!("Total ticks: {}", time.tick_count));
                        ui.label(format!("Triangles: {}", stats.triangle_count));

                        ui.separator();
                        ui.label(format!("Level: {}", stats.level_id));
                        ui.label(format!(
                            "Player: ({:.1}, {:.1})",
                            stats.player_position.0, stats.player_position.1
                        ));
                        ui.label(format!(
                            "Velocity: ({:.2}, {:.2})",
                            stats.player_velocity.0, stats.player_velocity.1
                        ));
                        ui.label(format!("Grounded: {}", stats.grounded));
                        ui.label(format!(
                            "Tokens: {}/{}",
                            stats.tokens_collected, stats.tokens_total
                        ));
                        ui.label(format!("Score: {}", hud.score));
                        ui.label(format!("Respawns: {}", stats.respawns));

                        ui.separator();
                        ui.horizontal(|ui| {
                            let pause_label = if stats.paused { "Resume" } else { "Pause" };
                            if ui.button(pause_label).clicked() {
                                actions.toggle_pause = true;
                            }
                            if stats.paused && ui.button("Step").clicked() {
                                actions.single_step = true;
                            }
                            if ui.button("Reset").clicked() {
                                actions.reset_level = true;
                            }
                        });
                        if stats.paused {
                            ui.label("\u{23f8} PAUSED");
                        }
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Read and parse a TTF/OTF file, then register it as the `hud` family.
///
/// egui only parses font data on the next frame and panics if it is invalid,
/// so the bytes are parsed here first and nothing is installed on failure.
fn install_hud_font(ctx: &egui::Context, path: &Path) -> Result<(), String> {
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font {}: {e}", path.display()))?;
    ab_glyph::FontRef::try_from_slice(&bytes)
        .map_err(|e| format!("Failed to parse font {}: {e}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        HUD_FONT_NAME.to_string(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    fonts.families.insert(
        egui::FontFamily::Name(HUD_FONT_NAME.into()),
        vec![HUD_FONT_NAME.to_string()],
    );
    ctx.set_fonts(fonts);
    Ok(())
}
