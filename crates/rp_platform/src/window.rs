use std::path::PathBuf;
use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// TTF/OTF used for the score HUD. `None` disables HUD text entirely and
    /// the score is only reported on the console.
    pub hud_font_path: Option<PathBuf>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Retro Platformer".to_string(),
            width: 800,
            height: 600,
            hud_font_path: Some(PathBuf::from("assets/fonts/arial.ttf")),
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_min_inner_size(winit::dpi::LogicalSize::new(
            config.width / 4,
            config.height / 4,
        ));

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Failed to create window '{}': {e}", config.title))?;
    log::debug!("Window scale factor: {}", window.scale_factor());
    Ok(Arc::new(window))
}
