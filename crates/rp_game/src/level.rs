//! Level descriptors: platforms, tokens, spawn and physics tuning, loaded from
//! JSON so the simulation code never hardcodes level content.

use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::entity::{Platform, Token};
use crate::kinematics::PhysicsConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub player: PlayerDesc,
    #[serde(default = "default_token_value")]
    pub token_value: u32,
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub tokens: Vec<TokenDesc>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PlayerDesc {
    pub spawn_x: f32,
    pub spawn_y: f32,
    #[serde(default = "default_player_size")]
    pub width: f32,
    #[serde(default = "default_player_size")]
    pub height: f32,
}

impl Default for PlayerDesc {
    fn default() -> Self {
        Self {
            spawn_x: 50.0,
            spawn_y: 400.0,
            width: default_player_size(),
            height: default_player_size(),
        }
    }
}

impl PlayerDesc {
    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.spawn_y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PlatformDesc {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PlatformDesc {
    pub fn to_platform(&self) -> Platform {
        Platform::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TokenDesc {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_token_radius")]
    pub radius: f32,
}

impl TokenDesc {
    pub fn to_token(&self) -> Token {
        Token::new(Vec2::new(self.x, self.y), self.radius)
    }
}

impl LevelFile {
    /// The classic layout: ground, four ledges, six tokens.
    pub fn builtin() -> Self {
        let platform = |x, y, w, h| PlatformDesc { x, y, w, h };
        let token = |x, y| TokenDesc {
            x,
            y,
            radius: default_token_radius(),
        };
        Self {
            version: "0.1".to_string(),
            level_id: "builtin".to_string(),
            physics: PhysicsConfig::default(),
            player: PlayerDesc::default(),
            token_value: default_token_value(),
            platforms: vec![
                platform(0.0, 550.0, 800.0, 50.0),
                platform(200.0, 450.0, 100.0, 20.0),
                platform(400.0, 350.0, 100.0, 20.0),
                platform(600.0, 250.0, 100.0, 20.0),
                platform(100.0, 200.0, 80.0, 20.0),
            ],
            tokens: vec![
                token(230.0, 410.0),
                token(440.0, 310.0),
                token(640.0, 210.0),
                token(130.0, 160.0),
                token(500.0, 510.0),
                token(700.0, 510.0),
            ],
        }
    }
}

/// Polls a file's mtime so edits can be picked up between ticks.
pub struct LevelWatcher {
    level_path: PathBuf,
    last_seen_modified: Option<SystemTime>,
}

impl LevelWatcher {
    pub fn new(level_path: PathBuf) -> Self {
        let last_seen_modified = modified_time(&level_path);
        Self {
            level_path,
            last_seen_modified,
        }
    }

    pub fn should_reload(&mut self) -> bool {
        let current = modified_time(&self.level_path);
        match (self.last_seen_modified, current) {
            (Some(old), Some(now)) if now > old => {
                self.last_seen_modified = Some(now);
                true
            }
            (None, Some(now)) => {
                self.last_seen_modified = Some(now);
                true
            }
            _ => false,
        }
    }
}

pub fn load_level_from_path(level_path: &Path) -> Result<LevelFile, String> {
    let raw = fs::read_to_string(level_path)
        .map_err(|e| format!("Failed to read level file {}: {e}", level_path.display()))?;
    let level: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", level_path.display()))?;
    validate_level(&level)?;
    Ok(level)
}

pub fn validate_level(level: &LevelFile) -> Result<(), String> {
    let physics = &level.physics;
    let physics_values = [
        ("gravity", physics.gravity),
        ("friction", physics.friction),
        ("move_accel", physics.move_accel),
        ("max_speed", physics.max_speed),
        ("jump_velocity", physics.jump_velocity),
        ("screen_width", physics.screen_width),
        ("screen_height", physics.screen_height),
    ];
    for (name, value) in physics_values {
        if !value.is_finite() {
            return Err(format!(
                "Level validation failed: physics.{name} must be finite"
            ));
        }
    }
    if physics.screen_width <= 0.0 || physics.screen_height <= 0.0 {
        return Err("Level validation failed: screen size must be > 0".to_string());
    }
    if !(0.0..=1.0).contains(&physics.friction) {
        return Err("Level validation failed: friction must be within [0, 1]".to_string());
    }

    let player = &level.player;
    if !player.spawn_x.is_finite() || !player.spawn_y.is_finite() {
        return Err("Level validation failed: player spawn must be finite".to_string());
    }
    if !(player.width > 0.0 && player.height > 0.0) {
        return Err("Level validation failed: player size must be > 0".to_string());
    }
    if player.width > physics.screen_width {
        return Err("Level validation failed: player is wider than the screen".to_string());
    }
    // A spawn below the bottom edge would respawn the player every tick.
    let spawn_x_ok = (0.0..=physics.screen_width - player.width).contains(&player.spawn_x);
    let spawn_y_ok = (0.0..=physics.screen_height).contains(&player.spawn_y);
    if !(spawn_x_ok && spawn_y_ok) {
        return Err(format!(
            "Level validation failed: player spawn ({}, {}) is outside the screen",
            player.spawn_x, player.spawn_y
        ));
    }

    if level.platforms.is_empty() {
        return Err("Level validation failed: platforms array is empty".to_string());
    }
    for (index, platform) in level.platforms.iter().enumerate() {
        let finite = [platform.x, platform.y, platform.w, platform.h]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(format!(
                "Level validation failed: platform {index} has a non-finite value"
            ));
        }
        if platform.w <= 0.0 || platform.h <= 0.0 {
            return Err(format!(
                "Level validation failed: platform {index} must have positive size"
            ));
        }
    }

    for (index, token) in level.tokens.iter().enumerate() {
        if !token.x.is_finite() || !token.y.is_finite() {
            return Err(format!(
                "Level validation failed: token {index} has a non-finite position"
            ));
        }
        if !(token.radius > 0.0 && token.radius.is_finite()) {
            return Err(format!(
                "Level validation failed: token {index} radius must be > 0"
            ));
        }
    }
    if level.tokens.is_empty() {
        log::warn!(
            "Level '{}' has no tokens. This is allowed but often accidental.",
            level.level_id
        );
    }

    Ok(())
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

const fn default_token_value() -> u32 {
    10
}

const fn default_player_size() -> f32 {
    30.0
}

const fn default_token_radius() -> f32 {
    10.0
}
