//! Plain data for everything that lives in a level.
//!
//! Coordinates follow the window: origin top-left, y grows downwards, one unit
//! per logical pixel.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// intersect, so a player resting exactly on a platform is not "inside" it.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    /// Recomputed every tick by the collision pass; gates jumping.
    pub grounded: bool,
}

impl Player {
    pub fn new(spawn: Vec2, size: Vec2) -> Self {
        Self {
            position: spawn,
            velocity: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn respawn(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.velocity = Vec2::ZERO;
    }
}

/// Static level geometry. Fixed for the lifetime of a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    bounds: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, w, h),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Collectible circle. `position` is the top-left of its bounding square,
/// which is also its collision box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub position: Vec2,
    pub radius: f32,
    collected: bool,
}

impl Token {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, Vec2::splat(self.radius * 2.0))
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected. Returns `true` only on the first call.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Points earned this run. Only ever grows until the level is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }
}
