//! Screen-space camera.
//!
//! The world uses window-style coordinates: origin at the top-left, y growing
//! downwards, one unit per logical pixel of an 800x600 play field. The camera
//! keeps that whole field visible at any window size by widening the view on
//! the longer axis and centering the field inside it.

use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

pub struct Camera2D {
    /// Top-left corner of the play field in world units.
    pub position: Vec2,
    /// Size of the play field that must always be visible.
    pub world_size: Vec2,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(world_width: f32, world_height: f32, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            world_size: Vec2::new(world_width, world_height),
            viewport: (viewport_width, viewport_height),
        }
    }

    /// World-space rectangle actually shown, as `(min, max)` corners.
    pub fn visible_bounds(&self) -> (Vec2, Vec2) {
        let viewport_w = self.viewport.0.max(1) as f32;
        let viewport_h = self.viewport.1.max(1) as f32;
        let viewport_aspect = viewport_w / viewport_h;
        let world_aspect = self.world_size.x / self.world_size.y;

        let visible = if viewport_aspect > world_aspect {
            Vec2::new(self.world_size.y * viewport_aspect, self.world_size.y)
        } else {
            Vec2::new(self.world_size.x, self.world_size.x / viewport_aspect)
        };
        let margin = (visible - self.world_size) * 0.5;
        let min = self.position - margin;
        (min, min + visible)
    }

    pub fn view_proj(&self) -> Mat4 {
        let (min, max) = self.visible_bounds();
        // bottom/top swapped so y grows downwards on screen.
        Mat4::orthographic_rh(min.x, max.x, max.y, min.y, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
