//! CPU-side triangle batch rebuilt every frame.
//!
//! Shapes are appended in draw order (later shapes cover earlier ones) and the
//! whole batch goes out in one `draw_indexed` call.

use crate::vertex::ShapeVertex;
use std::f32::consts::TAU;

pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 30;

/// Convert an 8-bit sRGB colour to the linear values an sRGB surface expects.
pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    fn to_linear(channel: u8) -> f32 {
        let c = channel as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [to_linear(r), to_linear(g), to_linear(b), a as f32 / 255.0]
}

#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u32>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned rectangle, `(x, y)` is the top-left corner.
    pub fn push_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for position in [[x, y], [x + w, y], [x + w, y + h], [x, y + h]] {
            self.vertices.push(ShapeVertex { position, color });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Rectangle with an outline drawn outside its edges.
    #[allow(clippy::too_many_arguments)]
    pub fn push_outlined_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        thickness: f32,
        fill: [f32; 4],
        outline: [f32; 4],
    ) {
        if thickness > 0.0 {
            self.push_rect(
                x - thickness,
                y - thickness,
                w + thickness * 2.0,
                h + thickness * 2.0,
                outline,
            );
        }
        self.push_rect(x, y, w, h, fill);
    }

    /// Filled circle as a triangle fan around its centre.
    pub fn push_circle(&mut self, cx: f32, cy: f32, radius: f32, segments: u32, color: [f32; 4]) {
        let segments = segments.max(3);
        let center = self.vertices.len() as u32;
        self.vertices.push(ShapeVertex {
            position: [cx, cy],
            color,
        });
        for i in 0..segments {
            let angle = TAU * i as f32 / segments as f32;
            self.vertices.push(ShapeVertex {
                position: [cx + radius * angle.cos(), cy + radius * angle.sin()],
                color,
            });
        }
        for i in 0..segments {
            let current = center + 1 + i;
            let next = center + 1 + (i + 1) % segments;
            self.indices.extend_from_slice(&[center, current, next]);
        }
    }

    pub fn push_outlined_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        thickness: f32,
        fill: [f32; 4],
        outline: [f32; 4],
    ) {
        if thickness > 0.0 {
            self.push_circle(cx, cy, radius + thickness, DEFAULT_CIRCLE_SEGMENTS, outline);
        }
        self.push_circle(cx, cy, radius, DEFAULT_CIRCLE_SEGMENTS, fill);
    }
}
