//! Turns a `GameState` into the frame's triangle batch.
//!
//! Draw order is platforms, then uncollected tokens, then the player, so the
//! player is never hidden behind level geometry.

use rp_render::{rgba8, ShapeBatch};

use crate::game::GameState;

const OUTLINE_THICKNESS: f32 = 2.0;

pub const SKY: [u8; 3] = [92, 148, 252];

pub fn sky_clear_color() -> wgpu::Color {
    let [r, g, b, _] = rgba8(SKY[0], SKY[1], SKY[2], 255);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

pub fn build_batch(state: &GameState, batch: &mut ShapeBatch) {
    batch.clear();

    let grass = rgba8(107, 140, 66, 255);
    let grass_edge = rgba8(64, 84, 40, 255);
    for platform in &state.platforms {
        let r = platform.bounds();
        batch.push_outlined_rect(r.x, r.y, r.w, r.h, OUTLINE_THICKNESS, grass, grass_edge);
    }

    let yellow = rgba8(255, 255, 0, 255);
    let gold = rgba8(212, 175, 55, 255);
    for token in state.tokens.iter().filter(|t| !t.is_collected()) {
        let center = token.center();
        batch.push_outlined_circle(
            center.x,
            center.y,
            token.radius,
            OUTLINE_THICKNESS,
            yellow,
            gold,
        );
    }

    let player = state.player.bounds();
    batch.push_rect(
        player.x,
        player.y,
        player.w,
        player.h,
        rgba8(255, 0, 0, 255),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelFile;
    use rp_render::batch::DEFAULT_CIRCLE_SEGMENTS;

    const CIRCLE_VERTICES: usize = DEFAULT_CIRCLE_SEGMENTS as usize + 1;

    #[test]
    fn full_level_batch_has_every_shape() {
        let state = GameState::from_level(&LevelFile::builtin());
        let mut batch = ShapeBatch::new();
        build_batch(&state, &mut batch);

        let platforms = 5 * 2 * 4;
        let tokens = 6 * 2 * CIRCLE_VERTICES;
        let player = 4;
        assert_eq!(batch.vertices().len(), platforms + tokens + player);
    }

    #[test]
    fn collected_tokens_are_not_drawn() {
        let mut state = GameState::from_level(&LevelFile::builtin());
        let mut batch = ShapeBatch::new();
        build_batch(&state, &mut batch);
        let before = batch.vertices().len();

        assert!(state.tokens[0].collect());
        build_batch(&state, &mut batch);
        assert_eq!(batch.vertices().len(), before - 2 * CIRCLE_VERTICES);
    }

    #[test]
    fn player_is_drawn_last() {
        let state = GameState::from_level(&LevelFile::builtin());
        let mut batch = ShapeBatch::new();
        build_batch(&state, &mut batch);
        let last = batch.vertices().last().expect("batch has vertices");
        assert_eq!(last.color, rgba8(255, 0, 0, 255));
        assert_eq!(last.position, [50.0, 430.0]);
    }
}
