//! Per-tick integration: gravity, friction, move, clamp to the screen, and
//! respawn after falling out of it.
//!
//! All quantities are per tick, not per second. The simulation is only
//! meaningful when advanced at the fixed tick rate.

use glam::Vec2;
use serde::Deserialize;

use crate::entity::Player;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to velocity.y every tick.
    pub gravity: f32,
    /// Multiplies velocity.x every tick, input or not.
    pub friction: f32,
    /// Horizontal acceleration per tick while a direction is held.
    pub move_accel: f32,
    /// Input stops accelerating once |velocity.x| reaches this.
    pub max_speed: f32,
    /// velocity.y assigned by a jump (negative is up).
    pub jump_velocity: f32,
    pub screen_width: f32,
    /// Falling below this y (top edge of the player) triggers a respawn.
    pub screen_height: f32,
    /// Zero velocity.x when the screen-edge clamp moves the player.
    pub stop_at_walls: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            friction: 0.85,
            move_accel: 0.6,
            max_speed: 5.0,
            jump_velocity: -13.0,
            screen_width: 800.0,
            screen_height: 600.0,
            stop_at_walls: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Player fell off the bottom and was put back at spawn.
    Respawned,
}

pub fn step(player: &mut Player, physics: &PhysicsConfig, spawn: Vec2) -> StepOutcome {
    player.velocity.y += physics.gravity;
    player.velocity.x *= physics.friction;

    player.position += player.velocity;

    let max_x = physics.screen_width - player.size.x;
    let clamped_x = player.position.x.max(0.0).min(max_x);
    if clamped_x != player.position.x {
        player.position.x = clamped_x;
        if physics.stop_at_walls {
            player.velocity.x = 0.0;
        }
    }

    if player.position.y > physics.screen_height {
        player.respawn(spawn);
        return StepOutcome::Respawned;
    }
    StepOutcome::Moved
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAWN: Vec2 = Vec2::new(50.0, 400.0);

    fn player_at(x: f32, y: f32, vx: f32, vy: f32) -> Player {
        let mut player = Player::new(Vec2::new(x, y), Vec2::splat(30.0));
        player.velocity = Vec2::new(vx, vy);
        player
    }

    #[test]
    fn gravity_and_friction_apply_before_moving() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(100.0, 100.0, 2.0, 0.0);
        assert_eq!(step(&mut player, &physics, SPAWN), StepOutcome::Moved);
        assert!((player.velocity.y - 0.6).abs() < 1e-6);
        assert!((player.velocity.x - 1.7).abs() < 1e-6);
        assert!((player.position.x - 101.7).abs() < 1e-4);
        assert!((player.position.y - 100.6).abs() < 1e-4);
    }

    #[test]
    fn left_edge_clamp_keeps_velocity() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(1.0, 100.0, -5.0, 0.0);
        step(&mut player, &physics, SPAWN);
        assert_eq!(player.position.x, 0.0);
        assert!(player.velocity.x < 0.0);
    }

    #[test]
    fn right_edge_clamp_respects_player_width() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(768.0, 100.0, 5.0, 0.0);
        step(&mut player, &physics, SPAWN);
        assert_eq!(player.position.x, 770.0);
        assert!(player.velocity.x > 0.0);
    }

    #[test]
    fn stop_at_walls_zeroes_velocity_on_clamp() {
        let physics = PhysicsConfig {
            stop_at_walls: true,
            ..PhysicsConfig::default()
        };
        let mut player = player_at(768.0, 100.0, 5.0, 0.0);
        step(&mut player, &physics, SPAWN);
        assert_eq!(player.position.x, 770.0);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn horizontal_position_stays_on_screen_for_any_velocity() {
        let physics = PhysicsConfig::default();
        for vx in [-1.0e6, -40.0, -5.0, 0.0, 5.0, 40.0, 1.0e6] {
            for x in [0.0, 1.0, 385.0, 769.0, 770.0] {
                let mut player = player_at(x, 100.0, vx, 0.0);
                step(&mut player, &physics, SPAWN);
                assert!(
                    (0.0..=770.0).contains(&player.position.x),
                    "x={x} vx={vx} ended at {}",
                    player.position.x
                );
            }
        }
    }

    #[test]
    fn falling_off_screen_respawns_with_zero_velocity() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(300.0, 601.0, 2.0, 0.0);
        assert_eq!(step(&mut player, &physics, SPAWN), StepOutcome::Respawned);
        assert_eq!(player.position, SPAWN);
        assert_eq!(player.velocity, Vec2::ZERO);
    }

    #[test]
    fn just_above_bottom_edge_does_not_respawn() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(300.0, 599.0, 0.0, 0.0);
        // Ends at 599.6, still on screen.
        assert_eq!(step(&mut player, &physics, SPAWN), StepOutcome::Moved);
    }
}
