use rp_core::input::{InputState, Key};

use crate::entity::Player;
use crate::kinematics::PhysicsConfig;

const LEFT_KEYS: &[Key] = &[Key::Left, Key::A];
const RIGHT_KEYS: &[Key] = &[Key::Right, Key::D];
const JUMP_KEYS: &[Key] = &[Key::Space, Key::W, Key::Up];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerInput {
    pub left: bool,
    pub right: bool,
    /// Level-triggered: holding jump re-jumps on every landing.
    pub jump: bool,
}

impl ControllerInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.any_held(LEFT_KEYS),
            right: input.any_held(RIGHT_KEYS),
            jump: input.any_held(JUMP_KEYS),
        }
    }
}

/// Apply one tick of player intent. Runs before the kinematics step, so jump
/// reads the grounded flag left by the previous tick's collision pass.
pub fn apply_input(player: &mut Player, input: ControllerInput, physics: &PhysicsConfig) {
    // Acceleration only applies below max speed, so one tick can overshoot by
    // up to `move_accel` before friction pulls it back.
    if input.left && player.velocity.x > -physics.max_speed {
        player.velocity.x -= physics.move_accel;
    }
    if input.right && player.velocity.x < physics.max_speed {
        player.velocity.x += physics.move_accel;
    }

    if input.jump && player.grounded {
        player.velocity.y = physics.jump_velocity;
        player.grounded = false;
    }
}
