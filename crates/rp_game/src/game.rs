//! Everything one play session owns, and the order the per-tick stages run in:
//!
//!   input -> kinematics -> grounded reset -> platform collision -> pickups
//!
//! Nothing here is global; the frame driver owns a single `GameState` and
//! hands it input once per fixed tick.

use glam::Vec2;

use crate::collision::{self, ContactState};
use crate::controller::{self, ControllerInput};
use crate::entity::{Platform, Player, Score, Token};
use crate::kinematics::{self, PhysicsConfig, StepOutcome};
use crate::level::LevelFile;
use crate::pickup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub contacts: ContactState,
    pub tokens_collected: usize,
    pub respawned: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub level_id: String,
    pub physics: PhysicsConfig,
    pub spawn: Vec2,
    pub token_value: u32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub tokens: Vec<Token>,
    pub score: Score,
    pub respawns: u32,
    initial_tokens: Vec<Token>,
}

impl GameState {
    pub fn from_level(level: &LevelFile) -> Self {
        let spawn = level.player.spawn();
        let tokens: Vec<Token> = level.tokens.iter().map(|t| t.to_token()).collect();
        Self {
            level_id: level.level_id.clone(),
            physics: level.physics,
            spawn,
            token_value: level.token_value,
            player: Player::new(spawn, level.player.size()),
            platforms: level.platforms.iter().map(|p| p.to_platform()).collect(),
            initial_tokens: tokens.clone(),
            tokens,
            score: Score::default(),
            respawns: 0,
        }
    }

    pub fn tick(&mut self, input: ControllerInput) -> TickReport {
        controller::apply_input(&mut self.player, input, &self.physics);

        let outcome = kinematics::step(&mut self.player, &self.physics, self.spawn);
        let respawned = outcome == StepOutcome::Respawned;
        if respawned {
            self.respawns += 1;
        }

        self.player.grounded = false;
        let contacts = collision::resolve_all(&mut self.player, &self.platforms);

        let tokens_collected = pickup::collect_tokens(
            &self.player.bounds(),
            &mut self.tokens,
            &mut self.score,
            self.token_value,
        );

        TickReport {
            contacts,
            tokens_collected,
            respawned,
        }
    }

    /// Back to the level's starting state: player at spawn, every token
    /// restored, score zero.
    pub fn reset(&mut self) {
        let size = self.player.size;
        self.player = Player::new(self.spawn, size);
        self.tokens = self.initial_tokens.clone();
        self.score = Score::default();
        self.respawns = 0;
    }

    pub fn tokens_collected(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_collected()).count()
    }

    pub fn all_collected(&self) -> bool {
        self.tokens.iter().all(Token::is_collected)
    }
}
