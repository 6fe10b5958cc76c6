//! Game state and core simulation types
//!
//! Everything the fixed-rate loop mutates lives in one owned struct: arena,
//! both paddles, the ball, the score and the seeded RNG. Nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::ball::{Ball, Velocity};
use super::paddle::{Paddle, Side};
use super::score::Score;
use crate::{ConfigError, Settings};

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub arena: Arena,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Build a fresh session from validated settings
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let arena = Arena::new(settings.arena_width, settings.arena_height)?;
        let paddle_size = Vec2::new(settings.paddle_width, settings.paddle_height);
        let left = Paddle::new(
            Side::Left,
            paddle_size,
            settings.paddle_speed,
            settings.paddle_deflate,
            &arena,
        )?;
        let right = Paddle::new(
            Side::Right,
            paddle_size,
            settings.paddle_speed,
            settings.paddle_deflate,
            &arena,
        )?;

        if settings.ball_size > arena.width() || settings.ball_size > arena.height() {
            return Err(ConfigError::DoesNotFit { what: "ball" });
        }
        let velocity = Velocity::new(settings.ball_start_angle, settings.ball_speed)?;
        let ball = Ball::new(arena.center(), settings.ball_size, velocity)?;

        Ok(Self {
            seed: settings.seed,
            arena,
            left,
            right,
            ball,
            score: Score::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
        })
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Split borrow for the ball update: ball and RNG mutable, the rest shared
    pub(crate) fn ball_parts(&mut self) -> (&mut Ball, &Arena, &Paddle, &Paddle, &mut Pcg32) {
        (
            &mut self.ball,
            &self.arena,
            &self.left,
            &self.right,
            &mut self.rng,
        )
    }
}
