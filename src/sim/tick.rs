//! Fixed timestep simulation tick
//!
//! One tick runs in a fixed order: input dispatch, paddle updates, ball
//! update, then the ball's goal outcome is applied to the score.

use super::ball::BallUpdate;
use super::state::GameState;
use crate::input::{PaddleAction, PaddleCommand};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle commands in arrival order
    pub commands: Vec<PaddleCommand>,
}

impl TickInput {
    pub fn new(commands: Vec<PaddleCommand>) -> Self {
        Self { commands }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> BallUpdate {
    for command in &input.commands {
        let paddle = state.paddle_mut(command.side);
        match command.action {
            PaddleAction::Up => paddle.move_up(),
            PaddleAction::Down => paddle.move_down(),
            PaddleAction::Stop => paddle.stop(),
        }
    }

    state.left.update(&state.arena);
    state.right.update(&state.arena);

    let (ball, arena, left, right, rng) = state.ball_parts();
    let outcome = ball.update(arena, left, right, rng);

    if let Some(scored_by) = outcome.scored_by {
        for &side in scored_by.sides() {
            state.score.score(side);
            log::info!(
                "Player {} scores ({} - {})",
                side.player_number(),
                state.score.player1,
                state.score.player2
            );
        }
    }
    if let Some(side) = outcome.paddle_hit {
        log::debug!("Ball hit paddle {}", side.player_number());
    }

    state.time_ticks += 1;
    outcome
}
