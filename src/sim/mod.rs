//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (units per tick, no wall-clock time)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod ball;
pub mod paddle;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use arena::{Arena, CornersOutside};
pub use ball::{
    AVOID_TOO_CLOSE, AVOID_TURN, Ball, BallUpdate, HitState, ScoredBy, Velocity, avoid,
    avoid_with, serve_angle,
};
pub use paddle::{Paddle, PaddleState, Side};
pub use rect::Rect;
pub use score::Score;
pub use state::GameState;
pub use tick::{TickInput, tick};
