//! Quincy Pong - a two-paddle arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, collisions, score)
//! - `game`: Fixed-rate loop driving the simulation
//! - `input`: Key bindings and scripted input
//! - `audio`: Sound cue catalogue and sinks
//! - `settings`: Data-driven startup configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Paddle defaults (units per tick)
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 60.0;
    /// Margin the paddle hit-box shrinks by before testing the ball
    pub const PADDLE_DEFLATE: f32 = 3.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 12.0;
    pub const BALL_SPEED: f32 = 10.0;
    pub const BALL_START_ANGLE: f32 = 0.47;

    /// Serve angle range (radians), before `avoid` and the random flip
    pub const SERVE_ANGLE_MIN: f32 = 0.1;
    pub const SERVE_ANGLE_MAX: f32 = 1.0;

    /// Score labels sit this far either side of the arena center
    pub const SCORE_LABEL_OFFSET: f32 = 100.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // Tiny negative inputs round up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
