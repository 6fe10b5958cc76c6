//! Ball motion and collision resolution
//!
//! The ball keeps its velocity in polar form (angle, speed). Each tick the
//! velocity is decomposed into a Cartesian step, the ball is moved, and the
//! new rectangle is resolved against the arena walls, the goal lines and the
//! two paddles. Collisions only ever change the angle; speed is fixed for the
//! whole session.
//!
//! Reflection rules:
//! - horizontal wall: `angle = -angle`
//! - paddle: `angle = π - angle`
//!
//! A one-tick debounce (`HitState`) stops the ball reflecting twice while its
//! rectangle still overlaps the paddle it just bounced off.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::paddle::{Paddle, Side};
use super::rect::Rect;
use crate::consts::{SERVE_ANGLE_MAX, SERVE_ANGLE_MIN};
use crate::{ConfigError, normalize_angle, polar_to_cartesian};

/// Default nudge applied by [`avoid`]
pub const AVOID_TURN: f32 = PI / 40.0;
/// Angles closer than this to a vertical get nudged by [`avoid`]
pub const AVOID_TOO_CLOSE: f32 = PI / 3.0;

/// Polar velocity. `speed` is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Heading in radians (screen space, +y down)
    pub angle: f32,
    speed: f32,
}

impl Velocity {
    pub fn new(angle: f32, speed: f32) -> Result<Self, ConfigError> {
        if !angle.is_finite() {
            return Err(ConfigError::NonFiniteAngle { angle });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed {
                what: "ball",
                speed,
            });
        }
        Ok(Self { angle, speed })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Cartesian displacement for one tick
    #[inline]
    pub fn step(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.angle)
    }
}

/// Paddle-collision debounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitState {
    #[default]
    Clear,
    /// Reflected off a paddle on the previous resolving tick
    JustReflected,
}

/// Who was credited with a point during one ball update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoredBy {
    Left,
    Right,
    /// Both goal checks fired on the same tick
    Both,
}

impl ScoredBy {
    pub fn sides(self) -> &'static [Side] {
        match self {
            ScoredBy::Left => &[Side::Left],
            ScoredBy::Right => &[Side::Right],
            ScoredBy::Both => &[Side::Left, Side::Right],
        }
    }

    fn credit(prev: Option<ScoredBy>, side: Side) -> ScoredBy {
        match (prev, side) {
            (None, Side::Left) => ScoredBy::Left,
            (None, Side::Right) => ScoredBy::Right,
            (Some(ScoredBy::Left), Side::Left) => ScoredBy::Left,
            (Some(ScoredBy::Right), Side::Right) => ScoredBy::Right,
            _ => ScoredBy::Both,
        }
    }
}

/// Outcome of a single [`Ball::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallUpdate {
    /// Side credited with a goal (the scorer, not the side that conceded)
    pub scored_by: Option<ScoredBy>,
    /// Paddle the ball reflected off
    pub paddle_hit: Option<Side>,
    /// Ball reflected off the top or bottom wall
    pub wall_bounce: bool,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub velocity: Velocity,
    pub hit: HitState,
}

impl Ball {
    /// Square ball of side `size` centered on `center`
    pub fn new(center: Vec2, size: f32, velocity: Velocity) -> Result<Self, ConfigError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ConfigError::NonPositiveSize {
                what: "ball",
                width: size,
                height: size,
            });
        }
        Ok(Self {
            rect: Rect::from_center(center, Vec2::splat(size)),
            velocity,
            hit: HitState::Clear,
        })
    }

    /// Heading normalized to [0, 2π)
    pub fn heading(&self) -> f32 {
        normalize_angle(self.velocity.angle)
    }

    /// Move the ball to the middle of the arena
    pub fn recenter(&mut self, arena: &Arena) {
        self.rect = self.rect.with_center(arena.center());
    }

    /// Advance one tick and resolve walls, goals and paddles.
    ///
    /// `left` is player 1's paddle, `right` player 2's.
    pub fn update<R: Rng>(
        &mut self,
        arena: &Arena,
        left: &Paddle,
        right: &Paddle,
        rng: &mut R,
    ) -> BallUpdate {
        let mut outcome = BallUpdate::default();
        let mut angle = self.velocity.angle;

        self.rect = self.rect.translated(self.velocity.step());

        if !arena.contains(&self.rect) {
            let corners = arena.corners_outside(&self.rect);

            if corners.wall_bounce() {
                angle = -angle;
                outcome.wall_bounce = true;
            }

            // Goal checks are independent on purpose: both may fire.
            if corners.left_goal() {
                outcome.scored_by = Some(ScoredBy::credit(outcome.scored_by, Side::Right));
                angle = serve_angle(rng);
                self.recenter(arena);
                log::debug!("Left goal line crossed, serving at {angle:.3} rad");
            }
            if corners.right_goal() {
                outcome.scored_by = Some(ScoredBy::credit(outcome.scored_by, Side::Left));
                angle = serve_angle(rng);
                self.recenter(arena);
                log::debug!("Right goal line crossed, serving at {angle:.3} rad");
            }
        } else if self.hit == HitState::Clear && self.rect.intersects(&left.hitbox()) {
            angle = PI - angle;
            self.hit = HitState::JustReflected;
            outcome.paddle_hit = Some(Side::Left);
        } else if self.hit == HitState::Clear && self.rect.intersects(&right.hitbox()) {
            angle = PI - angle;
            self.hit = HitState::JustReflected;
            outcome.paddle_hit = Some(Side::Right);
        } else if self.hit == HitState::JustReflected {
            self.hit = HitState::Clear;
        }

        self.velocity.angle = angle;
        outcome
    }
}

/// Shallow serve angle: uniform in [0.1, 1.0), pushed off the vertical,
/// then flipped up or down with equal odds.
pub fn serve_angle<R: Rng>(rng: &mut R) -> f32 {
    let angle = avoid(rng.random_range(SERVE_ANGLE_MIN..SERVE_ANGLE_MAX));
    if rng.random_bool(0.5) { -angle } else { angle }
}

/// [`avoid_with`] using the default turn, nudging only near-vertical angles
pub fn avoid(angle: f32) -> f32 {
    avoid_with(angle, false, AVOID_TURN)
}

/// Nudge an angle one step away from the nearest vertical (π/2 or 3π/2).
///
/// The circle is split into four bands at 0, π/2, π, 3π/2. Inside a band the
/// angle moves by `turn` away from the band's vertical edge when it is within
/// π/3 of it, or unconditionally when `always_avoid` is set. One step only;
/// callers wanting to clear the zone must call again.
///
/// No normalization happens here: negative angles land in the first band and
/// anything at or past 3π/2 in the last.
pub fn avoid_with(angle: f32, always_avoid: bool, turn: f32) -> f32 {
    let half_pi = FRAC_PI_2;
    let three_half_pi = 3.0 * FRAC_PI_2;

    if angle < half_pi {
        if always_avoid || (half_pi - angle) < AVOID_TOO_CLOSE {
            return angle - turn;
        }
    } else if angle < PI {
        if always_avoid || (angle - half_pi) < AVOID_TOO_CLOSE {
            return angle + turn;
        }
    } else if angle < three_half_pi {
        if always_avoid || (three_half_pi - angle) < AVOID_TOO_CLOSE {
            return angle - turn;
        }
    } else if always_avoid || (angle - three_half_pi) < AVOID_TOO_CLOSE {
        return angle + turn;
    }
    angle
}
