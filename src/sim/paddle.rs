//! Player paddles ("bats")
//!
//! A paddle moves only when its whole translated rectangle still fits inside
//! the arena. There is no clamping: a paddle that would overshoot the wall
//! simply stays put for that tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::rect::Rect;
use crate::ConfigError;

/// Which end of the arena a paddle defends. Also names the player:
/// `Left` is player 1, `Right` is player 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// 1 for the left player, 2 for the right
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

/// Direction the paddle is being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleState {
    #[default]
    Still,
    MovingUp,
    MovingDown,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    pub side: Side,
    /// Translation applied on each `update`
    pub move_delta: Vec2,
    pub state: PaddleState,
    /// Units per tick
    speed: f32,
    /// Margin the hit-box shrinks by for ball collision
    deflate: f32,
}

impl Paddle {
    /// Create a paddle at its home position on `side`
    pub fn new(
        side: Side,
        size: Vec2,
        speed: f32,
        deflate: f32,
        arena: &Arena,
    ) -> Result<Self, ConfigError> {
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(ConfigError::NonPositiveSize {
                what: "paddle",
                width: size.x,
                height: size.y,
            });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed {
                what: "paddle",
                speed,
            });
        }
        if size.x > arena.width() || size.y > arena.height() {
            return Err(ConfigError::DoesNotFit { what: "paddle" });
        }

        let mut paddle = Self {
            rect: Rect::new(0.0, 0.0, size.x, size.y),
            side,
            move_delta: Vec2::ZERO,
            state: PaddleState::Still,
            speed,
            deflate: deflate.max(0.0),
        };
        paddle.reinit(arena);
        Ok(paddle)
    }

    /// Stop and return to the middle of this paddle's edge
    pub fn reinit(&mut self, arena: &Arena) {
        self.stop();
        let y = (arena.height() - self.rect.size.y) / 2.0;
        let x = match self.side {
            Side::Left => 0.0,
            Side::Right => arena.width() - self.rect.size.x,
        };
        self.rect.pos = Vec2::new(x, y);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn move_up(&mut self) {
        self.move_delta.y = -self.speed;
        self.state = PaddleState::MovingUp;
    }

    pub fn move_down(&mut self) {
        self.move_delta.y = self.speed;
        self.state = PaddleState::MovingDown;
    }

    pub fn stop(&mut self) {
        self.move_delta = Vec2::ZERO;
        self.state = PaddleState::Still;
    }

    /// Apply `move_delta`, rejecting the whole step if it would leave the arena.
    /// Returns whether the paddle moved.
    pub fn update(&mut self, arena: &Arena) -> bool {
        if self.move_delta == Vec2::ZERO {
            return false;
        }
        let candidate = self.rect.translated(self.move_delta);
        if arena.contains(&candidate) {
            self.rect = candidate;
            true
        } else {
            false
        }
    }

    /// Shrunken rectangle the ball is tested against
    pub fn hitbox(&self) -> Rect {
        self.rect.inflated(Vec2::splat(-self.deflate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(ARENA_WIDTH, ARENA_HEIGHT).unwrap()
    }

    fn paddle(side: Side) -> Paddle {
        Paddle::new(
            side,
            Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            PADDLE_SPEED,
            PADDLE_DEFLATE,
            &arena(),
        )
        .unwrap()
    }

    #[test]
    fn test_home_positions() {
        let left = paddle(Side::Left);
        assert_eq!(left.rect.left(), 0.0);
        assert_eq!(left.rect.center().y, ARENA_HEIGHT / 2.0);

        let right = paddle(Side::Right);
        assert_eq!(right.rect.right(), ARENA_WIDTH);
        assert_eq!(right.rect.center().y, ARENA_HEIGHT / 2.0);
    }

    #[test]
    fn test_move_up_down_stop() {
        let arena = arena();
        let mut p = paddle(Side::Left);
        let start_y = p.rect.top();

        p.move_up();
        assert_eq!(p.state, PaddleState::MovingUp);
        assert!(p.update(&arena));
        assert_eq!(p.rect.top(), start_y - PADDLE_SPEED);

        p.move_down();
        assert_eq!(p.state, PaddleState::MovingDown);
        assert_eq!(p.move_delta.y, PADDLE_SPEED);
        p.update(&arena);
        assert_eq!(p.rect.top(), start_y);

        p.stop();
        assert_eq!(p.state, PaddleState::Still);
        assert_eq!(p.move_delta, Vec2::ZERO);
        assert!(!p.update(&arena));
        assert_eq!(p.rect.top(), start_y);
    }

    #[test]
    fn test_blocked_step_is_rejected_not_clamped() {
        let arena = arena();
        let mut p = paddle(Side::Right);
        p.rect.pos.y = 4.0;
        p.move_up();

        assert!(!p.update(&arena));
        assert_eq!(p.rect.top(), 4.0, "paddle halts short of the wall");
        assert_eq!(p.state, PaddleState::MovingUp, "held direction is kept");
    }

    #[test]
    fn test_reaches_wall_exactly_when_aligned() {
        let arena = arena();
        let mut p = paddle(Side::Left);
        p.move_down();
        for _ in 0..100 {
            p.update(&arena);
        }
        assert_eq!(p.rect.bottom(), ARENA_HEIGHT);
    }

    #[test]
    fn test_hitbox_is_deflated() {
        let p = paddle(Side::Left);
        let hb = p.hitbox();
        assert_eq!(hb.center(), p.rect.center());
        assert_eq!(hb.size, p.rect.size - Vec2::splat(PADDLE_DEFLATE));
    }

    #[test]
    fn test_rejects_bad_construction() {
        let arena = arena();
        assert!(Paddle::new(Side::Left, Vec2::new(0.0, 60.0), 10.0, 3.0, &arena).is_err());
        assert!(Paddle::new(Side::Left, Vec2::new(10.0, 60.0), 0.0, 3.0, &arena).is_err());
        assert!(Paddle::new(Side::Left, Vec2::new(10.0, 600.0), 10.0, 3.0, &arena).is_err());
    }

    proptest! {
        #[test]
        fn paddle_never_leaves_arena(moves in proptest::collection::vec(0u8..3, 0..200)) {
            let arena = arena();
            let mut p = paddle(Side::Left);
            for m in moves {
                match m {
                    0 => p.move_up(),
                    1 => p.move_down(),
                    _ => p.stop(),
                }
                p.update(&arena);
                prop_assert!(arena.contains(&p.rect));
            }
        }
    }
}
