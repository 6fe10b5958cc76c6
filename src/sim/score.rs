//! Match score: two monotonic counters and a one-shot change flag

use serde::{Deserialize, Serialize};

use super::paddle::Side;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
    /// Set on every point; consumers read-and-clear it via `consume_changed`
    changed: bool,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one point to `side` (Left = player 1, Right = player 2)
    pub fn score(&mut self, side: Side) {
        match side {
            Side::Left => self.player1 = self.player1.saturating_add(1),
            Side::Right => self.player2 = self.player2.saturating_add(1),
        }
        self.changed = true;
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.player1,
            Side::Right => self.player2,
        }
    }

    /// Return whether the score changed since the last call, then clear the flag
    pub fn consume_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }
}
