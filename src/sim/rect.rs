//! Axis-aligned rectangle geometry for the ball, paddles and arena
//!
//! Screen convention: origin top-left, +y down. Point tests are half-open
//! (`x <= p.x < x + w`), so a corner sitting exactly on the right or bottom
//! edge counts as outside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle stored as top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size whose center is at `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn top_left(&self) -> Vec2 {
        self.pos
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Copy moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Copy grown by `delta` in total width/height, keeping the center.
    /// Negative values shrink; the size never goes below zero.
    pub fn inflated(&self, delta: Vec2) -> Self {
        let size = (self.size + delta).max(Vec2::ZERO);
        Self::from_center(self.center(), size)
    }

    pub fn with_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.size)
    }

    /// Half-open point test
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// True iff `other` lies entirely within this rectangle (edges may touch)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }
}
