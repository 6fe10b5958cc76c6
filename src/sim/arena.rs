//! The playing field: a fixed rectangle whose left and right edges are goal lines

use glam::Vec2;
use super::rect::Rect;
use crate::ConfigError;

/// Which corners of a rectangle fall outside the arena
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CornersOutside {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl CornersOutside {
    /// Top pair or bottom pair escaped: the ball crossed a horizontal wall
    pub fn wall_bounce(&self) -> bool {
        (self.top_right && self.top_left) || (self.bottom_right && self.bottom_left)
    }

    /// Both left corners escaped: ball crossed the left goal line
    pub fn left_goal(&self) -> bool {
        self.top_left && self.bottom_left
    }

    /// Both right corners escaped: ball crossed the right goal line
    pub fn right_goal(&self) -> bool {
        self.top_right && self.bottom_right
    }
}

/// Immutable arena bounds `[0, 0, width, height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::ArenaTooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True iff `rect` lies entirely within the arena
    pub fn contains(&self, rect: &Rect) -> bool {
        self.bounds().contains_rect(rect)
    }

    /// Test each corner of `rect` independently against the arena
    pub fn corners_outside(&self, rect: &Rect) -> CornersOutside {
        let bounds = self.bounds();
        CornersOutside {
            top_left: !bounds.contains_point(rect.top_left()),
            top_right: !bounds.contains_point(rect.top_right()),
            bottom_left: !bounds.contains_point(rect.bottom_left()),
            bottom_right: !bounds.contains_point(rect.bottom_right()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_arena() {
        assert!(Arena::new(0.0, 480.0).is_err());
        assert!(Arena::new(640.0, -1.0).is_err());
        assert!(Arena::new(f32::NAN, 480.0).is_err());
        assert!(Arena::new(f32::INFINITY, 480.0).is_err());
        assert!(Arena::new(640.0, 480.0).is_ok());
    }

    #[test]
    fn test_center_and_bounds() {
        let arena = Arena::new(640.0, 480.0).unwrap();
        assert_eq!(arena.center(), Vec2::new(320.0, 240.0));
        assert_eq!(arena.bounds(), Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_corners_outside_top_wall() {
        let arena = Arena::new(640.0, 480.0).unwrap();
        let rect = Rect::new(100.0, -3.0, 12.0, 12.0);
        assert!(!arena.contains(&rect));
        let c = arena.corners_outside(&rect);
        assert!(c.top_left && c.top_right);
        assert!(!c.bottom_left && !c.bottom_right);
        assert!(c.wall_bounce());
        assert!(!c.left_goal() && !c.right_goal());
    }

    #[test]
    fn test_corners_outside_goal_lines() {
        let arena = Arena::new(640.0, 480.0).unwrap();

        let left = arena.corners_outside(&Rect::new(-2.0, 100.0, 12.0, 12.0));
        assert!(left.left_goal());
        assert!(!left.right_goal());
        assert!(!left.wall_bounce());

        let right = arena.corners_outside(&Rect::new(632.0, 100.0, 12.0, 12.0));
        assert!(right.right_goal());
        assert!(!right.left_goal());
    }
}
