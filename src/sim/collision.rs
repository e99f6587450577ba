//! Axis-aligned rectangle collision
//!
//! Paddle and target are both plain integer rectangles in field units, with
//! the origin at the top-left and y growing downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (origin = top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(origin: IVec2, size: IVec2) -> Self {
        Self { origin, size }
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// True if the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Check whether two rectangles overlap
    ///
    /// Rectangles that only share an edge do not collide, and an empty
    /// rectangle never collides with anything.
    pub fn collides(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && self.top() < other.bottom()
            && self.right() > other.left()
            && self.bottom() > other.top()
    }
}
