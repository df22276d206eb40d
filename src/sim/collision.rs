//! Axis-aligned rectangles and overlap testing
//!
//! Edges that merely touch do not count as a collision, so a bird flying
//! exactly along the lip of a pipe survives.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Same rectangle moved by (-dx, -dy), e.g. world to camera space
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x - dx, self.y - dy, self.w, self.h)
    }
}

/// Check whether two rectangles overlap
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    // a left of b
    if a.right() <= b.x {
        return false;
    }
    // b left of a
    if b.right() <= a.x {
        return false;
    }
    // a above b
    if a.bottom() <= b.y {
        return false;
    }
    // b above a
    if b.bottom() <= a.y {
        return false;
    }
    true
}
