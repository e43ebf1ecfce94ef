//! Rect value object - screen rectangle in physical pixels
//!
//! Window bounds as reported by the OS (left, top, right, bottom).
//! Persisted as a 4-tuple so older saved records keep loading.

use serde::{Deserialize, Serialize};

/// A rectangle defined by its bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32, i32, i32)", into = "(i32, i32, i32, i32)")]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from bounds
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from position and size
    pub fn from_pos_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Get width
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get height
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Top-left corner; used to pick the monitor a window lived on
    pub fn origin(&self) -> (i32, i32) {
        (self.left, self.top)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Check if rectangle is empty (zero or negative area)
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Get area
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width() as i64 * self.height() as i64
        }
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((left, top, right, bottom): (i32, i32, i32, i32)) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<Rect> for (i32, i32, i32, i32) {
    fn from(r: Rect) -> Self {
        (r.left, r.top, r.right, r.bottom)
    }
}
