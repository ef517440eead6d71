//! Screen-space geometry for interface elements
//!
//! All coordinates are logical pixels with the origin at the top-left.

use serde::{Deserialize, Serialize};

/// Point in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with non-negative position and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// Negative (or NaN) components are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point is inside this rectangle
    ///
    /// The left and top edges are inside, the right and bottom edges are
    /// not, so adjacent rectangles never both claim a point.
    pub fn contains(&self, pos: Point) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_clamps_negative() {
        let rect = Rect::new(-5.0, 10.0, -1.0, f32::NAN);
        assert_eq!(rect, Rect::new(0.0, 10.0, 0.0, 0.0));
    }

    #[test]
    fn test_rect_contains_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.9, 19.9)));
        assert!(!rect.contains(Point::new(30.0, 15.0)));
        assert!(!rect.contains(Point::new(15.0, 20.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        let rect = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!rect.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_rect_center_and_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert_eq!(a.center(), Point::new(5.0, 5.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
