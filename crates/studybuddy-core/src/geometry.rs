//! Viewport clamping for floating widget geometry.
//!
//! All functions here are pure. Non-finite inputs never leak into the
//! result: NaN or infinite coordinates collapse to zero, and negative or
//! non-finite sizes collapse to zero (or to the floor for [`clamp_size`]).

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// The visible drawing surface, in pixels.
///
/// Owned by the host (window resizes change it); the engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport as a size, with degenerate dimensions collapsed to zero.
    pub fn size(&self) -> Size {
        Size::new(non_negative(self.width), non_negative(self.height))
    }

    /// A viewport with a strip of `height` removed from the bottom.
    pub fn without_bottom(&self, height: f64) -> Viewport {
        Viewport::new(self.width, non_negative(self.height - non_negative(height)))
    }

    /// The full viewport as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size())
    }
}

/// Position, size, and resize floor of a floating widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub position: Point,
    pub size: Size,
    pub min_size: Size,
}

impl Frame {
    pub fn new(position: Point, size: Size, min_size: Size) -> Self {
        Self {
            position,
            size,
            min_size,
        }
    }

    /// A frame whose size can never change.
    pub fn fixed(position: Point, size: Size) -> Self {
        Self::new(position, size, size)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Enforce the size floor, then pull the frame back inside `bounds`.
    pub fn settle(&mut self, bounds: Viewport) {
        self.size = clamp_size(self.size, self.min_size);
        self.position = clamp_position(self.position, self.size, bounds);
    }

    /// Whether the frame currently satisfies the floor and containment rules.
    pub fn is_settled(&self, bounds: Viewport) -> bool {
        let limit = bounds.size();
        let max_x = non_negative(limit.width - self.size.width);
        let max_y = non_negative(limit.height - self.size.height);
        self.size.width >= self.min_size.width
            && self.size.height >= self.min_size.height
            && (0.0..=max_x).contains(&self.position.x)
            && (0.0..=max_y).contains(&self.position.y)
    }
}

/// Clamp `pos` so a `size` rectangle stays inside `viewport`.
///
/// When the object is larger than the viewport on an axis, that axis pins to
/// zero and the object overflows right/down instead of inverting.
pub fn clamp_position(pos: Point, size: Size, viewport: Viewport) -> Point {
    let limit = viewport.size();
    let max_x = non_negative(limit.width - non_negative(size.width));
    let max_y = non_negative(limit.height - non_negative(size.height));
    Point::new(
        finite_or_zero(pos.x).clamp(0.0, max_x),
        finite_or_zero(pos.y).clamp(0.0, max_y),
    )
}

/// Raise each axis of `size` to at least `min_size`.
pub fn clamp_size(size: Size, min_size: Size) -> Size {
    let floor_w = non_negative(min_size.width);
    let floor_h = non_negative(min_size.height);
    Size::new(
        non_negative(size.width).max(floor_w),
        non_negative(size.height).max(floor_h),
    )
}

/// Strict overlap test: rectangles that only share an edge do not intersect.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x1 > b.x0 && a.x0 < b.x1 && a.y1 > b.y0 && a.y0 < b.y1
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn test_clamp_inside_is_identity() {
        let p = clamp_position(Point::new(100.0, 200.0), Size::new(80.0, 80.0), VIEWPORT);
        assert_eq!(p, Point::new(100.0, 200.0));
    }

    #[test]
    fn test_clamp_past_right_and_bottom() {
        let p = clamp_position(Point::new(5000.0, 5000.0), Size::new(80.0, 80.0), VIEWPORT);
        assert_eq!(p, Point::new(1200.0, 720.0));
    }

    #[test]
    fn test_clamp_negative() {
        let p = clamp_position(Point::new(-10.0, -0.5), Size::new(80.0, 80.0), VIEWPORT);
        assert_eq!(p, Point::ORIGIN);
    }

    #[test]
    fn test_oversized_object_pins_to_zero() {
        let p = clamp_position(Point::new(50.0, 50.0), Size::new(2000.0, 80.0), VIEWPORT);
        assert_eq!(p, Point::new(0.0, 50.0));
    }

    #[test]
    fn test_nan_position_collapses() {
        let p = clamp_position(Point::new(f64::NAN, f64::INFINITY), Size::new(80.0, 80.0), VIEWPORT);
        assert_eq!(p, Point::ORIGIN);
    }

    #[test]
    fn test_nan_viewport_collapses() {
        let p = clamp_position(
            Point::new(30.0, 30.0),
            Size::new(10.0, 10.0),
            Viewport::new(f64::NAN, -5.0),
        );
        assert_eq!(p, Point::ORIGIN);
    }

    #[test]
    fn test_clamp_size_floor() {
        let s = clamp_size(Size::new(-116.0, -300.0), Size::new(300.0, 150.0));
        assert_eq!(s, Size::new(300.0, 150.0));
        let s = clamp_size(Size::new(f64::NAN, 400.0), Size::new(300.0, 150.0));
        assert_eq!(s, Size::new(300.0, 400.0));
    }

    #[test]
    fn test_clamp_size_negative_floor() {
        let s = clamp_size(Size::new(-3.0, 10.0), Size::new(-1.0, f64::NAN));
        assert_eq!(s, Size::new(0.0, 10.0));
    }

    #[test]
    fn test_rects_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rects_intersect(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(rects_intersect(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
    }

    #[test]
    fn test_frame_settle() {
        let mut frame = Frame::new(
            Point::new(1200.0, 700.0),
            Size::new(100.0, 100.0),
            Size::new(300.0, 150.0),
        );
        frame.settle(VIEWPORT);
        assert_eq!(frame.size, Size::new(300.0, 150.0));
        assert_eq!(frame.position, Point::new(980.0, 650.0));
        assert!(frame.is_settled(VIEWPORT));
    }

    #[test]
    fn test_without_bottom() {
        assert_eq!(VIEWPORT.without_bottom(72.0), Viewport::new(1280.0, 728.0));
        assert_eq!(VIEWPORT.without_bottom(2000.0), Viewport::new(1280.0, 0.0));
    }
}
