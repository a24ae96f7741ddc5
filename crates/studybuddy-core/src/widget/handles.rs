//! Handle definitions for widget manipulation.

use crate::geometry::Frame;
use kurbo::{Point, Rect, Size};
use serde::Serialize;

/// Edge length of the square resize grip, in pixels.
pub const RESIZE_HANDLE_SIZE: f64 = 16.0;

/// A manipulation handle on a widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Hit area in viewport coordinates.
    pub rect: Rect,
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HandleKind {
    /// Grows the widget right and down; the top-left corner stays put.
    ResizeBottomRight,
}

impl Handle {
    /// The bottom-right resize grip of `frame`.
    pub fn resize_grip(frame: &Frame) -> Self {
        let corner = frame.rect();
        let size = Size::new(
            RESIZE_HANDLE_SIZE.min(frame.size.width.max(0.0)),
            RESIZE_HANDLE_SIZE.min(frame.size.height.max(0.0)),
        );
        Self {
            kind: HandleKind::ResizeBottomRight,
            rect: Rect::from_origin_size(
                Point::new(corner.x1 - size.width, corner.y1 - size.height),
                size,
            ),
        }
    }

    /// Whether `point` lands on the handle. Edges count as hits.
    pub fn hit_test(&self, point: Point) -> bool {
        point.x >= self.rect.x0
            && point.x <= self.rect.x1
            && point.y >= self.rect.y0
            && point.y <= self.rect.y1
    }
}
