//! Per-gesture session state.

use crate::geometry::{Frame, Viewport, clamp_position, clamp_size};
use crate::widget::WidgetId;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// What a live gesture is doing to its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Moving,
    Resizing,
}

/// How a gesture asked to manipulate its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grab {
    Move,
    Resize,
}

/// State of one pointer-down .. pointer-up gesture on a single widget.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    /// The widget being manipulated.
    pub widget: WidgetId,
    /// Moving or resizing (never idle while the session exists).
    pub mode: InteractionMode,
    /// Pointer-to-origin offset when moving; last pointer position when resizing.
    anchor: Vec2,
    /// Where the pointer went down.
    pub origin: Point,
    /// Latched once the pointer travelled past the motion threshold.
    moved: bool,
    /// Whether this session holds the global drag designation.
    pub(crate) holds_drag: bool,
}

impl InteractionSession {
    pub(crate) fn begin(widget: WidgetId, grab: Grab, pointer: Point, frame: &Frame) -> Self {
        let (mode, anchor) = match grab {
            Grab::Move => (InteractionMode::Moving, pointer - frame.position),
            Grab::Resize => (InteractionMode::Resizing, pointer.to_vec2()),
        };
        Self {
            widget,
            mode,
            anchor,
            origin: pointer,
            moved: false,
            holds_drag: false,
        }
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Apply one pointer move to `frame`. Returns whether the geometry changed.
    ///
    /// The frame stays put until the pointer has travelled past `threshold`,
    /// so a gesture that ends as a click never changes geometry.
    pub(crate) fn track(
        &mut self,
        pointer: Point,
        frame: &mut Frame,
        bounds: Viewport,
        threshold: f64,
    ) -> bool {
        if !self.moved && self.origin.distance(pointer) >= threshold {
            self.moved = true;
        }
        if !self.moved {
            return false;
        }

        let before = *frame;
        match self.mode {
            InteractionMode::Moving => {
                frame.position = clamp_position(pointer - self.anchor, frame.size, bounds);
            }
            InteractionMode::Resizing => {
                let delta = pointer - self.anchor.to_point();
                let grown = clamp_size(frame.size + delta.to_size(), frame.min_size);
                frame.size = cap_to_bounds(grown, frame, bounds);
                self.anchor = pointer.to_vec2();
            }
            InteractionMode::Idle => {}
        }
        *frame != before
    }
}

/// Keep the right/bottom edge inside `bounds` without dropping below the floor.
fn cap_to_bounds(size: Size, frame: &Frame, bounds: Viewport) -> Size {
    let limit = bounds.size();
    let room_w = limit.width - frame.position.x;
    let room_h = limit.height - frame.position.y;
    Size::new(
        size.width.min(room_w).max(frame.min_size.width),
        size.height.min(room_h).max(frame.min_size.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn note_frame() -> Frame {
        Frame::new(
            Point::new(100.0, 100.0),
            Size::new(384.0, 200.0),
            Size::new(300.0, 150.0),
        )
    }

    #[test]
    fn test_move_keeps_grab_offset() {
        let mut frame = Frame::fixed(Point::new(50.0, 50.0), Size::new(80.0, 80.0));
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Move, Point::new(100.0, 100.0), &frame);
        assert!(session.track(Point::new(140.0, 160.0), &mut frame, VIEWPORT, 0.0));
        assert_eq!(frame.position, Point::new(90.0, 110.0));
        assert!(session.moved());
    }

    #[test]
    fn test_resize_is_incremental() {
        let mut frame = note_frame();
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Resize, Point::new(484.0, 300.0), &frame);
        session.track(Point::new(494.0, 310.0), &mut frame, VIEWPORT, 0.0);
        session.track(Point::new(504.0, 320.0), &mut frame, VIEWPORT, 0.0);
        assert_eq!(frame.size, Size::new(404.0, 220.0));
        assert_eq!(frame.position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_resize_floor() {
        let mut frame = note_frame();
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Resize, Point::new(484.0, 300.0), &frame);
        session.track(Point::new(-16.0, -200.0), &mut frame, VIEWPORT, 0.0);
        assert_eq!(frame.size, Size::new(300.0, 150.0));
    }

    #[test]
    fn test_resize_capped_at_viewport_edge() {
        let mut frame = note_frame();
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Resize, Point::new(484.0, 300.0), &frame);
        session.track(Point::new(5000.0, 5000.0), &mut frame, VIEWPORT, 0.0);
        assert_eq!(frame.size, Size::new(1180.0, 700.0));
    }

    #[test]
    fn test_threshold_hysteresis() {
        let mut frame = Frame::fixed(Point::new(50.0, 50.0), Size::new(80.0, 80.0));
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Move, Point::new(100.0, 100.0), &frame);
        session.track(Point::new(102.0, 100.0), &mut frame, VIEWPORT, 4.0);
        assert!(!session.moved());
        session.track(Point::new(105.0, 100.0), &mut frame, VIEWPORT, 4.0);
        assert!(session.moved());
        // Latched even after returning to the origin.
        session.track(Point::new(100.0, 100.0), &mut frame, VIEWPORT, 4.0);
        assert!(session.moved());
    }

    #[test]
    fn test_jitter_below_threshold_leaves_frame() {
        let mut frame = Frame::fixed(Point::new(50.0, 50.0), Size::new(80.0, 80.0));
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Move, Point::new(100.0, 100.0), &frame);
        assert!(!session.track(Point::new(102.0, 100.0), &mut frame, VIEWPORT, 3.0));
        assert_eq!(frame.position, Point::new(50.0, 50.0));

        // Once latched, the widget follows the full offset from the press.
        assert!(session.track(Point::new(110.0, 100.0), &mut frame, VIEWPORT, 3.0));
        assert_eq!(frame.position, Point::new(60.0, 50.0));
    }

    #[test]
    fn test_resize_keeps_delta_from_press_until_latched() {
        let mut frame = note_frame();
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Resize, Point::new(484.0, 300.0), &frame);
        session.track(Point::new(486.0, 301.0), &mut frame, VIEWPORT, 5.0);
        assert_eq!(frame.size, Size::new(384.0, 200.0));

        session.track(Point::new(494.0, 310.0), &mut frame, VIEWPORT, 5.0);
        assert_eq!(frame.size, Size::new(394.0, 210.0));
    }

    #[test]
    fn test_zero_threshold_latches_on_any_move() {
        let mut frame = Frame::fixed(Point::new(50.0, 50.0), Size::new(80.0, 80.0));
        let mut session =
            InteractionSession::begin(Uuid::new_v4(), Grab::Move, Point::new(100.0, 100.0), &frame);
        let changed = session.track(Point::new(100.0, 100.0), &mut frame, VIEWPORT, 0.0);
        assert!(!changed);
        assert!(session.moved());
    }
}
