//! Pointer input for the dashboard surface.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// `Leave` is sent when the pointer exits the tracked surface (or capture is
/// lost) without a release; any gesture in flight is then force-terminated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Leave,
}

impl PointerEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => Some(*position),
            PointerEvent::Leave => None,
        }
    }
}

/// Which part of a widget a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrabTarget {
    /// The widget body; starts a move.
    Body,
    /// The bottom-right resize handle; starts a resize.
    ResizeHandle,
}

/// Tracks the primary pointer across events.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Last known pointer position.
    pub position: Point,
    /// Whether the primary button is held.
    pub pressed: bool,
    /// Where the primary button went down.
    pub press_origin: Option<Point>,
    /// Whether the pointer is over the tracked surface.
    pub inside: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the state.
    ///
    /// Returns false for events the engine ignores (non-primary buttons).
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::Down { position, button } => {
                self.position = position;
                self.inside = true;
                if button != MouseButton::Left {
                    return false;
                }
                self.pressed = true;
                self.press_origin = Some(position);
            }
            PointerEvent::Move { position } => {
                self.position = position;
                self.inside = true;
            }
            PointerEvent::Up { position, button } => {
                self.position = position;
                if button != MouseButton::Left {
                    return false;
                }
                self.pressed = false;
                self.press_origin = None;
            }
            PointerEvent::Leave => {
                self.inside = false;
                self.pressed = false;
                self.press_origin = None;
            }
        }
        true
    }

    /// Displacement from the press origin, while pressed.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.press_origin.map(|start| self.position - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut pointer = PointerState::new();
        assert!(pointer.handle(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        }));
        assert!(pointer.pressed);
        assert_eq!(pointer.press_origin, Some(Point::new(100.0, 100.0)));

        pointer.handle(&PointerEvent::Move {
            position: Point::new(150.0, 120.0),
        });
        let delta = pointer.drag_delta().unwrap();
        assert!((delta.x - 50.0).abs() < f64::EPSILON);
        assert!((delta.y - 20.0).abs() < f64::EPSILON);

        pointer.handle(&PointerEvent::Up {
            position: Point::new(150.0, 120.0),
            button: MouseButton::Left,
        });
        assert!(!pointer.pressed);
        assert!(pointer.drag_delta().is_none());
    }

    #[test]
    fn test_secondary_buttons_ignored() {
        let mut pointer = PointerState::new();
        assert!(!pointer.handle(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
        }));
        assert!(!pointer.pressed);
        assert_eq!(pointer.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_leave_clears_press() {
        let mut pointer = PointerState::new();
        pointer.handle(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        pointer.handle(&PointerEvent::Leave);
        assert!(!pointer.pressed);
        assert!(!pointer.inside);
    }

    #[test]
    fn test_event_json_shape() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"type":"down","position":{"x":1.0,"y":2.0}}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Left,
            }
        );
        let leave: PointerEvent = serde_json::from_str(r#"{"type":"leave"}"#).unwrap();
        assert_eq!(leave.position(), None);
    }
}
