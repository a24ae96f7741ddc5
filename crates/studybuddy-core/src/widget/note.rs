//! Draggable, resizable sticky-note windows.

use crate::collab::NoteRecord;
use crate::geometry::{Frame, Viewport};
use crate::input::GrabTarget;
use crate::interaction::Grab;
use kurbo::{Point, Size};
use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

use super::WidgetId;
use super::handles::Handle;

/// Background tints a note may be given at spawn.
pub const NOTE_TINTS: [&str; 5] = [
    "rgba(47, 51, 73, 0.85)",
    "rgba(44, 52, 58, 0.85)",
    "rgba(51, 41, 51, 0.85)",
    "rgba(43, 52, 48, 0.85)",
    "rgba(54, 45, 45, 0.85)",
];

/// An on-screen window showing one saved note.
#[derive(Debug, Clone)]
pub struct NoteWidget {
    pub id: WidgetId,
    pub note: NoteRecord,
    pub frame: Frame,
    pub tint: &'static str,
}

impl NoteWidget {
    pub fn new<R: Rng + ?Sized>(note: NoteRecord, position: Point, size: Size, min_size: Size, rng: &mut R) -> Self {
        let tint = NOTE_TINTS[..].choose(rng).copied().unwrap_or(NOTE_TINTS[0]);
        let mut frame = Frame::new(position, size, min_size);
        frame.size = crate::geometry::clamp_size(frame.size, frame.min_size);
        Self {
            id: Uuid::new_v4(),
            note,
            frame,
            tint,
        }
    }

    pub fn bounds(&self, viewport: Viewport) -> Viewport {
        viewport
    }

    pub fn resize_grip(&self) -> Handle {
        Handle::resize_grip(&self.frame)
    }

    pub fn hit_test(&self, point: Point) -> Option<GrabTarget> {
        if self.resize_grip().hit_test(point) {
            return Some(GrabTarget::ResizeHandle);
        }
        let rect = self.frame.rect();
        let inside = point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1;
        inside.then_some(GrabTarget::Body)
    }

    pub fn grab_for(&self, target: GrabTarget) -> Grab {
        match target {
            GrabTarget::Body => Grab::Move,
            GrabTarget::ResizeHandle => Grab::Resize,
        }
    }
}
