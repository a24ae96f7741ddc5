//! Floating widgets: launcher icons and note windows.
//!
//! Each concrete controller is a variant of the closed [`FloatingWidget`]
//! enum, which exposes the capabilities the shell relies on: hit testing,
//! mapping a press to a [`Grab`], movement bounds, and a render view.
//! Widgets hold geometry only; gestures live in the
//! [`InteractionCoordinator`](crate::interaction::InteractionCoordinator).

mod handles;
mod icon;
mod manager;
mod note;
mod state;

pub use handles::{Handle, HandleKind, RESIZE_HANDLE_SIZE};
pub use icon::{HOVER_SCALE, ICON_DIAMETER, LauncherIcon, LauncherKind};
pub use manager::WidgetManager;
pub use note::{NOTE_TINTS, NoteWidget};
pub use state::WidgetState;

use crate::geometry::{Frame, Viewport};
use crate::input::GrabTarget;
use crate::interaction::Grab;
use chrono::{DateTime, Utc};
use kurbo::{Point, Rect};
use serde::Serialize;
use uuid::Uuid;

/// Stable identity of a live widget.
pub type WidgetId = Uuid;

/// A widget under interactive control.
#[derive(Debug, Clone)]
pub enum FloatingWidget {
    Icon(LauncherIcon),
    Note(NoteWidget),
}

impl FloatingWidget {
    pub fn id(&self) -> WidgetId {
        match self {
            FloatingWidget::Icon(icon) => icon.id,
            FloatingWidget::Note(note) => note.id,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            FloatingWidget::Icon(icon) => &icon.frame,
            FloatingWidget::Note(note) => &note.frame,
        }
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        match self {
            FloatingWidget::Icon(icon) => &mut icon.frame,
            FloatingWidget::Note(note) => &mut note.frame,
        }
    }

    /// The area this widget must stay inside.
    pub fn bounds(&self, viewport: Viewport) -> Viewport {
        match self {
            FloatingWidget::Icon(icon) => icon.bounds(viewport),
            FloatingWidget::Note(note) => note.bounds(viewport),
        }
    }

    pub fn hit_test(&self, point: Point) -> Option<GrabTarget> {
        match self {
            FloatingWidget::Icon(icon) => icon.hit_test(point),
            FloatingWidget::Note(note) => note.hit_test(point),
        }
    }

    pub fn grab_for(&self, target: GrabTarget) -> Grab {
        match self {
            FloatingWidget::Icon(icon) => icon.grab_for(target),
            FloatingWidget::Note(note) => note.grab_for(target),
        }
    }

    /// Whether the user may close this widget.
    pub fn is_closable(&self) -> bool {
        matches!(self, FloatingWidget::Note(_))
    }

    pub fn as_icon(&self) -> Option<&LauncherIcon> {
        match self {
            FloatingWidget::Icon(icon) => Some(icon),
            FloatingWidget::Note(_) => None,
        }
    }

    pub fn as_note(&self) -> Option<&NoteWidget> {
        match self {
            FloatingWidget::Note(note) => Some(note),
            FloatingWidget::Icon(_) => None,
        }
    }

    /// Describe the widget for the renderer.
    pub fn view(&self, state: WidgetState) -> WidgetView {
        let rect = self.frame().rect();
        match self {
            FloatingWidget::Icon(icon) => {
                let hover = state.shows_hover();
                WidgetView {
                    id: icon.id,
                    rect,
                    state,
                    scale: if hover { HOVER_SCALE } else { 1.0 },
                    body: WidgetBody::Icon {
                        kind: icon.kind,
                        label: icon.kind.label(),
                        tooltip: hover.then(|| icon.kind.description()),
                    },
                }
            }
            FloatingWidget::Note(note) => WidgetView {
                id: note.id,
                rect,
                state,
                scale: 1.0,
                body: WidgetBody::Note {
                    note_id: note.note.id.clone(),
                    content: note.note.content.clone(),
                    created_at: note.note.created_at,
                    tint: note.tint,
                    resize_grip: note.resize_grip(),
                },
            },
        }
    }
}

impl From<LauncherIcon> for FloatingWidget {
    fn from(icon: LauncherIcon) -> Self {
        FloatingWidget::Icon(icon)
    }
}

impl From<NoteWidget> for FloatingWidget {
    fn from(note: NoteWidget) -> Self {
        FloatingWidget::Note(note)
    }
}

/// Render descriptor for one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub id: WidgetId,
    pub rect: Rect,
    pub state: WidgetState,
    pub scale: f64,
    pub body: WidgetBody,
}

/// Variant-specific render data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetBody {
    Icon {
        kind: LauncherKind,
        label: &'static str,
        tooltip: Option<&'static str>,
    },
    Note {
        note_id: String,
        content: String,
        created_at: DateTime<Utc>,
        tint: &'static str,
        resize_grip: Handle,
    },
}
