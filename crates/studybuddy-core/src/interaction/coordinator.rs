//! Session table and drag arbitration shared by every floating widget.

use std::collections::HashMap;

use super::session::{Grab, InteractionMode, InteractionSession};
use crate::geometry::{Frame, Viewport};
use crate::widget::WidgetId;
use kurbo::Point;
use serde::Serialize;

/// How a finished gesture should be interpreted by the widget's controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "widget", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// Pressed and released without travelling; the widget's click action runs.
    Click(WidgetId),
    /// The widget was dragged to a new position.
    Moved(WidgetId),
    /// The widget was resized.
    Resized(WidgetId),
    /// The gesture was force-terminated before any motion.
    Abandoned(WidgetId),
}

impl GestureOutcome {
    pub fn widget(&self) -> WidgetId {
        match *self {
            GestureOutcome::Click(id)
            | GestureOutcome::Moved(id)
            | GestureOutcome::Resized(id)
            | GestureOutcome::Abandoned(id) => id,
        }
    }
}

/// Owns every live [`InteractionSession`], keyed by widget id, plus the
/// single global drag designation that sibling widgets consult to suppress
/// hover affordances.
///
/// Sessions are looked up fresh on each event, so a widget deleted mid-drag
/// only needs [`InteractionCoordinator::cancel`] to drop its entry.
#[derive(Debug, Clone, Default)]
pub struct InteractionCoordinator {
    sessions: HashMap<WidgetId, InteractionSession>,
    drag_holder: Option<WidgetId>,
    move_threshold: f64,
}

impl InteractionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance the pointer must travel from the press before a gesture stops
    /// counting as a click. Zero means any move event counts.
    pub fn with_move_threshold(mut self, threshold: f64) -> Self {
        self.move_threshold = if threshold.is_finite() { threshold.max(0.0) } else { 0.0 };
        self
    }

    /// Claim the drag designation for `id`.
    ///
    /// Returns false when another widget already holds it.
    pub fn acquire(&mut self, id: WidgetId) -> bool {
        match self.drag_holder {
            Some(holder) => holder == id,
            None => {
                self.drag_holder = Some(id);
                true
            }
        }
    }

    /// Give the drag designation back. No-op unless `id` holds it.
    pub fn release(&mut self, id: WidgetId) {
        if self.drag_holder == Some(id) {
            self.drag_holder = None;
        }
    }

    /// Whether any widget is being dragged right now.
    pub fn is_dragging(&self) -> bool {
        self.drag_holder.is_some()
    }

    pub fn drag_holder(&self) -> Option<WidgetId> {
        self.drag_holder
    }

    pub fn session(&self, id: WidgetId) -> Option<&InteractionSession> {
        self.sessions.get(&id)
    }

    pub fn mode(&self, id: WidgetId) -> InteractionMode {
        self.sessions
            .get(&id)
            .map(|s| s.mode)
            .unwrap_or(InteractionMode::Idle)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Start a gesture on `id`.
    ///
    /// Returns false (and changes nothing) if the widget already has a live
    /// session.
    pub fn pointer_down(&mut self, id: WidgetId, grab: Grab, pointer: Point, frame: &Frame) -> bool {
        if self.sessions.contains_key(&id) {
            log::debug!("Ignoring press on {}: session already active", id);
            return false;
        }
        let mut session = InteractionSession::begin(id, grab, pointer, frame);
        session.holds_drag = self.acquire(id);
        log::debug!("Begin {:?} on {}", session.mode, id);
        self.sessions.insert(id, session);
        true
    }

    /// Feed a pointer move to the session for `id`.
    ///
    /// Moves for widgets without a session (including stale moves arriving
    /// after the release) are ignored. Returns whether the frame changed.
    pub fn pointer_move(&mut self, id: WidgetId, pointer: Point, frame: &mut Frame, bounds: Viewport) -> bool {
        let threshold = self.move_threshold;
        match self.sessions.get_mut(&id) {
            Some(session) => session.track(pointer, frame, bounds, threshold),
            None => false,
        }
    }

    /// End the gesture on `id` with an explicit release.
    pub fn pointer_up(&mut self, id: WidgetId) -> Option<GestureOutcome> {
        let session = self.finish(id)?;
        let outcome = match (session.moved(), session.mode) {
            (false, _) => GestureOutcome::Click(id),
            (true, InteractionMode::Resizing) => GestureOutcome::Resized(id),
            (true, _) => GestureOutcome::Moved(id),
        };
        log::debug!("End gesture on {}: {:?}", id, outcome);
        Some(outcome)
    }

    /// Force-terminate the gesture on `id` because the pointer left the
    /// tracked surface. Never produces a click.
    pub fn pointer_leave(&mut self, id: WidgetId) -> Option<GestureOutcome> {
        let session = self.finish(id)?;
        let outcome = match (session.moved(), session.mode) {
            (false, _) => GestureOutcome::Abandoned(id),
            (true, InteractionMode::Resizing) => GestureOutcome::Resized(id),
            (true, _) => GestureOutcome::Moved(id),
        };
        log::debug!("Pointer left during gesture on {}: {:?}", id, outcome);
        Some(outcome)
    }

    /// Drop any session for `id` without an outcome (widget destroyed).
    pub fn cancel(&mut self, id: WidgetId) {
        if self.finish(id).is_some() {
            log::debug!("Cancelled gesture on {}", id);
        }
    }

    /// Terminate every live session as if the pointer left.
    pub fn leave_all(&mut self) -> Vec<GestureOutcome> {
        let ids: Vec<WidgetId> = self.sessions.keys().copied().collect();
        ids.into_iter().filter_map(|id| self.pointer_leave(id)).collect()
    }

    fn finish(&mut self, id: WidgetId) -> Option<InteractionSession> {
        let session = self.sessions.remove(&id)?;
        if session.holds_drag {
            self.release(id);
        }
        Some(session)
    }
}
