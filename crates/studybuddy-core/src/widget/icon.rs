//! Circular launcher icons.

use crate::geometry::{Frame, Viewport};
use crate::input::GrabTarget;
use crate::interaction::Grab;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WidgetId;

/// Diameter of a launcher icon, in pixels.
pub const ICON_DIAMETER: f64 = 80.0;
/// Render scale of a hovered icon.
pub const HOVER_SCALE: f64 = 1.5;

/// The tools a launcher icon can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LauncherKind {
    Note,
    ExamScheduler,
    Timer,
}

impl LauncherKind {
    /// Every launcher, in spawn order.
    pub const ALL: [LauncherKind; 3] = [
        LauncherKind::Note,
        LauncherKind::ExamScheduler,
        LauncherKind::Timer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LauncherKind::Note => "Note",
            LauncherKind::ExamScheduler => "Exam Scheduler",
            LauncherKind::Timer => "Timer",
        }
    }

    /// Tooltip text.
    pub fn description(&self) -> &'static str {
        match self {
            LauncherKind::Note => "Take Notes",
            LauncherKind::ExamScheduler => "Exam Schedule",
            LauncherKind::Timer => "Focus Timer",
        }
    }
}

/// A draggable icon that opens a tool when clicked.
#[derive(Debug, Clone)]
pub struct LauncherIcon {
    pub id: WidgetId,
    pub kind: LauncherKind,
    pub frame: Frame,
    /// Height of the dock strip the icon may not enter.
    pub dock_height: f64,
}

impl LauncherIcon {
    pub fn new(kind: LauncherKind, position: Point, diameter: f64, dock_height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            frame: Frame::fixed(position, Size::new(diameter, diameter)),
            dock_height,
        }
    }

    /// Icons live above the dock.
    pub fn bounds(&self, viewport: Viewport) -> Viewport {
        viewport.without_bottom(self.dock_height)
    }

    /// Circular hit test.
    pub fn hit_test(&self, point: Point) -> Option<GrabTarget> {
        let radius = self.frame.size.width / 2.0;
        let center = self.frame.rect().center();
        (point.distance(center) <= radius).then_some(GrabTarget::Body)
    }

    /// Icons only move; a press anywhere on them is a move grab.
    pub fn grab_for(&self, _target: GrabTarget) -> Grab {
        Grab::Move
    }
}
