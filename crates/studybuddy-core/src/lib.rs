//! Study Buddy Core Library
//!
//! Platform-agnostic engine for the Study Buddy dashboard: floating widget
//! geometry, placement, pointer gestures, and the collaborator boundary.

pub mod calendar;
pub mod collab;
pub mod config;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod placement;
pub mod shell;
pub mod timer;
pub mod widget;

pub use calendar::{ExamCalendar, date_key};
pub use collab::{CollabError, CollabResult, SessionGuard};
pub use config::{ConfigError, DashboardConfig};
pub use geometry::{Frame, Viewport, clamp_position, clamp_size};
pub use input::{MouseButton, PointerEvent, PointerState};
pub use interaction::{GestureOutcome, Grab, InteractionCoordinator, InteractionMode};
pub use placement::{Placement, PlacementSampler, spawn_note_position};
pub use shell::{Collaborators, Dashboard, DashboardView, DockItem, MountOutcome, Notice, NoticeLevel, Overlay, ShellEvent};
pub use timer::FocusTimer;
pub use widget::{FloatingWidget, LauncherKind, WidgetId, WidgetManager, WidgetState};
