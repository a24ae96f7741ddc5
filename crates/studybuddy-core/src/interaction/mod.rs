//! Pointer interaction state machine.
//!
//! A press on a widget opens an [`InteractionSession`] (moving or resizing),
//! pointer moves update the widget's [`Frame`](crate::geometry::Frame), and the
//! release classifies the gesture as a click or a geometry change. The
//! [`InteractionCoordinator`] owns all sessions and the global drag flag.

mod coordinator;
mod session;

pub use coordinator::{GestureOutcome, InteractionCoordinator};
pub use session::{Grab, InteractionMode, InteractionSession};
