//! Widget state definitions.

use serde::{Deserialize, Serialize};

/// The UI state of a floating widget, as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Pointer is over the widget and no drag is running anywhere.
    Hovered,
    /// The widget has a live gesture.
    Grabbed,
}

impl WidgetState {
    pub fn resolve(hovered: bool, grabbed: bool, any_dragging: bool) -> Self {
        if grabbed {
            Self::Grabbed
        } else if hovered && !any_dragging {
            Self::Hovered
        } else {
            Self::Normal
        }
    }

    /// Whether hover affordances (enlargement, tooltip) should show.
    pub fn shows_hover(&self) -> bool {
        matches!(self, Self::Hovered)
    }
}
