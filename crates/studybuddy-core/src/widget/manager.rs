//! Widget manager: the set of live widgets, their stacking order, and hover.

use std::collections::HashMap;

use super::{FloatingWidget, WidgetId, WidgetState, WidgetView};
use crate::geometry::Viewport;
use crate::input::GrabTarget;
use kurbo::Point;

/// Owns every floating widget on the dashboard.
///
/// Widgets are stacked back to front; a pressed widget is raised to the top.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    /// Widgets keyed by id.
    widgets: HashMap<WidgetId, FloatingWidget>,
    /// Stacking order (back to front).
    z_order: Vec<WidgetId>,
    /// Widget currently under the pointer.
    hovered: Option<WidgetId>,
}

impl WidgetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget on top of the stack.
    pub fn insert(&mut self, widget: impl Into<FloatingWidget>) -> WidgetId {
        let widget = widget.into();
        let id = widget.id();
        if self.widgets.insert(id, widget).is_none() {
            self.z_order.push(id);
        }
        id
    }

    /// Remove a widget. Clears hover if it pointed at the widget.
    pub fn remove(&mut self, id: WidgetId) -> Option<FloatingWidget> {
        let widget = self.widgets.remove(&id)?;
        self.z_order.retain(|other| *other != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Some(widget)
    }

    pub fn get(&self, id: WidgetId) -> Option<&FloatingWidget> {
        self.widgets.get(&id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut FloatingWidget> {
        self.widgets.get_mut(&id)
    }

    /// Whether the widget is still open.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Move a widget to the top of the stack.
    pub fn raise(&mut self, id: WidgetId) {
        if let Some(index) = self.z_order.iter().position(|other| *other == id) {
            let id = self.z_order.remove(index);
            self.z_order.push(id);
        }
    }

    /// Stacking order, back to front.
    pub fn z_order(&self) -> &[WidgetId] {
        &self.z_order
    }

    /// Widgets back to front.
    pub fn iter(&self) -> impl Iterator<Item = &FloatingWidget> {
        self.z_order.iter().filter_map(|id| self.widgets.get(id))
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn set_hovered(&mut self, id: Option<WidgetId>) {
        self.hovered = id.filter(|id| self.widgets.contains_key(id));
    }

    /// Topmost widget under `point` and the part that was hit.
    pub fn widget_at(&self, point: Point) -> Option<(WidgetId, GrabTarget)> {
        self.z_order.iter().rev().find_map(|id| {
            let widget = self.widgets.get(id)?;
            widget.hit_test(point).map(|target| (*id, target))
        })
    }

    /// The open widget showing the given note, if any.
    pub fn note_widget(&self, note_id: &str) -> Option<WidgetId> {
        self.iter()
            .filter_map(FloatingWidget::as_note)
            .find(|note| note.note.id == note_id)
            .map(|note| note.id)
    }

    /// Pull every widget back inside the viewport.
    pub fn settle_all(&mut self, viewport: Viewport) {
        for widget in self.widgets.values_mut() {
            let bounds = widget.bounds(viewport);
            widget.frame_mut().settle(bounds);
        }
    }

    /// Render views back to front. `grabbed` reports live gestures.
    pub fn views(&self, any_dragging: bool, grabbed: impl Fn(WidgetId) -> bool) -> Vec<WidgetView> {
        self.iter()
            .map(|widget| {
                let id = widget.id();
                let state = WidgetState::resolve(self.hovered == Some(id), grabbed(id), any_dragging);
                widget.view(state)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{ICON_DIAMETER, LauncherIcon, LauncherKind, WidgetBody};

    fn icon_at(x: f64, y: f64) -> LauncherIcon {
        LauncherIcon::new(LauncherKind::Note, Point::new(x, y), ICON_DIAMETER, 72.0)
    }

    #[test]
    fn test_topmost_wins() {
        let mut manager = WidgetManager::new();
        let below = manager.insert(icon_at(0.0, 0.0));
        let above = manager.insert(icon_at(20.0, 20.0));

        assert_eq!(manager.widget_at(Point::new(50.0, 50.0)).map(|h| h.0), Some(above));
        manager.raise(below);
        assert_eq!(manager.widget_at(Point::new(50.0, 50.0)).map(|h| h.0), Some(below));
        assert_eq!(manager.z_order(), &[above, below]);
    }

    #[test]
    fn test_remove_clears_hover() {
        let mut manager = WidgetManager::new();
        let id = manager.insert(icon_at(0.0, 0.0));
        manager.set_hovered(Some(id));
        assert_eq!(manager.hovered(), Some(id));
        assert!(manager.remove(id).is_some());
        assert_eq!(manager.hovered(), None);
        assert!(manager.is_empty());
        assert!(manager.remove(id).is_none());
    }

    #[test]
    fn test_settle_all_after_shrink() {
        let mut manager = WidgetManager::new();
        let id = manager.insert(icon_at(1100.0, 700.0));
        manager.settle_all(Viewport::new(800.0, 600.0));
        let frame = manager.get(id).unwrap().frame();
        assert_eq!(frame.position, Point::new(720.0, 448.0));
    }

    #[test]
    fn test_hover_view_suppressed_during_drag() {
        let mut manager = WidgetManager::new();
        let id = manager.insert(icon_at(0.0, 0.0));
        manager.set_hovered(Some(id));

        let views = manager.views(false, |_| false);
        assert_eq!(views[0].scale, 1.5);
        assert!(matches!(views[0].body, WidgetBody::Icon { tooltip: Some("Take Notes"), .. }));

        let views = manager.views(true, |_| false);
        assert_eq!(views[0].scale, 1.0);
        assert!(matches!(views[0].body, WidgetBody::Icon { tooltip: None, .. }));
    }
}
