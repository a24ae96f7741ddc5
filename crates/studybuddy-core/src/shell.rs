//! The dashboard shell.
//!
//! [`Dashboard`] composes the widget manager, the interaction coordinator, and
//! the collaborator boards. The host feeds it pointer events and awaits its
//! collaborator calls; it answers with [`ShellEvent`]s and a serializable
//! [`DashboardView`].

use chrono::{DateTime, NaiveDate, Utc};
use kurbo::{Point, Size};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calendar::ExamCalendar;
use crate::collab::{
    CollabError, CollabResult, ExamPlanRequest, ExamSchedule, NoteRecord, NoteService, NotesBoard,
    ScheduleBoard, ScheduleService, SessionGuard, TodoBoard, TodoRecord, TodoService,
};
use crate::config::DashboardConfig;
use crate::geometry::Viewport;
use crate::input::{PointerEvent, PointerState};
use crate::interaction::{GestureOutcome, InteractionCoordinator};
use crate::placement::{PlacementSampler, spawn_note_position};
use crate::timer::FocusTimer;
use crate::widget::{FloatingWidget, LauncherIcon, LauncherKind, NoteWidget, WidgetId, WidgetManager, WidgetView};

/// Result of mounting the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountOutcome {
    Ready,
    /// The session guard refused; nothing was placed.
    RedirectToLogin,
}

/// Full-screen views. At most one is open; while open, widgets get no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    NoteComposer,
    FocusTimer,
    ExamPlanner,
    Chat,
    Settings,
}

impl Overlay {
    /// The overlay a launcher icon opens.
    pub fn for_launcher(kind: LauncherKind) -> Self {
        match kind {
            LauncherKind::Note => Overlay::NoteComposer,
            LauncherKind::ExamScheduler => Overlay::ExamPlanner,
            LauncherKind::Timer => Overlay::FocusTimer,
        }
    }
}

/// Buttons of the bottom dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockItem {
    Help,
    ExamScheduler,
    Profile,
}

impl DockItem {
    pub const ALL: [DockItem; 3] = [DockItem::Help, DockItem::ExamScheduler, DockItem::Profile];

    pub fn overlay(&self) -> Overlay {
        match self {
            DockItem::Help => Overlay::Chat,
            DockItem::ExamScheduler => Overlay::ExamPlanner,
            DockItem::Profile => Overlay::Settings,
        }
    }
}

/// Something the host may want to react to after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShellEvent {
    Gesture { gesture: GestureOutcome },
    /// A launcher icon was clicked and its overlay opened.
    Launched { kind: LauncherKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message for the user (toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// The remote collaborators, borrowed for one sync.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub notes: &'a dyn NoteService,
    pub todos: &'a dyn TodoService,
    pub schedules: &'a dyn ScheduleService,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub viewport: Viewport,
    pub overlay: Option<Overlay>,
    pub dragging: bool,
    /// Widgets back to front.
    pub widgets: Vec<WidgetView>,
    pub dock: [DockItem; 3],
    pub timer: String,
    pub timer_running: bool,
    pub todos_done: usize,
    pub todos_total: usize,
}

/// The dashboard page.
pub struct Dashboard {
    config: DashboardConfig,
    viewport: Viewport,
    widgets: WidgetManager,
    interactions: InteractionCoordinator,
    pointer: PointerState,
    /// Widget that captured the pointer on the last press.
    owner: Option<WidgetId>,
    overlay: Option<Overlay>,
    notes: NotesBoard,
    todos: TodoBoard,
    schedules: ScheduleBoard,
    /// Schedule shown in the calendar.
    shown_schedule: Option<String>,
    calendar: ExamCalendar,
    timer: FocusTimer,
    notices: Vec<Notice>,
    mounted: bool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, viewport: Viewport, today: NaiveDate) -> Self {
        let interactions = InteractionCoordinator::new().with_move_threshold(config.move_threshold);
        let timer = FocusTimer::new(config.focus_secs());
        Self {
            config,
            viewport,
            widgets: WidgetManager::new(),
            interactions,
            pointer: PointerState::new(),
            owner: None,
            overlay: None,
            notes: NotesBoard::new(),
            todos: TodoBoard::new(),
            schedules: ScheduleBoard::new(),
            shown_schedule: None,
            calendar: ExamCalendar::new(today),
            timer,
            notices: Vec::new(),
            mounted: false,
        }
    }

    /// Check the session and spawn the launcher icons.
    pub fn mount<R: Rng + ?Sized>(&mut self, guard: &dyn SessionGuard, rng: &mut R) -> MountOutcome {
        if !guard.is_valid() {
            log::info!("Session invalid, redirecting to login");
            return MountOutcome::RedirectToLogin;
        }
        if self.mounted {
            return MountOutcome::Ready;
        }

        let diameter = self.config.icon_diameter;
        let footprints = vec![Size::new(diameter, diameter); LauncherKind::ALL.len()];
        let area = self.config.icon_spawn_area(self.viewport);
        let exclusions = [self.config.todo_panel_rect(self.viewport)];
        let sampler = PlacementSampler::new(self.config.placement_attempts)
            .avoid_siblings(self.config.avoid_sibling_overlap);

        let placements = sampler.place(&footprints, area, &exclusions, rng);
        for (kind, placement) in LauncherKind::ALL.into_iter().zip(placements) {
            let mut icon = LauncherIcon::new(kind, placement.position, diameter, self.config.dock_height);
            let bounds = icon.bounds(self.viewport);
            icon.frame.settle(bounds);
            self.widgets.insert(icon);
        }

        self.mounted = true;
        log::info!(
            "Dashboard mounted at {}x{} with {} launchers",
            self.viewport.width,
            self.viewport.height,
            self.widgets.len()
        );
        MountOutcome::Ready
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Route one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<ShellEvent> {
        if !self.pointer.handle(&event) {
            return Vec::new();
        }
        if self.overlay.is_some() {
            return Vec::new();
        }
        match event {
            PointerEvent::Down { position, .. } => self.press(position),
            PointerEvent::Move { position } => {
                self.drag_to(position);
                Vec::new()
            }
            PointerEvent::Up { .. } => self.release(),
            PointerEvent::Leave => {
                self.widgets.set_hovered(None);
                self.terminate_all()
            }
        }
    }

    fn press(&mut self, position: Point) -> Vec<ShellEvent> {
        // A press while another gesture is live means its release was lost.
        let mut events = self.terminate_all();

        let Some((id, target)) = self.widgets.widget_at(position) else {
            return events;
        };
        self.widgets.raise(id);
        let Some(widget) = self.widgets.get(id) else {
            return events;
        };
        let grab = widget.grab_for(target);
        let frame = *widget.frame();
        if self.interactions.pointer_down(id, grab, position, &frame) {
            self.owner = Some(id);
        }
        events
    }

    fn drag_to(&mut self, position: Point) {
        let Some(id) = self.owner else {
            let hit = self.widgets.widget_at(position).map(|(id, _)| id);
            self.widgets.set_hovered(hit);
            return;
        };
        match self.widgets.get_mut(id) {
            Some(widget) => {
                let bounds = widget.bounds(self.viewport);
                self.interactions.pointer_move(id, position, widget.frame_mut(), bounds);
            }
            None => {
                self.interactions.cancel(id);
                self.owner = None;
            }
        }
    }

    fn release(&mut self) -> Vec<ShellEvent> {
        let Some(id) = self.owner.take() else {
            return Vec::new();
        };
        let Some(outcome) = self.interactions.pointer_up(id) else {
            return Vec::new();
        };
        self.settle(id);

        let mut events = vec![ShellEvent::Gesture { gesture: outcome }];
        if let GestureOutcome::Click(id) = outcome {
            let kind = self.widgets.get(id).and_then(FloatingWidget::as_icon).map(|icon| icon.kind);
            if let Some(kind) = kind {
                self.open_overlay(Overlay::for_launcher(kind));
                events.push(ShellEvent::Launched { kind });
                return events;
            }
        }

        let hit = self.widgets.widget_at(self.pointer.position).map(|(id, _)| id);
        self.widgets.set_hovered(hit);
        events
    }

    /// Force-terminate every live gesture.
    fn terminate_all(&mut self) -> Vec<ShellEvent> {
        self.owner = None;
        let outcomes = self.interactions.leave_all();
        outcomes
            .into_iter()
            .map(|outcome| {
                self.settle(outcome.widget());
                ShellEvent::Gesture { gesture: outcome }
            })
            .collect()
    }

    fn settle(&mut self, id: WidgetId) {
        if let Some(widget) = self.widgets.get_mut(id) {
            let bounds = widget.bounds(self.viewport);
            widget.frame_mut().settle(bounds);
        }
    }

    /// Show a full-screen overlay, replacing any open one.
    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.terminate_all();
        self.widgets.set_hovered(None);
        log::debug!("Open overlay {:?}", overlay);
        self.overlay = Some(overlay);
    }

    pub fn close_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            log::debug!("Close overlay {:?}", overlay);
        }
    }

    pub fn activate_dock(&mut self, item: DockItem) {
        self.open_overlay(item.overlay());
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Open a window for a saved note. Returns the existing window if the
    /// note is already open. Closes the note composer.
    pub fn open_note<R: Rng + ?Sized>(&mut self, note_id: &str, rng: &mut R) -> Option<WidgetId> {
        if self.overlay == Some(Overlay::NoteComposer) {
            self.close_overlay();
        }
        if let Some(existing) = self.widgets.note_widget(note_id) {
            self.widgets.raise(existing);
            return Some(existing);
        }
        let Some(record) = self.notes.get(note_id).cloned() else {
            self.report::<()>("Open note", Err(CollabError::NotFound(note_id.to_string())));
            return None;
        };

        let size = self.config.note_size;
        let position = spawn_note_position(
            size,
            self.viewport,
            self.config.note_spawn_padding,
            self.config.note_bottom_reserve,
            rng,
        );
        let widget = NoteWidget::new(record, position, size, self.config.note_min_size, rng);
        let id = self.widgets.insert(widget);
        log::debug!("Opened note {} as {}", note_id, id);
        Some(id)
    }

    /// Close a note window. Launcher icons cannot be closed.
    pub fn close_note(&mut self, id: WidgetId) -> bool {
        let closable = self.widgets.get(id).is_some_and(FloatingWidget::is_closable);
        if !closable {
            return false;
        }
        self.destroy(id);
        true
    }

    fn destroy(&mut self, id: WidgetId) {
        self.interactions.cancel(id);
        if self.owner == Some(id) {
            self.owner = None;
        }
        self.widgets.remove(id);
    }

    /// Save the composer's text as a new note.
    pub async fn save_note(
        &mut self,
        service: &dyn NoteService,
        content: &str,
        now: DateTime<Utc>,
    ) -> Option<NoteRecord> {
        let result = self.notes.add(service, content, now).await;
        let saved = self.report("Save note", result).flatten()?;
        self.notify(NoticeLevel::Info, "Note saved");
        Some(saved)
    }

    /// Close every window showing the note, then delete it.
    pub async fn delete_note(&mut self, service: &dyn NoteService, note_id: &str) -> bool {
        while let Some(id) = self.widgets.note_widget(note_id) {
            self.destroy(id);
        }
        let result = self.notes.delete(service, note_id).await;
        self.report("Delete note", result).is_some()
    }

    pub async fn add_todo(&mut self, service: &dyn TodoService, title: &str) -> Option<TodoRecord> {
        let result = self.todos.add(service, title).await;
        self.report("Add task", result).flatten()
    }

    pub async fn toggle_todo(&mut self, service: &dyn TodoService, id: &str) -> bool {
        let result = self.todos.toggle(service, id).await;
        self.report("Update task", result).is_some()
    }

    pub async fn remove_todo(&mut self, service: &dyn TodoService, id: &str) -> bool {
        let result = self.todos.remove(service, id).await;
        self.report("Delete task", result).is_some()
    }

    pub async fn add_subtask(&mut self, service: &dyn TodoService, todo_id: &str, title: &str) -> bool {
        let result = self.todos.add_subtask(service, todo_id, title).await;
        self.report("Add subtask", result).is_some()
    }

    pub async fn toggle_subtask(&mut self, service: &dyn TodoService, todo_id: &str, subtask_id: &str) -> bool {
        let result = self.todos.toggle_subtask(service, todo_id, subtask_id).await;
        self.report("Update subtask", result).is_some()
    }

    pub async fn remove_subtask(&mut self, service: &dyn TodoService, todo_id: &str, subtask_id: &str) -> bool {
        let result = self.todos.remove_subtask(service, todo_id, subtask_id).await;
        self.report("Delete subtask", result).is_some()
    }

    /// Validate and submit a study plan.
    pub async fn create_schedule(
        &mut self,
        service: &dyn ScheduleService,
        request: ExamPlanRequest,
        today: NaiveDate,
    ) -> Option<ExamSchedule> {
        let result = self.schedules.create(service, request, today).await;
        let schedule = self.report("Create schedule", result)?;
        self.notify(NoticeLevel::Info, "Schedule created");
        Some(schedule)
    }

    pub async fn delete_schedule(&mut self, service: &dyn ScheduleService, id: &str) -> bool {
        let result = self.schedules.delete(service, id).await;
        let deleted = self.report("Delete schedule", result).is_some();
        if deleted && self.shown_schedule.as_deref() == Some(id) {
            self.shown_schedule = None;
        }
        deleted
    }

    /// Show a schedule in the calendar, colouring its subjects.
    pub fn show_schedule<R: Rng + ?Sized>(&mut self, id: &str, rng: &mut R) -> bool {
        let Some(schedule) = self.schedules.get(id) else {
            return false;
        };
        self.calendar.assign_colors(schedule, rng);
        self.shown_schedule = Some(id.to_string());
        true
    }

    pub fn shown_schedule(&self) -> Option<&ExamSchedule> {
        self.shown_schedule.as_deref().and_then(|id| self.schedules.get(id))
    }

    /// Reload notes, to-dos, and schedules. Failures become notices; the
    /// affected board keeps its previous contents.
    pub async fn sync(&mut self, collaborators: Collaborators<'_>) {
        let notes = self.notes.refresh(collaborators.notes).await;
        self.report("Load notes", notes);
        let todos = self.todos.refresh(collaborators.todos).await;
        self.report("Load tasks", todos);
        let schedules = self.schedules.refresh(collaborators.schedules).await;
        self.report("Load schedules", schedules);
    }

    /// Turn a collaborator failure into a notice.
    pub fn report<T>(&mut self, context: &str, result: CollabResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("{} failed: {}", context, err);
                self.notify(NoticeLevel::Error, format!("{} failed: {}", context, err));
                None
            }
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Advance the focus timer.
    pub fn tick_timer(&mut self, secs: u32) {
        if self.timer.tick(secs) {
            self.notify(NoticeLevel::Info, "Focus session complete");
        }
    }

    /// Apply a new window size and pull every widget back inside it.
    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.widgets.settle_all(viewport);
    }

    pub fn view(&self) -> DashboardView {
        let dragging = self.interactions.is_dragging();
        let interactions = &self.interactions;
        DashboardView {
            viewport: self.viewport,
            overlay: self.overlay,
            dragging,
            widgets: self.widgets.views(dragging, |id| interactions.session(id).is_some()),
            dock: DockItem::ALL,
            timer: self.timer.format(),
            timer_running: self.timer.is_running(),
            todos_done: self.todos.completed(),
            todos_total: self.todos.todos().len(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn widgets(&self) -> &WidgetManager {
        &self.widgets
    }

    pub fn interactions(&self) -> &InteractionCoordinator {
        &self.interactions
    }

    /// Id of the launcher icon of `kind`.
    pub fn launcher(&self, kind: LauncherKind) -> Option<WidgetId> {
        self.widgets
            .iter()
            .filter_map(FloatingWidget::as_icon)
            .find(|icon| icon.kind == kind)
            .map(|icon| icon.id)
    }

    pub fn notes(&self) -> &NotesBoard {
        &self.notes
    }

    pub fn todos(&self) -> &TodoBoard {
        &self.todos
    }

    pub fn schedules(&self) -> &ScheduleBoard {
        &self.schedules
    }

    pub fn calendar(&self) -> &ExamCalendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut ExamCalendar {
        &mut self.calendar
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FocusTimer {
        &mut self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{AlwaysValid, MemoryNotes, MemorySchedules, MemoryTodos, TokenSession, block_on};
    use crate::input::MouseButton;
    use crate::interaction::InteractionMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn dashboard() -> (Dashboard, StdRng) {
        let mut rng = StdRng::seed_from_u64(11);
        let mut dash = Dashboard::new(DashboardConfig::default(), Viewport::new(1280.0, 800.0), today());
        assert_eq!(dash.mount(&AlwaysValid, &mut rng), MountOutcome::Ready);
        (dash, rng)
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn center_of(dash: &Dashboard, id: WidgetId) -> Point {
        dash.widgets().get(id).unwrap().frame().rect().center()
    }

    #[test]
    fn test_invalid_session_redirects() {
        let mut dash = Dashboard::new(DashboardConfig::default(), Viewport::new(1280.0, 800.0), today());
        let outcome = dash.mount(&TokenSession::signed_out(), &mut StdRng::seed_from_u64(1));
        assert_eq!(outcome, MountOutcome::RedirectToLogin);
        assert!(dash.widgets().is_empty());
        assert!(!dash.is_mounted());
    }

    #[test]
    fn test_mount_places_launchers_once() {
        let (mut dash, mut rng) = dashboard();
        assert_eq!(dash.widgets().len(), 3);
        dash.mount(&AlwaysValid, &mut rng);
        assert_eq!(dash.widgets().len(), 3);
        for kind in LauncherKind::ALL {
            assert!(dash.launcher(kind).is_some());
        }
    }

    #[test]
    fn test_click_launches_and_gates_input() {
        let (mut dash, _) = dashboard();
        let timer = dash.launcher(LauncherKind::Timer).unwrap();
        let c = center_of(&dash, timer);

        dash.handle_pointer(down(c.x, c.y));
        let events = dash.handle_pointer(up(c.x, c.y));
        assert_eq!(
            events,
            vec![
                ShellEvent::Gesture {
                    gesture: GestureOutcome::Click(timer)
                },
                ShellEvent::Launched {
                    kind: LauncherKind::Timer
                },
            ]
        );
        assert_eq!(dash.overlay(), Some(Overlay::FocusTimer));

        assert!(dash.handle_pointer(down(c.x, c.y)).is_empty());
        assert_eq!(dash.interactions().active_sessions(), 0);

        dash.close_overlay();
        dash.handle_pointer(down(c.x, c.y));
        assert_eq!(dash.interactions().mode(timer), InteractionMode::Moving);
    }

    #[test]
    fn test_drag_does_not_launch() {
        let (mut dash, _) = dashboard();
        let c = center_of(&dash, dash.launcher(LauncherKind::Note).unwrap());
        let note = dash.widgets().widget_at(c).unwrap().0;

        dash.handle_pointer(down(c.x, c.y));
        dash.handle_pointer(PointerEvent::Move {
            position: Point::new(c.x + 30.0, c.y + 10.0),
        });
        assert!(dash.view().dragging);
        let events = dash.handle_pointer(up(c.x + 30.0, c.y + 10.0));
        assert_eq!(
            events,
            vec![ShellEvent::Gesture {
                gesture: GestureOutcome::Moved(note)
            }]
        );
        assert_eq!(dash.overlay(), None);
        assert!(!dash.view().dragging);
        assert_eq!(dash.widgets().z_order().last(), Some(&note));
    }

    #[test]
    fn test_press_on_empty_space() {
        let (mut dash, _) = dashboard();
        // The to-do panel area never holds a launcher.
        assert!(dash.handle_pointer(down(1100.0, 100.0)).is_empty());
        assert!(dash.handle_pointer(up(1100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_dock_opens_overlays() {
        let (mut dash, _) = dashboard();
        dash.activate_dock(DockItem::Help);
        assert_eq!(dash.overlay(), Some(Overlay::Chat));
        dash.activate_dock(DockItem::Profile);
        assert_eq!(dash.overlay(), Some(Overlay::Settings));
    }

    #[test]
    fn test_open_note_dedupes_and_closes_composer() {
        let (mut dash, mut rng) = dashboard();
        let service = MemoryNotes::new();
        dash.open_overlay(Overlay::NoteComposer);
        let saved = block_on(dash.save_note(&service, "Quadratics", Utc::now())).unwrap();

        let first = dash.open_note(&saved.id, &mut rng).unwrap();
        assert_eq!(dash.overlay(), None);
        assert_eq!(dash.open_note(&saved.id, &mut rng), Some(first));
        assert_eq!(dash.widgets().len(), 4);

        let frame = *dash.widgets().get(first).unwrap().frame();
        assert_eq!(frame.size, Size::new(384.0, 200.0));
        assert!(frame.is_settled(dash.viewport()));

        assert!(dash.open_note("missing", &mut rng).is_none());
        let notices = dash.take_notices();
        assert_eq!(notices.last().map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn test_close_note_only_for_notes() {
        let (mut dash, mut rng) = dashboard();
        let service = MemoryNotes::new();
        let saved = block_on(dash.save_note(&service, "x", Utc::now())).unwrap();
        let id = dash.open_note(&saved.id, &mut rng).unwrap();

        assert!(!dash.close_note(dash.launcher(LauncherKind::Note).unwrap()));
        assert!(dash.close_note(id));
        assert!(!dash.widgets().contains(id));
    }

    #[test]
    fn test_failures_become_notices() {
        let (mut dash, _) = dashboard();
        let notes = MemoryNotes::new();
        let todos = MemoryTodos::new();
        let schedules = MemorySchedules::new();
        todos.set_offline(true);

        block_on(dash.sync(Collaborators {
            notes: &notes,
            todos: &todos,
            schedules: &schedules,
        }));
        let notices = dash.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.starts_with("Load tasks failed"));
        assert!(dash.take_notices().is_empty());
    }

    #[test]
    fn test_timer_notice() {
        let (mut dash, _) = dashboard();
        dash.timer_mut().set_preset(0, 2);
        dash.timer_mut().toggle();
        dash.tick_timer(2);
        assert_eq!(dash.view().timer, "00:00");
        assert_eq!(dash.take_notices()[0].level, NoticeLevel::Info);
    }

    #[test]
    fn test_schedule_shown_in_calendar() {
        let (mut dash, mut rng) = dashboard();
        let service = MemorySchedules::new();
        let exam = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let request = ExamPlanRequest::new("Finals")
            .with_subject("Maths", exam, 4)
            .with_subject("Biology", exam, 6);
        let plan = block_on(dash.create_schedule(&service, request, today())).unwrap();

        assert!(dash.show_schedule(&plan.id, &mut rng));
        assert_eq!(dash.calendar().legend().len(), 2);
        assert_eq!(dash.shown_schedule().map(|s| s.name.as_str()), Some("Finals"));

        assert!(block_on(dash.delete_schedule(&service, &plan.id)));
        assert!(dash.shown_schedule().is_none());
    }

    #[test]
    fn test_view_serializes() {
        let (dash, _) = dashboard();
        let json = serde_json::to_value(dash.view()).unwrap();
        assert_eq!(json["widgets"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["widgets"][0]["body"]["type"], "icon");
        assert_eq!(json["timer"], "25:00");
    }
}
