//! Recorded sessions replayed by the shell.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use studybuddy_core::collab::{ExamPlanRequest, ExamSchedule, NoteRecord, TodoRecord};
use studybuddy_core::{DockItem, PointerEvent, Viewport};

/// One user action in a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TraceStep {
    Pointer { event: PointerEvent },
    Resize { width: f64, height: f64 },
    Dock { item: DockItem },
    CloseOverlay,
    SaveNote { content: String },
    OpenNote { note_id: String },
    /// Close the window showing a note; the note itself is kept.
    CloseNote { note_id: String },
    DeleteNote { note_id: String },
    AddTodo { title: String },
    ToggleTodo { todo_id: String },
    RemoveTodo { todo_id: String },
    AddSubtask { todo_id: String, title: String },
    ToggleSubtask { todo_id: String, subtask_id: String },
    RemoveSubtask { todo_id: String, subtask_id: String },
    CreateSchedule { request: ExamPlanRequest },
    ShowSchedule { schedule_id: String },
    DeleteSchedule { schedule_id: String },
    ToggleTimer,
    ResetTimer,
    SetTimerPreset { minutes: u32, seconds: u32 },
    Tick { secs: u32 },
    /// Take every collaborator offline (or back online).
    Offline { offline: bool },
    Sync,
}

/// A recorded session: initial window, seeded data, and the steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub viewport: Viewport,
    /// RNG seed for placement and tints. Unseeded traces use the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Date the session runs on. Defaults to the local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Expiry of the signed-in session. Absent means always signed in.
    #[serde(default)]
    pub session_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
    #[serde(default)]
    pub todos: Vec<TodoRecord>,
    #[serde(default)]
    pub schedules: Vec<ExamSchedule>,
    #[serde(default)]
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            seed: None,
            today: None,
            session_expires_at: None,
            notes: Vec::new(),
            todos: Vec::new(),
            schedules: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn step(mut self, step: TraceStep) -> Self {
        self.steps.push(step);
        self
    }
}
