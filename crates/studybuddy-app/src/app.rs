//! Replay driver: runs a [`Trace`] against a dashboard backed by in-memory
//! collaborators.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use studybuddy_core::collab::{
    AlwaysValid, MemoryNotes, MemorySchedules, MemoryTodos, SessionGuard, TokenSession,
};
use studybuddy_core::{
    Collaborators, ConfigError, Dashboard, DashboardConfig, DashboardView, MountOutcome, Notice, ShellEvent,
    Viewport,
};
use thiserror::Error;

use crate::trace::{Trace, TraceStep};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid trace: {0}")]
    Trace(String),
    #[error("Output error: {0}")]
    Output(String),
}

/// Command-line configuration.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "studybuddy",
    about = "Replay a recorded pointer trace through the Study Buddy dashboard",
    version
)]
pub struct AppConfig {
    /// Trace file to replay.
    pub trace_path: PathBuf,
    /// Dashboard config file; defaults apply when absent.
    pub config_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load_dashboard_config(&self) -> Result<DashboardConfig, AppError> {
        match &self.config_path {
            Some(path) => Ok(DashboardConfig::load(path)?),
            None => Ok(DashboardConfig::default()),
        }
    }
}

/// What a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mount: MountOutcome,
    pub events: Vec<ShellEvent>,
    pub notices: Vec<Notice>,
    pub layout: DashboardView,
}

impl Report {
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Output(e.to_string()))
    }
}

pub fn load_trace(path: &Path) -> Result<Trace, AppError> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json).map_err(|e| AppError::Trace(e.to_string()))
}

/// Headless dashboard host.
pub struct App {
    dashboard: Dashboard,
    notes: MemoryNotes,
    todos: MemoryTodos,
    schedules: MemorySchedules,
    session: Box<dyn SessionGuard>,
    rng: StdRng,
    today: chrono::NaiveDate,
}

impl App {
    pub fn new(config: DashboardConfig, trace: &Trace) -> Self {
        let today = trace.today.unwrap_or_else(|| Local::now().date_naive());
        let rng = match trace.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let session: Box<dyn SessionGuard> = match trace.session_expires_at {
            Some(expiry) => Box::new(TokenSession::new(expiry)),
            None => Box::new(AlwaysValid),
        };
        Self {
            dashboard: Dashboard::new(config, trace.viewport, today),
            notes: MemoryNotes::with_notes(trace.notes.clone()),
            todos: MemoryTodos::with_todos(trace.todos.clone()),
            schedules: MemorySchedules::with_schedules(trace.schedules.clone()),
            session,
            rng,
            today,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Mount, sync, and apply every step. A refused session stops the replay
    /// after mounting.
    pub async fn replay(&mut self, steps: &[TraceStep]) -> Report {
        let mount = self.dashboard.mount(self.session.as_ref(), &mut self.rng);
        let mut events = Vec::new();
        if mount == MountOutcome::Ready {
            self.sync().await;
            for step in steps {
                events.extend(self.apply(step).await);
            }
        }
        Report {
            mount,
            events,
            notices: self.dashboard.take_notices(),
            layout: self.dashboard.view(),
        }
    }

    async fn sync(&mut self) {
        let collaborators = Collaborators {
            notes: &self.notes,
            todos: &self.todos,
            schedules: &self.schedules,
        };
        self.dashboard.sync(collaborators).await;
    }

    async fn apply(&mut self, step: &TraceStep) -> Vec<ShellEvent> {
        log::debug!("Step {:?}", step);
        match step {
            TraceStep::Pointer { event } => return self.dashboard.handle_pointer(*event),
            TraceStep::Resize { width, height } => {
                self.dashboard.resize_viewport(Viewport::new(*width, *height));
            }
            TraceStep::Dock { item } => self.dashboard.activate_dock(*item),
            TraceStep::CloseOverlay => self.dashboard.close_overlay(),
            TraceStep::SaveNote { content } => {
                self.dashboard.save_note(&self.notes, content, Utc::now()).await;
            }
            TraceStep::OpenNote { note_id } => {
                self.dashboard.open_note(note_id, &mut self.rng);
            }
            TraceStep::CloseNote { note_id } => {
                if let Some(id) = self.dashboard.widgets().note_widget(note_id) {
                    self.dashboard.close_note(id);
                }
            }
            TraceStep::DeleteNote { note_id } => {
                self.dashboard.delete_note(&self.notes, note_id).await;
            }
            TraceStep::AddTodo { title } => {
                self.dashboard.add_todo(&self.todos, title).await;
            }
            TraceStep::ToggleTodo { todo_id } => {
                self.dashboard.toggle_todo(&self.todos, todo_id).await;
            }
            TraceStep::RemoveTodo { todo_id } => {
                self.dashboard.remove_todo(&self.todos, todo_id).await;
            }
            TraceStep::AddSubtask { todo_id, title } => {
                self.dashboard.add_subtask(&self.todos, todo_id, title).await;
            }
            TraceStep::ToggleSubtask { todo_id, subtask_id } => {
                self.dashboard.toggle_subtask(&self.todos, todo_id, subtask_id).await;
            }
            TraceStep::RemoveSubtask { todo_id, subtask_id } => {
                self.dashboard.remove_subtask(&self.todos, todo_id, subtask_id).await;
            }
            TraceStep::CreateSchedule { request } => {
                self.dashboard
                    .create_schedule(&self.schedules, request.clone(), self.today)
                    .await;
            }
            TraceStep::ShowSchedule { schedule_id } => {
                self.dashboard.show_schedule(schedule_id, &mut self.rng);
            }
            TraceStep::DeleteSchedule { schedule_id } => {
                self.dashboard.delete_schedule(&self.schedules, schedule_id).await;
            }
            TraceStep::ToggleTimer => self.dashboard.timer_mut().toggle(),
            TraceStep::ResetTimer => self.dashboard.timer_mut().reset(),
            TraceStep::SetTimerPreset { minutes, seconds } => {
                self.dashboard.timer_mut().set_preset(*minutes, *seconds);
            }
            TraceStep::Tick { secs } => self.dashboard.tick_timer(*secs),
            TraceStep::Offline { offline } => {
                self.notes.set_offline(*offline);
                self.todos.set_offline(*offline);
                self.schedules.set_offline(*offline);
            }
            TraceStep::Sync => self.sync().await,
        }
        Vec::new()
    }
}

/// Load everything named by `config` and replay it.
pub async fn run(config: &AppConfig) -> Result<Report, AppError> {
    let dashboard_config = config.load_dashboard_config()?;
    let trace = load_trace(&config.trace_path)?;
    log::info!(
        "Replaying {} steps from {}",
        trace.steps.len(),
        config.trace_path.display()
    );
    let mut app = App::new(dashboard_config, &trace);
    Ok(app.replay(&trace.steps).await)
}
