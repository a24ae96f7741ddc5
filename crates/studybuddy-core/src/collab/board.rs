//! Local mirrors of collaborator data with optimistic mutation.
//!
//! Every mutation edits the local list first, awaits the collaborator, and
//! restores the previous list if the call fails.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{
    CollabError, CollabResult, ExamPlanRequest, ExamSchedule, NoteDraft, NoteRecord, NoteService,
    ScheduleService, Subtask, TodoRecord, TodoService,
};

fn pending_id() -> String {
    format!("pending-{}", Uuid::new_v4())
}

/// Saved notes, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotesBoard {
    notes: Vec<NoteRecord>,
}

impl NotesBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&NoteRecord> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub async fn refresh(&mut self, service: &dyn NoteService) -> CollabResult<()> {
        self.notes = service.list().await?;
        Ok(())
    }

    /// Save a note. Blank content is ignored and yields `Ok(None)`.
    pub async fn add(
        &mut self,
        service: &dyn NoteService,
        content: &str,
        now: DateTime<Utc>,
    ) -> CollabResult<Option<NoteRecord>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let temp_id = pending_id();
        self.notes.insert(
            0,
            NoteRecord {
                id: temp_id.clone(),
                content: content.to_string(),
                created_at: now,
            },
        );

        let draft = NoteDraft {
            content: content.to_string(),
            created_at: now,
        };
        match service.create(draft).await {
            Ok(saved) => {
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == temp_id) {
                    *slot = saved.clone();
                }
                Ok(Some(saved))
            }
            Err(err) => {
                self.notes.retain(|n| n.id != temp_id);
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, service: &dyn NoteService, id: &str) -> CollabResult<()> {
        let snapshot = self.notes.clone();
        self.notes.retain(|n| n.id != id);
        if let Err(err) = service.delete(id).await {
            self.notes = snapshot;
            return Err(err);
        }
        Ok(())
    }
}

/// To-do list shown in the side panel.
#[derive(Debug, Clone, Default)]
pub struct TodoBoard {
    todos: Vec<TodoRecord>,
}

impl TodoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[TodoRecord] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&TodoRecord> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Number of finished items.
    pub fn completed(&self) -> usize {
        self.todos.iter().filter(|t| t.status).count()
    }

    pub async fn refresh(&mut self, service: &dyn TodoService) -> CollabResult<()> {
        self.todos = service.list().await?;
        Ok(())
    }

    pub async fn add(&mut self, service: &dyn TodoService, title: &str) -> CollabResult<Option<TodoRecord>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let temp_id = pending_id();
        self.todos.push(TodoRecord {
            id: temp_id.clone(),
            title: title.to_string(),
            status: false,
            subtasks: Vec::new(),
        });

        match service.create(title).await {
            Ok(saved) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == temp_id) {
                    *slot = saved.clone();
                }
                Ok(Some(saved))
            }
            Err(err) => {
                self.todos.retain(|t| t.id != temp_id);
                Err(err)
            }
        }
    }

    /// Flip the done flag.
    pub async fn toggle(&mut self, service: &dyn TodoService, id: &str) -> CollabResult<()> {
        let snapshot = self.todos.clone();
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CollabError::NotFound(id.to_string()))?;
        todo.status = !todo.status;
        let done = todo.status;

        self.commit(snapshot, service.set_status(id, done).await)
    }

    pub async fn remove(&mut self, service: &dyn TodoService, id: &str) -> CollabResult<()> {
        let snapshot = self.todos.clone();
        self.todos.retain(|t| t.id != id);
        self.commit(snapshot, service.delete(id).await)
    }

    pub async fn add_subtask(&mut self, service: &dyn TodoService, todo_id: &str, title: &str) -> CollabResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(());
        }
        let snapshot = self.todos.clone();
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or_else(|| CollabError::NotFound(todo_id.to_string()))?;
        todo.subtasks.push(Subtask {
            id: pending_id(),
            title: title.to_string(),
            status: false,
        });

        match service.add_subtask(todo_id, title).await {
            Ok(updated) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo_id) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(err) => self.commit(snapshot, Err(err)),
        }
    }

    pub async fn toggle_subtask(&mut self, service: &dyn TodoService, todo_id: &str, subtask_id: &str) -> CollabResult<()> {
        let snapshot = self.todos.clone();
        let subtask = self
            .todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .and_then(|t| t.subtasks.iter_mut().find(|s| s.id == subtask_id))
            .ok_or_else(|| CollabError::NotFound(subtask_id.to_string()))?;
        subtask.status = !subtask.status;
        let done = subtask.status;

        self.commit(snapshot, service.set_subtask_status(todo_id, subtask_id, done).await)
    }

    pub async fn remove_subtask(&mut self, service: &dyn TodoService, todo_id: &str, subtask_id: &str) -> CollabResult<()> {
        let snapshot = self.todos.clone();
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == todo_id) {
            todo.subtasks.retain(|s| s.id != subtask_id);
        }
        self.commit(snapshot, service.delete_subtask(todo_id, subtask_id).await)
    }

    fn commit(&mut self, snapshot: Vec<TodoRecord>, result: CollabResult<()>) -> CollabResult<()> {
        if result.is_err() {
            self.todos = snapshot;
        }
        result
    }
}

/// Exam plans known to the planner.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBoard {
    schedules: Vec<ExamSchedule>,
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedules(&self) -> &[ExamSchedule] {
        &self.schedules
    }

    pub fn get(&self, id: &str) -> Option<&ExamSchedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    pub async fn refresh(&mut self, service: &dyn ScheduleService) -> CollabResult<()> {
        self.schedules = service.list().await?;
        Ok(())
    }

    /// Validate against `today`, then ask the planner. Invalid requests never
    /// reach the collaborator.
    pub async fn create(
        &mut self,
        service: &dyn ScheduleService,
        request: ExamPlanRequest,
        today: NaiveDate,
    ) -> CollabResult<ExamSchedule> {
        request
            .validate(today)
            .map_err(|e| CollabError::Rejected(e.to_string()))?;
        let schedule = service.create(request).await?;
        self.schedules.push(schedule.clone());
        Ok(schedule)
    }

    pub async fn delete(&mut self, service: &dyn ScheduleService, id: &str) -> CollabResult<()> {
        let snapshot = self.schedules.clone();
        self.schedules.retain(|s| s.id != id);
        if let Err(err) = service.delete(id).await {
            self.schedules = snapshot;
            return Err(err);
        }
        Ok(())
    }
}
