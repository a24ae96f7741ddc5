//! In-memory collaborators for tests and offline runs.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::{
    BoxFuture, CollabError, CollabResult, ExamPlanRequest, ExamSchedule, NoteDraft, NoteRecord,
    NoteService, ScheduleService, ScheduledSubject, Subtask, TodoRecord, TodoService,
};

/// Shared plumbing: an id counter and an offline switch.
#[derive(Debug, Default)]
struct Backend {
    next_id: AtomicU64,
    offline: AtomicBool,
}

impl Backend {
    fn mint(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn check(&self) -> CollabResult<()> {
        if self.offline.load(Ordering::Relaxed) {
            Err(CollabError::Network("collaborator offline".to_string()))
        } else {
            Ok(())
        }
    }
}

fn lock_error(e: impl std::fmt::Display) -> CollabError {
    CollabError::Rejected(format!("Lock error: {}", e))
}

/// In-memory note store.
#[derive(Debug, Default)]
pub struct MemoryNotes {
    notes: RwLock<Vec<NoteRecord>>,
    backend: Backend,
}

impl MemoryNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<NoteRecord>) -> Self {
        Self {
            notes: RwLock::new(notes),
            backend: Backend::default(),
        }
    }

    /// Make every subsequent call fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.backend.offline.store(offline, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.notes.read().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoteService for MemoryNotes {
    fn list(&self) -> BoxFuture<'_, CollabResult<Vec<NoteRecord>>> {
        Box::pin(async move {
            self.backend.check()?;
            let notes = self.notes.read().map_err(lock_error)?;
            Ok(notes.clone())
        })
    }

    fn create(&self, draft: NoteDraft) -> BoxFuture<'_, CollabResult<NoteRecord>> {
        Box::pin(async move {
            self.backend.check()?;
            let record = NoteRecord {
                id: self.backend.mint("note"),
                content: draft.content,
                created_at: draft.created_at,
            };
            let mut notes = self.notes.write().map_err(lock_error)?;
            notes.insert(0, record.clone());
            Ok(record)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, CollabResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.backend.check()?;
            let mut notes = self.notes.write().map_err(lock_error)?;
            let before = notes.len();
            notes.retain(|n| n.id != id);
            if notes.len() == before {
                return Err(CollabError::NotFound(id));
            }
            Ok(())
        })
    }
}

/// In-memory to-do store.
#[derive(Debug, Default)]
pub struct MemoryTodos {
    todos: RwLock<Vec<TodoRecord>>,
    backend: Backend,
}

impl MemoryTodos {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<TodoRecord>) -> Self {
        Self {
            todos: RwLock::new(todos),
            backend: Backend::default(),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.backend.offline.store(offline, Ordering::Relaxed);
    }

    /// Snapshot of the stored list.
    pub fn snapshot(&self) -> Vec<TodoRecord> {
        self.todos.read().map(|t| t.clone()).unwrap_or_default()
    }

    fn update<T>(&self, id: &str, f: impl FnOnce(&mut TodoRecord) -> CollabResult<T>) -> CollabResult<T> {
        self.backend.check()?;
        let mut todos = self.todos.write().map_err(lock_error)?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CollabError::NotFound(id.to_string()))?;
        f(todo)
    }
}

impl TodoService for MemoryTodos {
    fn list(&self) -> BoxFuture<'_, CollabResult<Vec<TodoRecord>>> {
        Box::pin(async move {
            self.backend.check()?;
            Ok(self.todos.read().map_err(lock_error)?.clone())
        })
    }

    fn create(&self, title: &str) -> BoxFuture<'_, CollabResult<TodoRecord>> {
        let title = title.to_string();
        Box::pin(async move {
            self.backend.check()?;
            let record = TodoRecord {
                id: self.backend.mint("todo"),
                title,
                status: false,
                subtasks: Vec::new(),
            };
            self.todos.write().map_err(lock_error)?.push(record.clone());
            Ok(record)
        })
    }

    fn set_status(&self, id: &str, done: bool) -> BoxFuture<'_, CollabResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.update(&id, |todo| {
                todo.status = done;
                Ok(())
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, CollabResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.backend.check()?;
            let mut todos = self.todos.write().map_err(lock_error)?;
            let before = todos.len();
            todos.retain(|t| t.id != id);
            if todos.len() == before {
                return Err(CollabError::NotFound(id));
            }
            Ok(())
        })
    }

    fn add_subtask(&self, todo_id: &str, title: &str) -> BoxFuture<'_, CollabResult<TodoRecord>> {
        let todo_id = todo_id.to_string();
        let title = title.to_string();
        Box::pin(async move {
            let subtask_id = self.backend.mint("subtask");
            self.update(&todo_id, |todo| {
                todo.subtasks.push(Subtask {
                    id: subtask_id,
                    title,
                    status: false,
                });
                Ok(todo.clone())
            })
        })
    }

    fn set_subtask_status(&self, todo_id: &str, subtask_id: &str, done: bool) -> BoxFuture<'_, CollabResult<()>> {
        let todo_id = todo_id.to_string();
        let subtask_id = subtask_id.to_string();
        Box::pin(async move {
            self.update(&todo_id, |todo| {
                let subtask = todo
                    .subtasks
                    .iter_mut()
                    .find(|s| s.id == subtask_id)
                    .ok_or_else(|| CollabError::NotFound(subtask_id.clone()))?;
                subtask.status = done;
                Ok(())
            })
        })
    }

    fn delete_subtask(&self, todo_id: &str, subtask_id: &str) -> BoxFuture<'_, CollabResult<()>> {
        let todo_id = todo_id.to_string();
        let subtask_id = subtask_id.to_string();
        Box::pin(async move {
            self.update(&todo_id, |todo| {
                let before = todo.subtasks.len();
                todo.subtasks.retain(|s| s.id != subtask_id);
                if todo.subtasks.len() == before {
                    return Err(CollabError::NotFound(subtask_id.clone()));
                }
                Ok(())
            })
        })
    }
}

/// In-memory planner. New plans come back with an empty day map; seed
/// computed schedules with [`MemorySchedules::with_schedules`].
#[derive(Debug, Default)]
pub struct MemorySchedules {
    schedules: RwLock<Vec<ExamSchedule>>,
    backend: Backend,
}

impl MemorySchedules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedules(schedules: Vec<ExamSchedule>) -> Self {
        Self {
            schedules: RwLock::new(schedules),
            backend: Backend::default(),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.backend.offline.store(offline, Ordering::Relaxed);
    }
}

impl ScheduleService for MemorySchedules {
    fn list(&self) -> BoxFuture<'_, CollabResult<Vec<ExamSchedule>>> {
        Box::pin(async move {
            self.backend.check()?;
            Ok(self.schedules.read().map_err(lock_error)?.clone())
        })
    }

    fn create(&self, request: ExamPlanRequest) -> BoxFuture<'_, CollabResult<ExamSchedule>> {
        Box::pin(async move {
            self.backend.check()?;
            let subjects = request
                .subjects
                .into_iter()
                .map(|s| {
                    let exam_date = s
                        .exam_date
                        .ok_or_else(|| CollabError::Rejected(format!("{} has no exam date", s.subject)))?;
                    Ok(ScheduledSubject {
                        subject: s.subject,
                        exam_date,
                        confidence_level: s.confidence_level,
                    })
                })
                .collect::<CollabResult<Vec<_>>>()?;
            let schedule = ExamSchedule {
                id: self.backend.mint("plan"),
                name: request.name,
                subjects,
                schedule: Default::default(),
            };
            self.schedules.write().map_err(lock_error)?.push(schedule.clone());
            Ok(schedule)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, CollabResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.backend.check()?;
            let mut schedules = self.schedules.write().map_err(lock_error)?;
            let before = schedules.len();
            schedules.retain(|s| s.id != id);
            if schedules.len() == before {
                return Err(CollabError::NotFound(id));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::block_on;
    use chrono::Utc;

    #[test]
    fn test_notes_round_trip() {
        let store = MemoryNotes::new();
        let saved = block_on(store.create(NoteDraft {
            content: "first".to_string(),
            created_at: Utc::now(),
        }))
        .unwrap();
        assert_eq!(block_on(store.list()).unwrap(), vec![saved.clone()]);
        block_on(store.delete(&saved.id)).unwrap();
        assert!(store.is_empty());
        assert!(matches!(block_on(store.delete(&saved.id)), Err(CollabError::NotFound(_))));
    }

    #[test]
    fn test_offline_fails() {
        let store = MemoryTodos::new();
        store.set_offline(true);
        assert!(matches!(block_on(store.list()), Err(CollabError::Network(_))));
        store.set_offline(false);
        assert!(block_on(store.list()).unwrap().is_empty());
    }

    #[test]
    fn test_subtasks() {
        let store = MemoryTodos::new();
        let todo = block_on(store.create("Revise")).unwrap();
        let updated = block_on(store.add_subtask(&todo.id, "Chapter 1")).unwrap();
        let sub = updated.subtasks[0].id.clone();
        block_on(store.set_subtask_status(&todo.id, &sub, true)).unwrap();
        assert!(store.snapshot()[0].subtasks[0].status);
        block_on(store.delete_subtask(&todo.id, &sub)).unwrap();
        assert!(store.snapshot()[0].subtasks.is_empty());
    }
}
