//! Boundaries to the remote collaborators (session, notes, to-dos, schedules).
//!
//! The engine never talks to the network itself. Hosts implement these
//! traits over their HTTP client; [`memory`] provides in-process stand-ins.
//! Mutations go through the boards in [`board`], which update local state
//! optimistically and roll back when the collaborator refuses.

mod board;
mod memory;
mod records;
mod session;

pub use board::{NotesBoard, ScheduleBoard, TodoBoard};
pub use memory::{MemoryNotes, MemorySchedules, MemoryTodos};
pub use records::{
    ExamPlanRequest, ExamSchedule, ExamTask, NoteDraft, NoteRecord, PlanError, ScheduledSubject,
    Subtask, SubjectRequest, TodoRecord,
};
pub use session::{AlwaysValid, TokenSession};

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Collaborator errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollabError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Session expired or invalid")]
    Unauthorized,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Result type for collaborator calls.
pub type CollabResult<T> = Result<T, CollabError>;

/// Boxed future for collaborator calls (the dashboard runs on one thread).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Answers whether the signed-in session may see the dashboard.
pub trait SessionGuard {
    fn is_valid(&self) -> bool;
}

/// Sticky-note persistence.
pub trait NoteService {
    /// All saved notes, newest first.
    fn list(&self) -> BoxFuture<'_, CollabResult<Vec<NoteRecord>>>;

    /// Persist a note; returns the stored record with its server id.
    fn create(&self, draft: NoteDraft) -> BoxFuture<'_, CollabResult<NoteRecord>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, CollabResult<()>>;
}

/// To-do list persistence.
pub trait TodoService {
    fn list(&self) -> BoxFuture<'_, CollabResult<Vec<TodoRecord>>>;

    fn create(&self, title: &str) -> BoxFuture<'_, CollabResult<TodoRecord>>;

    fn set_status(&self, id: &str, done: bool) -> BoxFuture<'_, CollabResult<()>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, CollabResult<()>>;

    /// Append a subtask; returns the updated parent.
    fn add_subtask(&self, todo_id: &str, title: &str) -> BoxFuture<'_, CollabResult<TodoRecord>>;

    fn set_subtask_status(&self, todo_id: &str, subtask_id: &str, done: bool) -> BoxFuture<'_, CollabResult<()>>;

    fn delete_subtask(&self, todo_id: &str, subtask_id: &str) -> BoxFuture<'_, CollabResult<()>>;
}

/// Exam planner. Schedules are computed remotely.
pub trait ScheduleService {
    fn list(&self) -> BoxFuture<'_, CollabResult<Vec<ExamSchedule>>>;

    fn create(&self, request: ExamPlanRequest) -> BoxFuture<'_, CollabResult<ExamSchedule>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, CollabResult<()>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
