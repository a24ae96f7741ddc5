//! Records exchanged with the remote API.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A saved sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Body of a note creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A to-do item with its checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Done flag.
    pub status: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub status: bool,
}

/// One study block on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamTask {
    pub subject: String,
    pub minutes: u32,
}

/// A subject entry of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSubject {
    pub subject: String,
    #[serde(rename = "examDate")]
    pub exam_date: NaiveDate,
    #[serde(rename = "confidenceLevel")]
    pub confidence_level: u8,
}

/// A server-computed study plan: date key (`YYYY-MM-DD`) to the day's tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSchedule {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "scheduleName")]
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<ScheduledSubject>,
    #[serde(default)]
    pub schedule: BTreeMap<String, Vec<ExamTask>>,
}

/// Subject row of a plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRequest {
    pub subject: String,
    #[serde(rename = "examDate")]
    pub exam_date: Option<NaiveDate>,
    #[serde(rename = "confidenceLevel")]
    pub confidence_level: u8,
}

/// Parameters sent to the planner endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamPlanRequest {
    #[serde(rename = "scheduleName")]
    pub name: String,
    pub subjects: Vec<SubjectRequest>,
    #[serde(rename = "availableStudyHours")]
    pub available_study_hours: u32,
    #[serde(rename = "maxContinuousStudyTime")]
    pub max_continuous_minutes: u32,
    #[serde(rename = "maxSubjectsPerDay")]
    pub max_subjects_per_day: u32,
}

/// Why a plan request was refused before it reached the planner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Schedule name is required")]
    MissingName,
    #[error("At least 2 subjects are required")]
    TooFewSubjects,
    #[error("Subject name is required for Subject {0}")]
    MissingSubject(usize),
    #[error("Exam date is required for Subject {0}")]
    MissingDate(usize),
    #[error("Exam date for Subject {0} must be at least a day away")]
    DateTooSoon(usize),
    #[error("Confidence for Subject {0} must be between 1 and 10")]
    Confidence(usize),
}

impl ExamPlanRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
            available_study_hours: 2,
            max_continuous_minutes: 90,
            max_subjects_per_day: 2,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>, exam_date: NaiveDate, confidence: u8) -> Self {
        self.subjects.push(SubjectRequest {
            subject: subject.into(),
            exam_date: Some(exam_date),
            confidence_level: confidence,
        });
        self
    }

    /// Check the request against `today`. Subject numbers in errors are 1-based.
    pub fn validate(&self, today: NaiveDate) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::MissingName);
        }
        if self.subjects.len() < 2 {
            return Err(PlanError::TooFewSubjects);
        }
        for (index, subject) in self.subjects.iter().enumerate() {
            let number = index + 1;
            if subject.subject.trim().is_empty() {
                return Err(PlanError::MissingSubject(number));
            }
            let date = subject.exam_date.ok_or(PlanError::MissingDate(number))?;
            if date <= today {
                return Err(PlanError::DateTooSoon(number));
            }
            if !(1..=10).contains(&subject.confidence_level) {
                return Err(PlanError::Confidence(number));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_note_wire_names() {
        let json = r#"{"_id":"abc","content":"hi","createdAt":"2024-05-01T10:00:00Z"}"#;
        let note: NoteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, "abc");
        assert_eq!(note.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_todo_without_subtasks() {
        let todo: TodoRecord = serde_json::from_str(r#"{"_id":"t","title":"Read","status":false}"#).unwrap();
        assert!(todo.subtasks.is_empty());
    }

    #[test]
    fn test_plan_validation() {
        let today = day(2024, 5, 1);
        let ok = ExamPlanRequest::new("Finals")
            .with_subject("Maths", day(2024, 5, 10), 5)
            .with_subject("Physics", day(2024, 5, 2), 7);
        assert_eq!(ok.validate(today), Ok(()));

        assert_eq!(ExamPlanRequest::new("  ").validate(today), Err(PlanError::MissingName));
        let one = ExamPlanRequest::new("x").with_subject("Maths", day(2024, 5, 10), 5);
        assert_eq!(one.validate(today), Err(PlanError::TooFewSubjects));

        let soon = ExamPlanRequest::new("x")
            .with_subject("Maths", day(2024, 5, 10), 5)
            .with_subject("Physics", today, 5);
        assert_eq!(soon.validate(today), Err(PlanError::DateTooSoon(2)));

        let mut missing = ok.clone();
        missing.subjects[0].exam_date = None;
        assert_eq!(missing.validate(today), Err(PlanError::MissingDate(1)));

        let mut blank = ok.clone();
        blank.subjects[1].subject = String::new();
        assert_eq!(blank.validate(today), Err(PlanError::MissingSubject(2)));

        let mut shaky = ok;
        shaky.subjects[0].confidence_level = 0;
        assert_eq!(shaky.validate(today), Err(PlanError::Confidence(1)));
    }
}
