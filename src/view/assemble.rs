//! Display records built from API tasks.
//!
//! Pure functions: the caller supplies `now`, nothing here reads the clock.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::Serialize;

use crate::task::{Task, TaskStatus};

/// Format used for every timestamp shown to the user.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A task plus the fields templates need.
///
/// The original task fields are flattened in unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub status_label: &'static str,
    pub is_overdue: bool,
    pub formatted_due_date: Option<String>,
    pub formatted_created_at: String,
    pub formatted_updated_at: String,
    /// Zero-padded day, empty without a due date.
    pub due_date_day: String,
    /// Zero-padded month, empty without a due date.
    pub due_date_month: String,
    pub due_date_year: String,
}

/// Day, month and year of a due date as the date input shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueDateParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

/// Overdue: has a due date in the past and is not completed.
///
/// Cancelled tasks past their due date count as overdue too.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => due < now && task.status != TaskStatus::Completed,
        None => false,
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
}

/// Split a due date into the local calendar parts the form re-populates.
pub fn due_date_parts(ts: DateTime<Utc>) -> DueDateParts {
    let local = ts.with_timezone(&Local);
    DueDateParts {
        day: format!("{:02}", local.day()),
        month: format!("{:02}", local.month()),
        year: local.year().to_string(),
    }
}

pub fn assemble_task(task: Task, now: DateTime<Utc>) -> TaskView {
    let parts = task.due_date.map(due_date_parts).unwrap_or_default();
    TaskView {
        status_label: task.status.label(),
        is_overdue: is_overdue(&task, now),
        formatted_due_date: task.due_date.map(format_timestamp),
        formatted_created_at: format_timestamp(task.created_at),
        formatted_updated_at: format_timestamp(task.updated_at),
        due_date_day: parts.day,
        due_date_month: parts.month,
        due_date_year: parts.year,
        task,
    }
}

pub fn assemble_tasks(tasks: Vec<Task>, now: DateTime<Utc>) -> Vec<TaskView> {
    tasks.into_iter().map(|task| assemble_task(task, now)).collect()
}
