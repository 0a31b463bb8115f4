//! Task completion status
//!
//! Stored as TEXT in the `tasks.status` column. Equality on this value is what
//! splits a project's tasks into completed and unfinished.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether a task has been completed
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is still open
    #[default]
    NotCompleted,

    /// Task is done
    Completed,
}

/// Returned when parsing text that is not a known status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0:?}")]
pub struct UnknownStatus(pub String);

impl TaskStatus {
    /// Converts status to the string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotCompleted => "NOT_COMPLETED",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_COMPLETED" => Ok(TaskStatus::NotCompleted),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
