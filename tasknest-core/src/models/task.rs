//! Task model and database operations
//!
//! Tasks belong to a project and remember their author.
//!
//! # Lifecycle
//!
//! ```text
//! NOT_COMPLETED ──complete──▶ COMPLETED
//!       ▲                         │
//!       └──────────reopen─────────┘
//! ```
//!
//! `completed` is NULL while a task is open and holds the completion time
//! once it is marked COMPLETED.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id           INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name         TEXT NOT NULL,
//!     description  TEXT NOT NULL,
//!     author_id    INTEGER NOT NULL REFERENCES users(id),
//!     project_id   INTEGER NOT NULL REFERENCES projects(id),
//!     status       TEXT NOT NULL DEFAULT 'NOT_COMPLETED',
//!     created      TEXT NOT NULL,
//!     completed    TEXT
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::db::session::Session;
//! use tasknest_core::models::task::{CreateTask, Task};
//!
//! # async fn example(session: &mut Session, author_id: i64, project_id: i64) -> Result<(), Box<dyn std::error::Error>> {
//! let task = Task::create(session, CreateTask::new("Write report", "Q3 numbers", author_id, project_id)).await?;
//!
//! Task::complete(session, task.id).await?;
//!
//! let author = task.author(session).await?;
//! assert_eq!(author.id, author_id);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::debug;
use validator::Validate;

use crate::error::{ModelError, ModelResult};
use crate::models::project::Project;
use crate::models::status::TaskStatus;
use crate::models::user::User;

/// Task model representing one item of work inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned in insertion order
    pub id: i64,

    pub name: String,

    pub description: String,

    /// User who wrote the task
    pub author_id: i64,

    /// Project the task belongs to
    pub project_id: i64,

    pub status: TaskStatus,

    /// When the task was created
    pub created: DateTime<Utc>,

    /// When the task was completed (None while open)
    pub completed: Option<DateTime<Utc>>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: String,

    pub author_id: i64,

    pub project_id: i64,

    /// Initial status (default NOT_COMPLETED)
    #[serde(default)]
    pub status: TaskStatus,
}

impl CreateTask {
    /// An open task
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        author_id: i64,
        project_id: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            author_id,
            project_id,
            status: TaskStatus::NotCompleted,
        }
    }

    /// Sets the initial status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

impl Task {
    /// Creates a new task
    ///
    /// A task created already COMPLETED gets its creation time as completion
    /// time; an open task has no completion time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty or longer than 255 characters
    /// - `author_id` or `project_id` doesn't reference an existing row
    /// - The database operation fails
    pub async fn create(conn: &mut SqliteConnection, data: CreateTask) -> ModelResult<Self> {
        data.validate()?;

        let now = Utc::now();
        let completed = data.status.is_completed().then_some(now);

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, description, author_id, project_id, status, created, completed)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, name, description, author_id, project_id, status, created, completed
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.author_id)
        .bind(data.project_id)
        .bind(data.status)
        .bind(now)
        .bind(completed)
        .fetch_one(&mut *conn)
        .await?;

        debug!(
            task_id = task.id,
            project_id = task.project_id,
            author_id = task.author_id,
            "Created task"
        );
        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> ModelResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, author_id, project_id, status, created, completed
            FROM tasks
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(task)
    }

    /// Finds the earliest-created task with the given name
    pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> ModelResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, author_id, project_id, status, created, completed
            FROM tasks
            WHERE name = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(task)
    }

    /// Marks a task COMPLETED and stamps the completion time
    ///
    /// Completing an already completed task keeps its original completion
    /// time. Returns None if the task doesn't exist.
    pub async fn complete(conn: &mut SqliteConnection, id: i64) -> ModelResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = ?2,
                completed = COALESCE(completed, ?3)
            WHERE id = ?1
            RETURNING id, name, description, author_id, project_id, status, created, completed
            "#,
        )
        .bind(id)
        .bind(TaskStatus::Completed)
        .bind(Utc::now())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(task)
    }

    /// Marks a task NOT_COMPLETED and clears the completion time
    pub async fn reopen(conn: &mut SqliteConnection, id: i64) -> ModelResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = ?2,
                completed = NULL
            WHERE id = ?1
            RETURNING id, name, description, author_id, project_id, status, created, completed
            "#,
        )
        .bind(id)
        .bind(TaskStatus::NotCompleted)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> ModelResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads the user who wrote this task
    pub async fn author(&self, conn: &mut SqliteConnection) -> ModelResult<User> {
        User::find_by_id(conn, self.author_id)
            .await?
            .ok_or(ModelError::NotFound {
                entity: "user",
                id: self.author_id,
            })
    }

    /// Loads the project this task belongs to
    pub async fn project(&self, conn: &mut SqliteConnection) -> ModelResult<Project> {
        Project::find_by_id(conn, self.project_id)
            .await?
            .ok_or(ModelError::NotFound {
                entity: "project",
                id: self.project_id,
            })
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}
