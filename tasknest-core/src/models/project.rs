//! Project model and database operations
//!
//! Projects belong to one owner and contain tasks. A project may be flagged as
//! its owner's inbox; see [`User::get_inbox`](crate::models::user::User::get_inbox)
//! for how the inbox is resolved when none is flagged.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE projects (
//!     id           INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name         TEXT NOT NULL,
//!     description  TEXT NOT NULL,
//!     owner_id     INTEGER NOT NULL REFERENCES users(id),
//!     archived     BOOLEAN NOT NULL DEFAULT FALSE,
//!     inbox        BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::debug;
use validator::Validate;

use crate::error::{ModelError, ModelResult};
use crate::models::status::TaskStatus;
use crate::models::task::Task;
use crate::models::user::User;

/// Project model grouping a user's tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID, assigned in insertion order
    pub id: i64,

    pub name: String,

    pub description: String,

    /// User who owns the project
    pub owner_id: i64,

    /// Archived projects are excluded from active listings
    pub archived: bool,

    /// Whether this is the owner's designated inbox
    pub inbox: bool,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: String,

    pub owner_id: i64,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub inbox: bool,
}

impl CreateProject {
    /// A regular (not archived, not inbox) project
    pub fn new(name: impl Into<String>, description: impl Into<String>, owner_id: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            owner_id,
            archived: false,
            inbox: false,
        }
    }

    /// Flags the project as its owner's inbox
    pub fn inbox(mut self) -> Self {
        self.inbox = true;
        self
    }

    /// Creates the project already archived
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

impl Project {
    /// Creates a new project
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty or longer than 255 characters
    /// - `owner_id` doesn't reference an existing user (foreign key violation)
    /// - The database operation fails
    pub async fn create(conn: &mut SqliteConnection, data: CreateProject) -> ModelResult<Self> {
        data.validate()?;

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, owner_id, archived, inbox)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, description, owner_id, archived, inbox
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.owner_id)
        .bind(data.archived)
        .bind(data.inbox)
        .fetch_one(&mut *conn)
        .await?;

        debug!(
            project_id = project.id,
            owner_id = project.owner_id,
            inbox = project.inbox,
            "Created project"
        );
        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> ModelResult<Option<Self>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, archived, inbox
            FROM projects
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(project)
    }

    /// Finds the earliest-created project with the given name
    pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> ModelResult<Option<Self>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, archived, inbox
            FROM projects
            WHERE name = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(project)
    }

    /// Archives or unarchives a project
    pub async fn set_archived(
        conn: &mut SqliteConnection,
        id: i64,
        archived: bool,
    ) -> ModelResult<Option<Self>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET archived = ?2
            WHERE id = ?1
            RETURNING id, name, description, owner_id, archived, inbox
            "#,
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(project)
    }

    /// Sets or clears the inbox flag
    ///
    /// Other projects of the same owner are left untouched, so an owner can
    /// end up with several flagged projects; the earliest one wins.
    pub async fn set_inbox(
        conn: &mut SqliteConnection,
        id: i64,
        inbox: bool,
    ) -> ModelResult<Option<Self>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET inbox = ?2
            WHERE id = ?1
            RETURNING id, name, description, owner_id, archived, inbox
            "#,
        )
        .bind(id)
        .bind(inbox)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// Fails with a foreign key violation while the project still has tasks.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> ModelResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads the user who owns this project
    pub async fn owner(&self, conn: &mut SqliteConnection) -> ModelResult<User> {
        User::find_by_id(conn, self.owner_id)
            .await?
            .ok_or(ModelError::NotFound {
                entity: "user",
                id: self.owner_id,
            })
    }

    /// Lists every task in this project, in creation order
    pub async fn get_tasks(&self, conn: &mut SqliteConnection) -> ModelResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, author_id, project_id, status, created, completed
            FROM tasks
            WHERE project_id = ?1
            ORDER BY id
            "#,
        )
        .bind(self.id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Lists this project's completed tasks
    pub async fn get_completed_tasks(&self, conn: &mut SqliteConnection) -> ModelResult<Vec<Task>> {
        self.get_tasks_by_status(conn, TaskStatus::Completed).await
    }

    /// Lists this project's tasks that are not completed yet
    pub async fn get_unfinished_tasks(
        &self,
        conn: &mut SqliteConnection,
    ) -> ModelResult<Vec<Task>> {
        self.get_tasks_by_status(conn, TaskStatus::NotCompleted).await
    }

    async fn get_tasks_by_status(
        &self,
        conn: &mut SqliteConnection,
        status: TaskStatus,
    ) -> ModelResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, author_id, project_id, status, created, completed
            FROM tasks
            WHERE project_id = ?1 AND status = ?2
            ORDER BY id
            "#,
        )
        .bind(self.id)
        .bind(status)
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Counts the tasks in this project
    pub async fn count_tasks(&self, conn: &mut SqliteConnection) -> ModelResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = ?1")
            .bind(self.id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
