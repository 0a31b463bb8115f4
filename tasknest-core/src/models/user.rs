//! User model and database operations
//!
//! Users own projects and author tasks. Besides plain CRUD, this module holds
//! the owner-side relationship accessors: a user's projects (all, active,
//! archived) and their inbox.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id          INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name        TEXT NOT NULL,
//!     joined      TEXT NOT NULL,
//!     last_login  TEXT NOT NULL
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::db::session::Session;
//! use tasknest_core::models::user::{CreateUser, User};
//!
//! # async fn example(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
//! let user = User::create(session, CreateUser::new("Bob")).await?;
//!
//! // Every user with at least one project has an inbox
//! let inbox = user.get_inbox(session).await?;
//! println!("{}'s inbox is {}", user.name, inbox.name);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::{ModelError, ModelResult};
use crate::models::project::Project;

/// User model representing an account that owns projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the database in insertion order
    pub id: i64,

    /// Display name (not unique)
    pub name: String,

    /// When the user was created
    pub joined: DateTime<Utc>,

    /// When the user last logged in
    ///
    /// Starts out equal to `joined`
    pub last_login: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Display name
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

impl CreateUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl User {
    /// Creates a new user in the database
    ///
    /// `joined` and `last_login` are both set to the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty or longer than 255 characters
    /// - The database operation fails
    pub async fn create(conn: &mut SqliteConnection, data: CreateUser) -> ModelResult<Self> {
        data.validate()?;

        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, joined, last_login)
            VALUES (?1, ?2, ?2)
            RETURNING id, name, joined, last_login
            "#,
        )
        .bind(data.name)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> ModelResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, joined, last_login
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Finds the earliest-created user with the given name
    pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> ModelResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, joined, last_login
            FROM users
            WHERE name = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Sets `last_login` to the current time
    ///
    /// Returns the updated user, or None if the user doesn't exist
    pub async fn record_login(conn: &mut SqliteConnection, id: i64) -> ModelResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET last_login = ?2
            WHERE id = ?1
            RETURNING id, name, joined, last_login
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Deletes a user
    ///
    /// Fails with a foreign key violation while the user still owns projects
    /// or has authored tasks.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> ModelResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every project owned by this user, in creation order
    pub async fn get_projects(&self, conn: &mut SqliteConnection) -> ModelResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, archived, inbox
            FROM projects
            WHERE owner_id = ?1
            ORDER BY id
            "#,
        )
        .bind(self.id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(projects)
    }

    /// Lists this user's projects that are not archived
    pub async fn get_active_projects(
        &self,
        conn: &mut SqliteConnection,
    ) -> ModelResult<Vec<Project>> {
        self.get_projects_by_archived(conn, false).await
    }

    /// Lists this user's archived projects
    pub async fn get_archived_projects(
        &self,
        conn: &mut SqliteConnection,
    ) -> ModelResult<Vec<Project>> {
        self.get_projects_by_archived(conn, true).await
    }

    async fn get_projects_by_archived(
        &self,
        conn: &mut SqliteConnection,
        archived: bool,
    ) -> ModelResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, archived, inbox
            FROM projects
            WHERE owner_id = ?1 AND archived = ?2
            ORDER BY id
            "#,
        )
        .bind(self.id)
        .bind(archived)
        .fetch_all(&mut *conn)
        .await?;

        Ok(projects)
    }

    /// Returns this user's inbox project
    ///
    /// Resolution order:
    /// 1. The first project flagged `inbox`
    /// 2. Otherwise the user's earliest-created project
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoProjects`] if the user owns no projects at all.
    pub async fn get_inbox(&self, conn: &mut SqliteConnection) -> ModelResult<Project> {
        let flagged = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, archived, inbox
            FROM projects
            WHERE owner_id = ?1 AND inbox = TRUE
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(self.id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(project) = flagged {
            return Ok(project);
        }

        let earliest = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, archived, inbox
            FROM projects
            WHERE owner_id = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(self.id)
        .fetch_optional(&mut *conn)
        .await?;

        match earliest {
            Some(project) => {
                debug!(
                    user_id = self.id,
                    project_id = project.id,
                    "No flagged inbox, falling back to earliest project"
                );
                Ok(project)
            }
            None => {
                warn!(user_id = self.id, "Inbox requested for user without projects");
                Err(ModelError::NoProjects { user_id: self.id })
            }
        }
    }

    /// Counts the projects owned by this user
    pub async fn count_projects(&self, conn: &mut SqliteConnection) -> ModelResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = ?1")
            .bind(self.id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
