//! Blocking (thread-synchronous) access to the model layer
//!
//! [`Database`] owns a current-thread Tokio runtime and a migrated pool;
//! [`Session`] drives the async accessors on that runtime, so callers without
//! an async context get exactly the same queries and results.
//!
//! These types must not be used from inside an async runtime: Tokio refuses
//! to block a thread that is already driving one.
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::blocking::Database;
//! use tasknest_core::models::{CreateProject, CreateUser};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::in_memory()?;
//! let mut session = db.session()?;
//!
//! let user = session.create_user(CreateUser::new("Bob"))?;
//! session.create_project(CreateProject::new("Inbox", "Bob's inbox", user.id).inbox())?;
//!
//! let inbox = session.get_inbox(&user)?;
//! session.commit()?;
//! # Ok(())
//! # }
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::db::{self, migrations, pool::DatabaseConfig, session::Session as AsyncSession};
use crate::error::{ModelError, ModelResult};
use crate::models::{CreateProject, CreateTask, CreateUser, Project, Task, User};

/// A migrated database plus the runtime that drives it
pub struct Database {
    runtime: Arc<Runtime>,
    pool: SqlitePool,
}

impl Database {
    /// Opens a pool for `config` and applies pending migrations
    pub fn connect(config: DatabaseConfig) -> ModelResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let pool = runtime.block_on(db::connect(config))?;

        debug!("Blocking database ready");
        Ok(Self {
            runtime: Arc::new(runtime),
            pool,
        })
    }

    /// Opens a private in-memory database
    pub fn in_memory() -> ModelResult<Self> {
        Self::connect(DatabaseConfig::in_memory())
    }

    /// Begins a new session (transaction)
    ///
    /// An in-memory database has a single connection, so only one session can
    /// be open at a time.
    pub fn session(&self) -> ModelResult<Session> {
        let inner = self.runtime.block_on(AsyncSession::begin(&self.pool))?;
        Ok(Session {
            runtime: Arc::clone(&self.runtime),
            inner: Some(inner),
        })
    }

    pub fn migration_status(&self) -> ModelResult<migrations::MigrationStatus> {
        Ok(self
            .runtime
            .block_on(migrations::get_migration_status(&self.pool))?)
    }

    /// The underlying pool, for callers that mix in async code elsewhere
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// A blocking transaction scope
///
/// Dropping a session without committing rolls it back.
pub struct Session {
    runtime: Arc<Runtime>,
    inner: Option<AsyncSession>,
}

impl Session {
    fn run<'a, F, Fut, T>(&'a mut self, f: F) -> ModelResult<T>
    where
        F: FnOnce(&'a mut SqliteConnection) -> Fut,
        Fut: Future<Output = ModelResult<T>>,
    {
        let session = self.inner.as_mut().ok_or(ModelError::SessionFinished)?;
        let conn: &'a mut SqliteConnection = &mut **session;
        self.runtime.block_on(f(conn))
    }

    /// Commits every change made through this session
    pub fn commit(mut self) -> ModelResult<()> {
        match self.inner.take() {
            Some(inner) => self.runtime.block_on(inner.commit()),
            None => Err(ModelError::SessionFinished),
        }
    }

    /// Discards every change made through this session
    pub fn rollback(mut self) -> ModelResult<()> {
        match self.inner.take() {
            Some(inner) => self.runtime.block_on(inner.rollback()),
            None => Err(ModelError::SessionFinished),
        }
    }

    // -- Users --

    pub fn create_user(&mut self, data: CreateUser) -> ModelResult<User> {
        self.run(|conn| User::create(conn, data))
    }

    pub fn find_user(&mut self, id: i64) -> ModelResult<Option<User>> {
        self.run(|conn| User::find_by_id(conn, id))
    }

    pub fn find_user_by_name(&mut self, name: &str) -> ModelResult<Option<User>> {
        self.run(|conn| User::find_by_name(conn, name))
    }

    pub fn record_login(&mut self, id: i64) -> ModelResult<Option<User>> {
        self.run(|conn| User::record_login(conn, id))
    }

    pub fn delete_user(&mut self, id: i64) -> ModelResult<bool> {
        self.run(|conn| User::delete(conn, id))
    }

    pub fn get_projects(&mut self, user: &User) -> ModelResult<Vec<Project>> {
        self.run(|conn| user.get_projects(conn))
    }

    pub fn get_active_projects(&mut self, user: &User) -> ModelResult<Vec<Project>> {
        self.run(|conn| user.get_active_projects(conn))
    }

    pub fn get_archived_projects(&mut self, user: &User) -> ModelResult<Vec<Project>> {
        self.run(|conn| user.get_archived_projects(conn))
    }

    /// See [`User::get_inbox`]
    pub fn get_inbox(&mut self, user: &User) -> ModelResult<Project> {
        self.run(|conn| user.get_inbox(conn))
    }

    pub fn count_projects(&mut self, user: &User) -> ModelResult<i64> {
        self.run(|conn| user.count_projects(conn))
    }

    // -- Projects --

    pub fn create_project(&mut self, data: CreateProject) -> ModelResult<Project> {
        self.run(|conn| Project::create(conn, data))
    }

    pub fn find_project(&mut self, id: i64) -> ModelResult<Option<Project>> {
        self.run(|conn| Project::find_by_id(conn, id))
    }

    pub fn find_project_by_name(&mut self, name: &str) -> ModelResult<Option<Project>> {
        self.run(|conn| Project::find_by_name(conn, name))
    }

    pub fn set_project_archived(&mut self, id: i64, archived: bool) -> ModelResult<Option<Project>> {
        self.run(|conn| Project::set_archived(conn, id, archived))
    }

    pub fn set_project_inbox(&mut self, id: i64, inbox: bool) -> ModelResult<Option<Project>> {
        self.run(|conn| Project::set_inbox(conn, id, inbox))
    }

    pub fn delete_project(&mut self, id: i64) -> ModelResult<bool> {
        self.run(|conn| Project::delete(conn, id))
    }

    pub fn project_owner(&mut self, project: &Project) -> ModelResult<User> {
        self.run(|conn| project.owner(conn))
    }

    pub fn get_tasks(&mut self, project: &Project) -> ModelResult<Vec<Task>> {
        self.run(|conn| project.get_tasks(conn))
    }

    pub fn get_completed_tasks(&mut self, project: &Project) -> ModelResult<Vec<Task>> {
        self.run(|conn| project.get_completed_tasks(conn))
    }

    pub fn get_unfinished_tasks(&mut self, project: &Project) -> ModelResult<Vec<Task>> {
        self.run(|conn| project.get_unfinished_tasks(conn))
    }

    pub fn count_tasks(&mut self, project: &Project) -> ModelResult<i64> {
        self.run(|conn| project.count_tasks(conn))
    }

    // -- Tasks --

    pub fn create_task(&mut self, data: CreateTask) -> ModelResult<Task> {
        self.run(|conn| Task::create(conn, data))
    }

    pub fn find_task(&mut self, id: i64) -> ModelResult<Option<Task>> {
        self.run(|conn| Task::find_by_id(conn, id))
    }

    pub fn find_task_by_name(&mut self, name: &str) -> ModelResult<Option<Task>> {
        self.run(|conn| Task::find_by_name(conn, name))
    }

    pub fn complete_task(&mut self, id: i64) -> ModelResult<Option<Task>> {
        self.run(|conn| Task::complete(conn, id))
    }

    pub fn reopen_task(&mut self, id: i64) -> ModelResult<Option<Task>> {
        self.run(|conn| Task::reopen(conn, id))
    }

    pub fn delete_task(&mut self, id: i64) -> ModelResult<bool> {
        self.run(|conn| Task::delete(conn, id))
    }

    pub fn task_author(&mut self, task: &Task) -> ModelResult<User> {
        self.run(|conn| task.author(conn))
    }

    pub fn task_project(&mut self, task: &Task) -> ModelResult<Project> {
        self.run(|conn| task.project(conn))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // The pool hands the connection back on a spawned task, which needs
        // the runtime context.
        if let Some(inner) = self.inner.take() {
            let _guard = self.runtime.enter();
            drop(inner);
        }
    }
}
