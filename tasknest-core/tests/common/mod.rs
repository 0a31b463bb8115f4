//! Common test utilities for integration tests
//!
//! Every test gets its own in-memory database, so tests run in parallel
//! without sharing rows.
//!
//! - Tracing setup (`RUST_LOG` respected, defaults to debug for this crate)
//! - Fresh migrated pools
//! - Insert helpers mirroring how callers build up users, projects and tasks

#![allow(dead_code)]

use sqlx::{SqliteConnection, SqlitePool};
use tasknest_core::db::{self, pool::DatabaseConfig};
use tasknest_core::models::{CreateProject, CreateTask, CreateUser, Project, Task, User};
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tasknest_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a migrated in-memory pool
pub async fn setup_pool() -> SqlitePool {
    init_tracing();
    db::connect(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create in-memory database")
}

pub async fn add_user(conn: &mut SqliteConnection, name: &str) -> User {
    User::create(conn, CreateUser::new(name))
        .await
        .expect("Failed to create user")
}

pub async fn add_project(conn: &mut SqliteConnection, data: CreateProject) -> Project {
    Project::create(conn, data)
        .await
        .expect("Failed to create project")
}

pub async fn add_task(
    conn: &mut SqliteConnection,
    name: &str,
    author: &User,
    project: &Project,
) -> Task {
    Task::create(
        conn,
        CreateTask::new(name, format!("{} task", name), author.id, project.id),
    )
    .await
    .expect("Failed to create task")
}

pub fn ids<T, F: Fn(&T) -> i64>(items: &[T], id: F) -> Vec<i64> {
    items.iter().map(id).collect()
}
