//! Database models for TaskNest
//!
//! This module contains the three persisted entities, their CRUD operations,
//! and the accessors that walk the relationships between them.
//!
//! # Models
//!
//! - `user`: Accounts; owner side of projects, inbox resolution
//! - `project`: Projects; owner back-reference, task listings
//! - `task`: Tasks; author and project back-references, completion
//! - `status`: Completion status shared by tasks and queries
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::db::{self, pool::DatabaseConfig, session::Session};
//! use tasknest_core::models::{CreateProject, CreateTask, CreateUser, Project, Task, User};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = db::connect(DatabaseConfig::in_memory()).await?;
//! let mut session = Session::begin(&pool).await?;
//!
//! let user = User::create(&mut session, CreateUser::new("Bob")).await?;
//! let project = Project::create(&mut session, CreateProject::new("Inbox", "Bob's inbox", user.id).inbox()).await?;
//! Task::create(&mut session, CreateTask::new("Buy milk", "2 litres", user.id, project.id)).await?;
//!
//! assert_eq!(project.get_unfinished_tasks(&mut session).await?.len(), 1);
//! session.commit().await?;
//! # Ok(())
//! # }
//! ```

pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use project::{CreateProject, Project};
pub use status::TaskStatus;
pub use task::{CreateTask, Task};
pub use user::{CreateUser, User};
