//! Error types for the TaskNest model layer
//!
//! Every fallible operation in this crate returns [`ModelResult`]. Driver
//! failures (constraint violations, connection loss) are passed through as
//! [`ModelError::Database`] without translation.
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::error::ModelError;
//! use tasknest_core::models::user::User;
//! use tasknest_core::db::session::Session;
//!
//! # async fn example(session: &mut Session, user: User) {
//! match user.get_inbox(session).await {
//!     Ok(inbox) => println!("Inbox: {}", inbox.name),
//!     Err(ModelError::NoProjects { user_id }) => println!("User {} has no projects", user_id),
//!     Err(e) => eprintln!("Lookup failed: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// Result alias used throughout the crate
pub type ModelResult<T> = Result<T, ModelError>;

/// Model layer errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// An inbox was requested for a user that owns no projects
    #[error("user {user_id} doesn't have any projects, could not find an inbox")]
    NoProjects { user_id: i64 },

    /// A foreign key pointed at a row that does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Input rejected before reaching the database
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Anything raised by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The blocking facade could not start its runtime
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// The session was already committed or rolled back
    #[error("Session already finished")]
    SessionFinished,
}

impl ModelError {
    /// Returns true if this is the "user owns no projects" condition
    pub fn is_no_projects(&self) -> bool {
        matches!(self, ModelError::NoProjects { .. })
    }

    /// Returns true if a referenced row was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound { .. })
    }
}
