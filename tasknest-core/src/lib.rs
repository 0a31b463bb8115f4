//! # TaskNest Core Library
//!
//! The task-tracking data model: users own projects, projects contain tasks,
//! and one project per user acts as their inbox.
//!
//! ## Module Organization
//!
//! - `models`: Users, projects, tasks and the accessors between them
//! - `db`: Connection pool, embedded migrations, transaction-scoped sessions
//! - `blocking`: Synchronous facade over the async model layer
//! - `config`: Configuration from the environment
//! - `error`: The crate error type
//!
//! Logging goes through `tracing`; installing a subscriber is left to the
//! application.

pub mod blocking;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{ModelError, ModelResult};

/// Current version of the TaskNest core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
