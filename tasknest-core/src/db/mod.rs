//! Database layer for TaskNest
//!
//! This module provides connection pooling, migrations, and sessions.
//!
//! # Modules
//!
//! - `pool`: SQLite connection pool management with health checks
//! - `migrations`: Embedded schema migrations
//! - `session`: Transaction-scoped sessions used by every model accessor
//! - Models are in the `models` module at crate root level
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::db::{self, pool::DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::connect(DatabaseConfig::in_memory()).await?;
//!     Ok(())
//! }
//! ```

pub mod migrations;
pub mod pool;
pub mod session;

use sqlx::SqlitePool;
use tracing::info;

use crate::error::ModelResult;
use pool::DatabaseConfig;

/// Opens a pool and brings the schema up to date
pub async fn connect(config: DatabaseConfig) -> ModelResult<SqlitePool> {
    let pool = pool::create_pool(config).await?;
    migrations::run_migrations(&pool).await?;

    info!("Database ready");
    Ok(pool)
}
