//! Configuration management
//!
//! This module loads configuration from environment variables (and a `.env`
//! file when present) into a type-safe configuration struct.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: sqlite::memory:)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10, forced to 1 in memory)
//! - `DATABASE_CONNECT_TIMEOUT`: Acquire timeout in seconds (default: 30)
//! - `RUST_LOG`: Log filter, read by whichever subscriber the caller installs
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::config::Config;
//! use tasknest_core::db;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = db::connect(config.database).await?;
//! # Ok(())
//! # }
//! ```

use std::env;

use crate::db::pool::{is_in_memory_url, DatabaseConfig, IN_MEMORY_URL};

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable doesn't parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("DATABASE_URL").ok(),
            env::var("DATABASE_MAX_CONNECTIONS").ok(),
            env::var("DATABASE_CONNECT_TIMEOUT").ok(),
        )
    }

    fn from_vars(
        url: Option<String>,
        max_connections: Option<String>,
        connect_timeout: Option<String>,
    ) -> anyhow::Result<Self> {
        let url = url.unwrap_or_else(|| IN_MEMORY_URL.to_string());

        let max_connections = max_connections
            .as_deref()
            .unwrap_or("10")
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is invalid: {}", e))?;

        // An in-memory database lives on a single connection
        let mut database = if is_in_memory_url(&url) {
            DatabaseConfig {
                url,
                ..DatabaseConfig::in_memory()
            }
        } else {
            DatabaseConfig {
                url,
                max_connections,
                ..Default::default()
            }
        };

        if let Some(timeout) = connect_timeout {
            database.connect_timeout_seconds = timeout
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("DATABASE_CONNECT_TIMEOUT is invalid: {}", e))?;
        }

        Ok(Self { database })
    }
}
