//! Transaction-scoped database sessions
//!
//! A [`Session`] owns one pooled connection with an open transaction. Every
//! model accessor takes `&mut SqliteConnection`, which a session dereferences
//! to, so the same call works against a session, a bare pool connection or a
//! caller-managed transaction.
//!
//! Dropping a session without calling [`Session::commit`] rolls it back.
//!
//! # Example
//!
//! ```no_run
//! use tasknest_core::db::session::Session;
//! use tasknest_core::models::user::{CreateUser, User};
//! use sqlx::SqlitePool;
//!
//! # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::begin(&pool).await?;
//! let user = User::create(&mut session, CreateUser::new("Bob")).await?;
//! let projects = user.get_projects(&mut session).await?;
//! session.commit().await?;
//! # Ok(())
//! # }
//! ```

use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool};
use sqlx::Transaction;
use std::ops::{Deref, DerefMut};
use tracing::debug;

use crate::error::ModelResult;

/// An open transaction on one pooled connection
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Acquires a connection from the pool and begins a transaction
    pub async fn begin(pool: &SqlitePool) -> ModelResult<Self> {
        let tx = pool.begin().await?;
        debug!("Session started");
        Ok(Self { tx })
    }

    /// Commits every change made through this session
    pub async fn commit(self) -> ModelResult<()> {
        self.tx.commit().await?;
        debug!("Session committed");
        Ok(())
    }

    /// Discards every change made through this session
    pub async fn rollback(self) -> ModelResult<()> {
        self.tx.rollback().await?;
        debug!("Session rolled back");
        Ok(())
    }
}

impl Deref for Session {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tx
    }
}
