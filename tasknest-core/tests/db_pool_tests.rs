//! Integration tests for the database connection pool
//!
//! In-memory tests need nothing; file tests write into a temporary directory.
//! Run with: cargo test --test db_pool_tests

mod common;

use common::init_tracing;
use tasknest_core::db::pool::{close_pool, create_pool, get_pool_stats, health_check, DatabaseConfig};
use tempfile::TempDir;

fn file_database_url(dir: &TempDir, name: &str) -> String {
    format!("sqlite://{}", dir.path().join(name).display())
}

#[tokio::test]
async fn test_create_in_memory_pool() {
    init_tracing();

    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let stats = get_pool_stats(&pool);
    assert_eq!(stats.total_connections, 1, "In-memory pool keeps exactly one connection");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_file_pool_creates_database() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pool.db");

    let config = DatabaseConfig {
        url: file_database_url(&dir, "pool.db"),
        max_connections: 4,
        min_connections: 1,
        connect_timeout_seconds: 5,
        idle_timeout_seconds: Some(60),
        max_lifetime_seconds: Some(300),
        test_before_acquire: true,
    };

    let pool = create_pool(config).await.expect("Failed to create pool");
    assert!(path.exists(), "Database file should be created on connect");
    assert!(get_pool_stats(&pool).total_connections > 0);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_pool_with_unreachable_path() {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        url: file_database_url(&dir, "missing/parent/pool.db"),
        max_connections: 1,
        min_connections: 0,
        connect_timeout_seconds: 2,
        idle_timeout_seconds: None,
        max_lifetime_seconds: None,
        test_before_acquire: false,
    };

    let result = create_pool(config).await;
    assert!(result.is_err(), "Should fail when the parent directory doesn't exist");
}

#[tokio::test]
async fn test_health_check_success() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    assert!(health_check(&pool).await.is_ok(), "Health check should succeed");

    close_pool(pool).await;
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .expect("Failed to read pragma");
    assert_eq!(enabled, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_in_memory_pool_keeps_data_between_acquires() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    sqlx::query("CREATE TABLE scratch (value INTEGER NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO scratch (value) VALUES (42)")
        .execute(&pool)
        .await
        .unwrap();

    let (value,): (i64,) = sqlx::query_as("SELECT value FROM scratch")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(value, 42);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_pool_stats_track_checked_out_connections() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let conn = pool.acquire().await.unwrap();
    let stats = get_pool_stats(&pool);
    assert_eq!(stats.active_connections, 1);
    assert_eq!(stats.idle_connections, 0);
    drop(conn);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_close_pool() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    close_pool(pool.clone()).await;
    assert!(pool.is_closed());
}
