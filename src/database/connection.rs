use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use crate::config::{StoreLocation, StoreSettings};

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(settings: &StoreSettings) -> Result<DbPool> {
    match settings.location() {
        StoreLocation::File(path) => {
            ensure_parent_dir(&path)?;
            let manager = build_manager(SqliteConnectionManager::file(&path), settings.busy_timeout_ms);
            build_pool(manager, settings.max_connections, settings.connect_timeout_secs)
        }
        // Every SQLite connection to :memory: is its own database, so the pool holds exactly one.
        StoreLocation::Memory => {
            let manager = build_manager(SqliteConnectionManager::memory(), settings.busy_timeout_ms);
            build_pool(manager, 1, settings.connect_timeout_secs)
        }
    }
}

pub fn create_memory_pool() -> Result<DbPool> {
    create_pool(&StoreSettings::default())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {}", parent.display())),
        _ => Ok(()),
    }
}

fn build_manager(manager: SqliteConnectionManager, busy_timeout_ms: u64) -> SqliteConnectionManager {
    manager.with_init(move |conn| {
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    })
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32, timeout_secs: u64) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(timeout_secs))
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
