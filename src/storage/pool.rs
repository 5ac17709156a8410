use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::{config::DatabaseConfig, error::Result};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

#[derive(Debug)]
struct ConnectionCustomizer {
    busy_timeout: Duration,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.busy_timeout(self.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }
}

/// Builds the shared connection pool. Fails if the database file cannot be
/// opened within the configured connection timeout. Missing parent
/// directories are created.
pub fn open_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let timeout = Duration::from_secs(config.connection_timeout_secs);
    debug!(
        "Opening pool for {} (size: {}, timeout: {}s)",
        config.path, config.pool_size, config.connection_timeout_secs
    );

    if let Some(parent) = Path::new(&config.path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(&config.path);
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(timeout)
        .connection_customizer(Box::new(ConnectionCustomizer {
            busy_timeout: timeout,
        }))
        .build(manager)?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_config(path: String) -> DatabaseConfig {
        DatabaseConfig {
            path,
            pool_size: 2,
            connection_timeout_secs: 1,
        }
    }

    #[test]
    fn test_open_pool_on_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("elig.db").to_string_lossy().into_owned();

        let pool = open_pool(&db_config(path)).unwrap();
        let conn = pool.get().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("elig.db");

        open_pool(&db_config(path.to_string_lossy().into_owned())).unwrap();
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_unreachable_store_is_pool_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let path = dir.path().to_string_lossy().into_owned();

        let err = open_pool(&db_config(path)).unwrap_err();
        assert!(err.is_data_access());
    }
}
