//! SQLite-backed key-value store.

use crate::storage::kv::{KeyValueStore, StorageError};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use std::sync::Mutex;

/// Key-value store persisted in a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| StorageError::OpenFailed(e.to_string()))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::OpenFailed(e.to_string()))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        Ok(store)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), StorageError> {
        let conn = self.connection();

        conn.execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StorageError::InitializationFailed(e.to_string()))?;

        let current_version = Self::schema_version(&conn)?;
        if current_version < CURRENT_VERSION {
            Self::migrate(&conn, current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn schema_version(conn: &Connection) -> Result<i32, StorageError> {
        let result: SqliteResult<i32> = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(StorageError::InitializationFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(conn: &Connection, from_version: i32) -> Result<(), StorageError> {
        if from_version < 1 {
            conn.execute_batch(SCHEMA)
                .map_err(|e| StorageError::InitializationFailed(e.to_string()))?;

            conn.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                [CURRENT_VERSION],
            )
            .map_err(|e| StorageError::InitializationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.connection()
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.connection()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}
