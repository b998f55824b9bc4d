//! Storage module for routine persistence and configuration.

pub mod config;
pub mod database;
pub mod kv;
pub mod notify;
pub mod routine_store;
pub mod schema;

pub use config::{AppConfig, ConfigError, HistorySettings, StorageSettings};
pub use database::SqliteStore;
pub use kv::{KeyValueStore, MemoryStore, StorageError};
pub use notify::{ChangeNotifier, Subscription, CHANGE_EVENT};
pub use routine_store::{
    RoutineStore, StoredPayload, BACKUP_KEY, DATA_VERSION, STORAGE_KEY, VERSION_KEY,
};
