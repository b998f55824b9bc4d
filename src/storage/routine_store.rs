//! Durable load/save of the routine collection.
//!
//! The collection is written as a versioned JSON envelope to a primary slot
//! and mirrored to a backup slot on every save. Neither `save` nor `load`
//! report errors to the caller: failures are logged and the call degrades
//! (save leaves storage behind memory, load falls back to the backup or to
//! an empty collection).

use crate::routines::Routine;
use crate::storage::kv::{KeyValueStore, StorageError};
use crate::storage::notify::{ChangeNotifier, Subscription};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Primary slot holding the current envelope.
pub const STORAGE_KEY: &str = "training-routines";
/// Backup slot, rewritten after every successful primary write.
pub const BACKUP_KEY: &str = "training-routines-backup";
/// Reserved for data migrations; nothing reads or writes it yet.
pub const VERSION_KEY: &str = "training-data-version";
/// Envelope format version.
pub const DATA_VERSION: &str = "1.0";

/// Persistence envelope written to the primary and backup slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPayload {
    /// Envelope format version
    pub version: String,
    /// Time of the save
    pub timestamp: DateTime<Utc>,
    /// The full collection
    pub routines: Vec<Routine>,
    /// Marker carried by every envelope
    pub backup: bool,
    /// Set only on the copy in the backup slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_timestamp: Option<DateTime<Utc>>,
}

impl StoredPayload {
    /// Wrap `routines` in a primary envelope stamped with the current time.
    pub fn new(routines: &[Routine]) -> Self {
        Self {
            version: DATA_VERSION.to_string(),
            timestamp: Utc::now(),
            routines: routines.to_vec(),
            backup: true,
            backup_timestamp: None,
        }
    }

    /// Copy of this envelope for the backup slot.
    pub fn to_backup(&self) -> Self {
        Self {
            backup_timestamp: Some(Utc::now()),
            ..self.clone()
        }
    }
}

/// Load/save front end over a [`KeyValueStore`].
///
/// Clones share the backend and the change notifier, so every repository
/// built from clones of one store sees the others' saves.
#[derive(Clone)]
pub struct RoutineStore {
    backend: Arc<dyn KeyValueStore>,
    notifier: ChangeNotifier,
}

impl RoutineStore {
    /// Create a store over the given backend with a fresh notifier.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            notifier: ChangeNotifier::new(),
        }
    }

    /// The underlying key-value backend.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Notifier fired after every successful save.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Register a callback for collection changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Routine]) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Remove a change callback.
    pub fn unsubscribe(&self, token: Subscription) -> bool {
        self.notifier.unsubscribe(token)
    }

    /// Persist the full collection.
    ///
    /// On a failed primary write the slot is cleared and the write retried
    /// once. If that also fails the save is dropped: nothing is written to
    /// the backup and no notification is sent.
    pub fn save(&self, routines: &[Routine]) {
        let payload = StoredPayload::new(routines);

        if let Err(e) = self.write_primary(&payload) {
            tracing::warn!("Failed to save routines, clearing primary slot and retrying: {}", e);

            if let Err(e) = self.retry_primary(&payload) {
                tracing::error!(
                    routines = routines.len(),
                    "Critical storage error, routines not saved: {}",
                    e
                );
                return;
            }
        }

        if let Err(e) = self.write_backup(&payload) {
            tracing::warn!("Failed to write routine backup: {}", e);
        }

        tracing::info!(routines = routines.len(), "Routines saved");
        self.notifier.notify(routines);
    }

    /// Read the collection back.
    ///
    /// An absent primary slot is an empty collection. An unreadable or
    /// unrecognized primary falls back to the backup slot. A bare JSON array
    /// in the primary slot is accepted as pre-versioning data.
    pub fn load(&self) -> Vec<Routine> {
        let stored = match self.backend.get(STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read routines: {}", e);
                return self.load_backup();
            }
        };

        match parse_primary(&stored) {
            Ok(routines) => {
                tracing::info!(routines = routines.len(), "Routines loaded");
                routines
            }
            Err(e) => {
                tracing::error!("Failed to load routines: {}", e);
                self.load_backup()
            }
        }
    }

    fn write_primary(&self, payload: &StoredPayload) -> Result<(), StorageError> {
        let json = serde_json::to_string(payload)?;
        self.backend.set(STORAGE_KEY, &json)
    }

    fn retry_primary(&self, payload: &StoredPayload) -> Result<(), StorageError> {
        self.backend.remove(STORAGE_KEY)?;
        self.write_primary(payload)
    }

    fn write_backup(&self, payload: &StoredPayload) -> Result<(), StorageError> {
        let json = serde_json::to_string(&payload.to_backup())?;
        self.backend.set(BACKUP_KEY, &json)
    }

    fn load_backup(&self) -> Vec<Routine> {
        match self.read_backup() {
            Ok(Some(routines)) => {
                tracing::warn!(routines = routines.len(), "Recovered routines from backup");
                routines
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to recover routine backup: {}", e);
                Vec::new()
            }
        }
    }

    fn read_backup(&self) -> Result<Option<Vec<Routine>>, StorageError> {
        let Some(stored) = self.backend.get(BACKUP_KEY)? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&stored)?;
        match value.get("routines") {
            Some(routines) if !routines.is_null() => {
                Ok(Some(serde_json::from_value(routines.clone())?))
            }
            _ => Ok(Some(Vec::new())),
        }
    }
}

impl std::fmt::Debug for RoutineStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutineStore")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

/// Decode the primary slot: versioned envelope or legacy bare array.
fn parse_primary(stored: &str) -> Result<Vec<Routine>, StorageError> {
    let value: Value = serde_json::from_str(stored)?;

    match value {
        Value::Object(mut map) if is_versioned(&map) => {
            let routines = map.remove("routines").unwrap_or(Value::Null);
            Ok(serde_json::from_value(routines)?)
        }
        Value::Array(_) => {
            tracing::warn!("Loading unversioned routine data");
            Ok(serde_json::from_value(value)?)
        }
        _ => Err(StorageError::SerializationError(
            "unrecognized routine payload".to_string(),
        )),
    }
}

/// An envelope needs a non-empty version and a non-null routines field.
fn is_versioned(map: &Map<String, Value>) -> bool {
    let has_version = match map.get("version") {
        Some(Value::String(v)) => !v.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    let has_routines = map.get("routines").is_some_and(|r| !r.is_null());

    has_version && has_routines
}
