use async_trait::async_trait;
use pylearn_core::Catalog;
use pylearn_core::model::{
    DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE, NotificationSettings, ProgressRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonFileRepository;

/// Errors surfaced by storage adapters.
///
/// Adapters never retry; callers decide what to do with an unavailable store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

//
// ─── PROGRESS DOCUMENT ─────────────────────────────────────────────────────────
//

/// Persisted shape of a `ProgressRecord`.
///
/// Every field may be absent so documents written by older versions still
/// load; `into_record` fills the gaps. Completion values are kept as raw JSON
/// so a stray non-boolean does not reject the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressDocument {
    #[serde(default)]
    pub current_week: Option<String>,
    #[serde(default)]
    pub current_day: Option<u32>,
    #[serde(default)]
    pub completed_days: Option<BTreeMap<String, serde_json::Value>>,
}

impl ProgressDocument {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            current_week: Some(record.current_week.clone()),
            current_day: Some(record.current_day),
            completed_days: Some(
                record
                    .completed_days
                    .iter()
                    .map(|(key, done)| (key.clone(), serde_json::Value::Bool(*done)))
                    .collect(),
            ),
        }
    }

    /// Convert into a domain record, defaulting missing fields.
    ///
    /// The cursor is not checked against the catalog; the catalog only supplies
    /// the first week when none was stored. Non-boolean completion values are
    /// dropped, which reads the same as "not completed". They are not kept in
    /// the record, so the next save removes them from the stored document.
    #[must_use]
    pub fn into_record(self, catalog: &Catalog) -> ProgressRecord {
        let mut record = ProgressRecord::new(
            self.current_week
                .unwrap_or_else(|| catalog.first_week().to_owned()),
            self.current_day.unwrap_or(1),
        );
        record.completed_days = self
            .completed_days
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| value.as_bool().map(|done| (key, done)))
            .collect();
        record
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for text that is not a progress document.
    pub fn from_json(text: &str) -> Result<Self, StorageError> {
        serde_json::from_str(text).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

//
// ─── NOTIFICATION SETTINGS DOCUMENT ────────────────────────────────────────────
//

/// Persisted shape of `NotificationSettings` for document stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettingsDocument {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
}

impl NotificationSettingsDocument {
    #[must_use]
    pub fn from_settings(settings: &NotificationSettings) -> Self {
        Self {
            enabled: Some(settings.enabled()),
            hour: Some(u32::from(settings.hour())),
            minute: Some(u32::from(settings.minute())),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored time is out of range.
    pub fn into_settings(self) -> Result<NotificationSettings, StorageError> {
        NotificationSettings::from_persisted(
            self.enabled.unwrap_or(true),
            self.hour.unwrap_or(u32::from(DEFAULT_REMINDER_HOUR)),
            self.minute.unwrap_or(u32::from(DEFAULT_REMINDER_MINUTE)),
        )
        .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Single-record store for the learner's progress document.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Read the stored document, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or the stored text is
    /// not a progress document.
    async fn get_progress(&self) -> Result<Option<ProgressDocument>, StorageError>;

    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError>;
}

#[async_trait]
pub trait NotificationSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read failures or out-of-range stored values.
    async fn get_settings(&self) -> Result<Option<NotificationSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be written.
    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), StorageError>;
}

//
// ─── IN MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<Option<ProgressDocument>>>,
    settings: Arc<Mutex<Option<NotificationSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(document.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationSettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<NotificationSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(*settings);
        Ok(())
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub notifications: Arc<dyn NotificationSettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let notifications: Arc<dyn NotificationSettingsRepository> = Arc::new(repo);
        Self {
            progress,
            notifications,
        }
    }

    /// JSON files inside `dir`. The directory is created on first write.
    #[must_use]
    pub fn json_dir(dir: impl Into<PathBuf>) -> Self {
        let repo = JsonFileRepository::new(dir);
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let notifications: Arc<dyn NotificationSettingsRepository> = Arc::new(repo);
        Self {
            progress,
            notifications,
        }
    }
}
