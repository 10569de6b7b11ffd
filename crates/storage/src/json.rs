//! Plain JSON files in a data directory, one file per record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pylearn_core::model::NotificationSettings;

use crate::repository::{
    NotificationSettingsDocument, NotificationSettingsRepository, ProgressDocument,
    ProgressRepository, StorageError,
};

pub const PROGRESS_FILE: &str = "progress.json";
pub const NOTIFICATION_SETTINGS_FILE: &str = "notification_settings.json";

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn progress_path(&self) -> PathBuf {
        self.dir.join(PROGRESS_FILE)
    }

    #[must_use]
    pub fn notification_settings_path(&self) -> PathBuf {
        self.dir.join(NOTIFICATION_SETTINGS_FILE)
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            tracing::debug!(path = %path.display(), bytes = text.len(), "read document");
            Ok(Some(text))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no document stored yet");
            Ok(None)
        }
        Err(err) => Err(StorageError::Io(format!("{}: {err}", path.display()))),
    }
}

/// Write through a sibling temp file and rename over the target.
async fn write_replace(path: &Path, contents: String) -> Result<(), StorageError> {
    let io_err = |err: std::io::Error| StorageError::Io(format!("{}: {err}", path.display()));

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;

    tracing::debug!(path = %path.display(), "wrote document");
    Ok(())
}

#[async_trait]
impl ProgressRepository for JsonFileRepository {
    async fn get_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
        read_optional(&self.progress_path())
            .await?
            .map(|text| ProgressDocument::from_json(&text))
            .transpose()
    }

    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError> {
        write_replace(&self.progress_path(), document.to_json()?).await
    }
}

#[async_trait]
impl NotificationSettingsRepository for JsonFileRepository {
    async fn get_settings(&self) -> Result<Option<NotificationSettings>, StorageError> {
        let Some(text) = read_optional(&self.notification_settings_path()).await? else {
            return Ok(None);
        };
        let document: NotificationSettingsDocument = serde_json::from_str(&text)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        document.into_settings().map(Some)
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), StorageError> {
        let text = serde_json::to_string(&NotificationSettingsDocument::from_settings(settings))
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        write_replace(&self.notification_settings_path(), text).await
    }
}
