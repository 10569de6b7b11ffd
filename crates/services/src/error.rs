//! Shared error types for the services crate.

use thiserror::Error;

use pylearn_core::TrackerError;
use pylearn_core::model::NotificationSettingsError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("no lesson declared for {week} day {day}")]
    UnknownLesson { week: String, day: u32 },
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ReminderService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReminderServiceError {
    #[error(transparent)]
    Settings(#[from] NotificationSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
