#![forbid(unsafe_code)]

pub mod json;
pub mod repository;
pub mod sqlite;

pub use json::JsonFileRepository;
pub use repository::{
    InMemoryRepository, NotificationSettingsRepository, ProgressDocument, ProgressRepository,
    Storage, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
