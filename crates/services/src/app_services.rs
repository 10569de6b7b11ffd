use std::path::PathBuf;
use std::sync::Arc;

use pylearn_core::{Catalog, Clock};
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::reminder_service::ReminderService;

/// Assembles app-facing services around one shared catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    reminders: Arc<ReminderService>,
}

impl AppServices {
    /// Wire services over an existing storage backend.
    #[must_use]
    pub fn from_storage(storage: &Storage, catalog: Arc<Catalog>, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&catalog),
            Arc::clone(&storage.progress),
        ));
        let reminders = Arc::new(ReminderService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&storage.notifications),
        ));

        Self {
            catalog,
            progress,
            reminders,
        }
    }

    /// Build services backed by `SQLite` storage and the built-in course.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(
            &storage,
            Arc::new(Catalog::python_course()),
            clock,
        ))
    }

    /// Build services backed by JSON files in `dir` and the built-in course.
    #[must_use]
    pub fn new_json(dir: impl Into<PathBuf>, clock: Clock) -> Self {
        Self::from_storage(
            &Storage::json_dir(dir),
            Arc::new(Catalog::python_course()),
            clock,
        )
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn reminders(&self) -> Arc<ReminderService> {
        Arc::clone(&self.reminders)
    }
}
