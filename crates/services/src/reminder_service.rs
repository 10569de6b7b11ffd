use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use pylearn_core::model::{NotificationSettings, NotificationSettingsDraft};
use pylearn_core::{Catalog, Clock};
use storage::repository::NotificationSettingsRepository;

use crate::error::ReminderServiceError;

/// Daily reminder preferences plus the texts a dispatcher would show.
///
/// Scheduling the actual notification is left to the host platform.
#[derive(Clone)]
pub struct ReminderService {
    clock: Clock,
    catalog: Arc<Catalog>,
    repo: Arc<dyn NotificationSettingsRepository>,
}

impl ReminderService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<Catalog>,
        repo: Arc<dyn NotificationSettingsRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            repo,
        }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `ReminderServiceError::Storage` on storage failures.
    pub async fn load(&self) -> Result<NotificationSettings, ReminderServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `ReminderServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: NotificationSettingsDraft,
    ) -> Result<NotificationSettings, ReminderServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        tracing::info!(
            enabled = settings.enabled(),
            hour = settings.hour(),
            minute = settings.minute(),
            "reminder settings saved"
        );
        Ok(settings)
    }

    /// Next reminder on the local wall clock.
    #[must_use]
    pub fn next_reminder(&self, settings: &NotificationSettings) -> Option<DateTime<Local>> {
        settings.next_trigger(&self.clock.now_local())
    }

    #[must_use]
    pub fn next_reminder_in<Tz: TimeZone>(
        &self,
        settings: &NotificationSettings,
        tz: &Tz,
    ) -> Option<DateTime<Tz>> {
        settings.next_trigger(&self.clock.now().with_timezone(tz))
    }

    /// A random reminder text from the catalog.
    #[must_use]
    pub fn reminder_message(&self) -> Option<&str> {
        self.catalog
            .random_notification_message_with(&mut rand::rng())
    }
}
