use async_trait::async_trait;
use pylearn_core::model::NotificationSettings;
use sqlx::Row;

use crate::repository::{NotificationSettingsRepository, StorageError};

use super::SqliteRepository;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn column_u32(row: &sqlx::sqlite::SqliteRow, column: &'static str) -> Result<u32, StorageError> {
    let value: i64 = row.try_get(column).map_err(ser)?;
    u32::try_from(value).map_err(|_| StorageError::Serialization(format!("{column} out of range")))
}

#[async_trait]
impl NotificationSettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<NotificationSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT enabled, hour, minute
            FROM notification_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let enabled: bool = row.try_get("enabled").map_err(ser)?;
        let hour = column_u32(&row, "hour")?;
        let minute = column_u32(&row, "minute")?;

        NotificationSettings::from_persisted(enabled, hour, minute)
            .map(Some)
            .map_err(ser)
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO notification_settings (id, enabled, hour, minute)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                enabled = excluded.enabled,
                hour = excluded.hour,
                minute = excluded.minute
            ",
        )
        .bind(1_i64)
        .bind(settings.enabled())
        .bind(i64::from(settings.hour()))
        .bind(i64::from(settings.minute()))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
