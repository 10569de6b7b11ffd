use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{ProgressDocument, ProgressRepository, StorageError};

use super::SqliteRepository;

/// The document is stored as opaque JSON text in a single row.
#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
        let row = sqlx::query("SELECT document FROM progress WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let text: String = row
            .try_get("document")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        ProgressDocument::from_json(&text).map(Some)
    }

    async fn save_progress(&self, document: &ProgressDocument) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (id, document, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at
            ",
        )
        .bind(1_i64)
        .bind(document.to_json()?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
