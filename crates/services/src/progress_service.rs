use std::sync::Arc;

use pylearn_core::model::{LessonRecord, ProgressRecord};
use pylearn_core::{Catalog, ProgressSummary, ProgressTracker};
use storage::repository::{ProgressDocument, ProgressRepository};

use crate::error::ProgressServiceError;

//
// ─── PROCEED RESULT ────────────────────────────────────────────────────────────
//

/// What happened when the learner asked to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceedOutcome {
    /// The current lesson is not completed; nothing changed.
    Locked,
    /// The cursor moved and the record was saved.
    Advanced,
    /// The cursor is on the last lesson of the course; nothing changed.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProceedResult {
    pub record: ProgressRecord,
    pub outcome: ProceedOutcome,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Loads, mutates and persists the learner's progress against a shared catalog.
///
/// The pure operations (`is_unlocked`, `advance`) never touch storage; the
/// async helpers run a full load → mutate → save cycle. Callers sharing one
/// store across tasks must serialize those cycles themselves.
#[derive(Clone)]
pub struct ProgressService {
    catalog: Arc<Catalog>,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { catalog, repo }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn tracker(&self) -> ProgressTracker<'_> {
        ProgressTracker::new(&self.catalog)
    }

    /// Load the stored record, or the default one when nothing was saved yet.
    ///
    /// The record is returned as stored; it is not checked against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store is unavailable or
    /// holds an unreadable document.
    pub async fn load(&self) -> Result<ProgressRecord, ProgressServiceError> {
        match self.repo.get_progress().await? {
            Some(document) => Ok(document.into_record(&self.catalog)),
            None => {
                tracing::debug!("no stored progress, starting from the first lesson");
                Ok(self.tracker().default_record())
            }
        }
    }

    /// Load the stored record and confirm its cursor is a declared lesson.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Tracker` if the stored week or day is not
    /// in the catalog, or `ProgressServiceError::Storage` on read failures.
    pub async fn load_checked(&self) -> Result<ProgressRecord, ProgressServiceError> {
        let record = self.load().await?;
        if let Err(err) = self.tracker().check(&record) {
            tracing::warn!(
                week = %record.current_week,
                day = record.current_day,
                "stored cursor is not in the course"
            );
            return Err(err.into());
        }
        Ok(record)
    }

    /// Overwrite the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn save(&self, record: &ProgressRecord) -> Result<(), ProgressServiceError> {
        self.repo
            .save_progress(&ProgressDocument::from_record(record))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn is_unlocked(&self, record: &ProgressRecord) -> bool {
        self.tracker().is_unlocked(record)
    }

    /// Move the cursor in memory; see `ProgressTracker::advance`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Tracker` if the record's week is unknown.
    pub fn advance(&self, record: &mut ProgressRecord) -> Result<bool, ProgressServiceError> {
        Ok(self.tracker().advance(record)?)
    }

    /// Whether the cursor sits on the last lesson of the course.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Tracker` if the record's week is unknown.
    pub fn is_finished(&self, record: &ProgressRecord) -> Result<bool, ProgressServiceError> {
        Ok(self.tracker().is_finished(record)?)
    }

    #[must_use]
    pub fn current_lesson(&self, record: &ProgressRecord) -> Option<&LessonRecord> {
        self.catalog
            .lesson_at(&record.current_week, record.current_day)
    }

    #[must_use]
    pub fn summary(&self, record: &ProgressRecord) -> ProgressSummary {
        self.tracker().summary(record)
    }

    #[must_use]
    pub fn motivational_quote(&self) -> Option<&str> {
        self.catalog.random_motivational_quote()
    }

    /// Mark the cursor's lesson as completed and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Tracker` if the stored cursor is not a
    /// declared lesson (nothing is written), or `ProgressServiceError::Storage`
    /// on load or save failures.
    pub async fn complete_current(&self) -> Result<ProgressRecord, ProgressServiceError> {
        let mut record = self.load_checked().await?;
        record.mark_completed();
        self.save(&record).await?;
        tracing::info!(
            week = %record.current_week,
            day = record.current_day,
            "lesson completed"
        );
        Ok(record)
    }

    /// Flip the completion flag of a declared lesson and persist.
    ///
    /// Returns the updated record and the new flag.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::UnknownLesson` if `(week, day)` is not in
    /// the catalog, or `ProgressServiceError::Storage` on load/save failures.
    pub async fn toggle_day(
        &self,
        week: &str,
        day: u32,
    ) -> Result<(ProgressRecord, bool), ProgressServiceError> {
        if self.catalog.lesson_at(week, day).is_none() {
            return Err(ProgressServiceError::UnknownLesson {
                week: week.to_owned(),
                day,
            });
        }

        let mut record = self.load().await?;
        let completed = record.toggle_day(week, day);
        self.save(&record).await?;
        tracing::info!(week, day, completed, "lesson completion toggled");
        Ok((record, completed))
    }

    /// Advance past the current lesson if it is completed, then persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Tracker` if the stored week is not in the
    /// catalog, or `ProgressServiceError::Storage` on load/save failures.
    pub async fn proceed(&self) -> Result<ProceedResult, ProgressServiceError> {
        let mut record = self.load().await?;

        if !self.is_unlocked(&record) {
            tracing::warn!(
                week = %record.current_week,
                day = record.current_day,
                "current lesson not completed, staying put"
            );
            return Ok(ProceedResult {
                record,
                outcome: ProceedOutcome::Locked,
            });
        }

        if !self.advance(&mut record)? {
            return Ok(ProceedResult {
                record,
                outcome: ProceedOutcome::Finished,
            });
        }

        self.save(&record).await?;
        tracing::info!(
            week = %record.current_week,
            day = record.current_day,
            "moved to next lesson"
        );
        Ok(ProceedResult {
            record,
            outcome: ProceedOutcome::Advanced,
        })
    }

    /// Replace stored progress with the default record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn reset(&self) -> Result<ProgressRecord, ProgressServiceError> {
        let record = self.tracker().default_record();
        self.save(&record).await?;
        tracing::info!("progress reset");
        Ok(record)
    }
}
