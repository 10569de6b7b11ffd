use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::{LessonRecord, ProgressRecord};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A progress record points outside the catalog.
///
/// Loaded records are never clamped: a corrupted cursor surfaces here so the
/// caller can decide whether to reset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("unknown week: {0}")]
    UnknownWeek(String),

    #[error("day {day} is not declared in week {week}")]
    UnknownDay { week: String, day: u32 },
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Aggregated view of course progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Cursor logic over a borrowed catalog.
///
/// The cursor moves strictly forward: day by day inside a week, then to day 1
/// of the next declared week. The last day of the last week is terminal.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTracker<'a> {
    catalog: &'a Catalog,
}

impl<'a> ProgressTracker<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Fresh record: first declared week, day 1, nothing completed.
    #[must_use]
    pub fn default_record(&self) -> ProgressRecord {
        ProgressRecord::new(self.catalog.first_week(), 1)
    }

    /// Lesson under the cursor, if the cursor points at a declared day.
    #[must_use]
    pub fn current_lesson(&self, record: &ProgressRecord) -> Option<&'a LessonRecord> {
        self.catalog
            .lesson_at(&record.current_week, record.current_day)
    }

    /// Whether the cursor's lesson is marked done, which gates moving on.
    ///
    /// Only an explicit `true` counts.
    #[must_use]
    pub fn is_unlocked(&self, record: &ProgressRecord) -> bool {
        record.is_day_completed(&record.current_week, record.current_day)
    }

    /// Move the cursor one step forward.
    ///
    /// Returns `false` and leaves the record untouched at the terminal state.
    /// Completion is not consulted; gate with `is_unlocked` first if needed.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownWeek` if the record's week is not in the
    /// catalog.
    pub fn advance(&self, record: &mut ProgressRecord) -> Result<bool, TrackerError> {
        let max_day = self.max_day(record)?;

        if record.current_day < max_day {
            record.current_day += 1;
            return Ok(true);
        }

        let next = self
            .catalog
            .next_week(&record.current_week)
            .map_err(|_| TrackerError::UnknownWeek(record.current_week.clone()))?;

        match next {
            Some(next) => {
                record.current_week = next.to_owned();
                record.current_day = 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether `advance` would be a no-op.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownWeek` if the record's week is not in the
    /// catalog.
    pub fn is_finished(&self, record: &ProgressRecord) -> Result<bool, TrackerError> {
        let max_day = self.max_day(record)?;
        Ok(record.current_day >= max_day && record.current_week == self.catalog.last_week())
    }

    /// Confirm the cursor points at a declared lesson.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownWeek` or `TrackerError::UnknownDay`.
    pub fn check(&self, record: &ProgressRecord) -> Result<(), TrackerError> {
        let week = self
            .catalog
            .week(&record.current_week)
            .ok_or_else(|| TrackerError::UnknownWeek(record.current_week.clone()))?;
        if week.lesson(record.current_day).is_none() {
            return Err(TrackerError::UnknownDay {
                week: record.current_week.clone(),
                day: record.current_day,
            });
        }
        Ok(())
    }

    fn max_day(&self, record: &ProgressRecord) -> Result<u32, TrackerError> {
        self.catalog
            .max_day(&record.current_week)
            .map_err(|_| TrackerError::UnknownWeek(record.current_week.clone()))
    }

    /// Completion counts over declared lessons; stray keys are ignored.
    #[must_use]
    pub fn summary(&self, record: &ProgressRecord) -> ProgressSummary {
        let total = self.catalog.lesson_count();
        let completed = self
            .catalog
            .lessons()
            .filter(|(week, day, _)| record.is_day_completed(week, *day))
            .count();
        ProgressSummary {
            total,
            completed,
            remaining: total - completed,
            is_complete: completed == total,
        }
    }
}
