use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::model::{LessonRecord, WeekInfo};

mod python_course;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must declare at least one week")]
    Empty,

    #[error("week declared twice: {0}")]
    DuplicateWeek(String),

    #[error("week declares no days: {0}")]
    EmptyWeek(String),

    #[error("day numbers start at 1 (week {0})")]
    InvalidDay(String),

    #[error("unknown week: {0}")]
    UnknownWeek(String),
}

//
// ─── WEEK ──────────────────────────────────────────────────────────────────────
//

/// A labelled bucket of lessons keyed by day number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    label: String,
    days: BTreeMap<u32, LessonRecord>,
}

impl Week {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            days: BTreeMap::new(),
        }
    }

    /// Declares `lesson` for `day`, replacing any earlier declaration.
    #[must_use]
    pub fn with_day(mut self, day: u32, lesson: LessonRecord) -> Self {
        self.days.insert(day, lesson);
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn lesson(&self, day: u32) -> Option<&LessonRecord> {
        self.days.get(&day)
    }

    /// Largest declared day, not the number of days.
    #[must_use]
    pub fn max_day(&self) -> Option<u32> {
        self.days.keys().next_back().copied()
    }

    /// Declared days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (u32, &LessonRecord)> {
        self.days.iter().map(|(day, lesson)| (*day, lesson))
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable curriculum: weeks in declaration order plus the quote and
/// reminder message pools.
///
/// Build one at startup and share it (`Arc<Catalog>`); nothing mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    weeks: Vec<Week>,
    motivational_quotes: Vec<String>,
    notification_messages: Vec<String>,
}

impl Catalog {
    /// Validate and assemble a catalog. Week order is kept as given.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if there are no weeks, a label repeats, a week has
    /// no days, or a day number is zero.
    pub fn new(weeks: Vec<Week>) -> Result<Self, CatalogError> {
        validate_weeks(&weeks)?;
        Ok(Self {
            weeks,
            motivational_quotes: Vec::new(),
            notification_messages: Vec::new(),
        })
    }

    /// The built-in Python course.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table is inconsistent; covered by tests.
    #[must_use]
    pub fn python_course() -> Self {
        python_course::build().expect("built-in course should be a valid catalog")
    }

    #[must_use]
    pub fn with_motivational_quotes<I, S>(mut self, quotes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.motivational_quotes = quotes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_notification_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notification_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Lesson declared for `(week, day)`.
    ///
    /// Unknown weeks and undeclared days are `None`, never an error, so callers
    /// can render "no lesson today" without special-casing.
    #[must_use]
    pub fn lesson_at(&self, week: &str, day: u32) -> Option<&LessonRecord> {
        self.week(week).and_then(|w| w.lesson(day))
    }

    /// Largest declared day for `week`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownWeek` if the label is not declared.
    pub fn max_day(&self, week: &str) -> Result<u32, CatalogError> {
        self.week(week)
            .and_then(Week::max_day)
            .ok_or_else(|| CatalogError::UnknownWeek(week.to_owned()))
    }

    /// Week labels in declaration order.
    pub fn week_order(&self) -> impl Iterator<Item = &str> {
        self.weeks.iter().map(Week::label)
    }

    #[must_use]
    pub fn first_week(&self) -> &str {
        // `new` rejects empty catalogs.
        self.weeks.first().map_or("", Week::label)
    }

    #[must_use]
    pub fn last_week(&self) -> &str {
        self.weeks.last().map_or("", Week::label)
    }

    #[must_use]
    pub fn week(&self, label: &str) -> Option<&Week> {
        self.weeks.iter().find(|w| w.label == label)
    }

    #[must_use]
    pub fn position(&self, week: &str) -> Option<usize> {
        self.weeks.iter().position(|w| w.label == week)
    }

    /// Week declared right after `week`, or `None` if it is the last one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownWeek` if the label is not declared.
    pub fn next_week(&self, week: &str) -> Result<Option<&str>, CatalogError> {
        let idx = self
            .position(week)
            .ok_or_else(|| CatalogError::UnknownWeek(week.to_owned()))?;
        Ok(self.weeks.get(idx + 1).map(Week::label))
    }

    /// One row per week, in declaration order.
    #[must_use]
    pub fn weeks(&self) -> Vec<WeekInfo> {
        self.weeks
            .iter()
            .map(|w| WeekInfo {
                name: w.label.clone(),
                max_day: w.max_day().unwrap_or(0),
            })
            .collect()
    }

    /// Every declared `(week, day)` in advancement order.
    pub fn lessons(&self) -> impl Iterator<Item = (&str, u32, &LessonRecord)> {
        self.weeks
            .iter()
            .flat_map(|w| w.days().map(move |(day, lesson)| (w.label(), day, lesson)))
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }

    #[must_use]
    pub fn motivational_quotes(&self) -> &[String] {
        &self.motivational_quotes
    }

    /// Reminder texts for whatever schedules notifications.
    #[must_use]
    pub fn notification_messages(&self) -> &[String] {
        &self.notification_messages
    }

    /// Uniform pick from the quote pool using the thread-local generator.
    ///
    /// `None` only when the catalog was built without quotes.
    #[must_use]
    pub fn random_motivational_quote(&self) -> Option<&str> {
        self.random_motivational_quote_with(&mut rand::rng())
    }

    pub fn random_motivational_quote_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.motivational_quotes.choose(rng).map(String::as_str)
    }

    pub fn random_notification_message_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<&str> {
        self.notification_messages.choose(rng).map(String::as_str)
    }
}

fn validate_weeks(weeks: &[Week]) -> Result<(), CatalogError> {
    if weeks.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(weeks.len());
    for week in weeks {
        if !seen.insert(week.label()) {
            return Err(CatalogError::DuplicateWeek(week.label.clone()));
        }
        if week.days.is_empty() {
            return Err(CatalogError::EmptyWeek(week.label.clone()));
        }
        if week.days.contains_key(&0) {
            return Err(CatalogError::InvalidDay(week.label.clone()));
        }
    }
    Ok(())
}
