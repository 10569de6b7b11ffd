use std::collections::BTreeMap;

use super::lesson::completion_key;

/// The learner's mutable progress: a cursor plus completion flags.
///
/// Records are owned by a single session. Nothing here persists itself; callers
/// save through a repository after mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub current_week: String,
    pub current_day: u32,
    pub completed_days: BTreeMap<String, bool>,
}

impl ProgressRecord {
    /// Creates a record with the cursor at `(week, day)` and no completions.
    #[must_use]
    pub fn new(week: impl Into<String>, day: u32) -> Self {
        Self {
            current_week: week.into(),
            current_day: day,
            completed_days: BTreeMap::new(),
        }
    }

    /// Completion key for the cursor.
    #[must_use]
    pub fn completion_key(&self) -> String {
        completion_key(&self.current_week, self.current_day)
    }

    #[must_use]
    pub fn is_day_completed(&self, week: &str, day: u32) -> bool {
        self.completed_days
            .get(&completion_key(week, day))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn is_current_day(&self, week: &str, day: u32) -> bool {
        self.current_week == week && self.current_day == day
    }

    /// Marks the cursor's lesson as completed.
    pub fn mark_completed(&mut self) {
        self.completed_days.insert(self.completion_key(), true);
    }

    pub fn set_completed(&mut self, week: &str, day: u32, completed: bool) {
        self.completed_days
            .insert(completion_key(week, day), completed);
    }

    /// Flips the completion flag for `(week, day)` and returns the new state.
    ///
    /// An absent key counts as not completed, so the first toggle sets it.
    pub fn toggle_day(&mut self, week: &str, day: u32) -> bool {
        let completed = !self.is_day_completed(week, day);
        self.set_completed(week, day, completed);
        completed
    }
}
