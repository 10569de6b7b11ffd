use std::fmt;

/// One day of the curriculum.
///
/// Lessons are declared once as part of a `Catalog` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRecord {
    pub title: String,
    pub theory: String,
    pub practice: String,
    pub tasks: String,
}

impl LessonRecord {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        theory: impl Into<String>,
        practice: impl Into<String>,
        tasks: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            theory: theory.into(),
            practice: practice.into(),
            tasks: tasks.into(),
        }
    }
}

/// Builds the completion key (`"<week>_<day>"`) used to index finished lessons.
#[must_use]
pub fn completion_key(week: &str, day: u32) -> String {
    format!("{week}_{day}")
}

/// Summary row for a declared week, in catalog order.
#[derive(Clone, PartialEq, Eq)]
pub struct WeekInfo {
    pub name: String,
    pub max_day: u32,
}

impl fmt::Debug for WeekInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeekInfo({:?}, max_day={})", self.name, self.max_day)
    }
}
