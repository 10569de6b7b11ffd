use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};
use pylearn_core::model::{LessonRecord, NotificationSettings, ProgressRecord};
use pylearn_core::{Catalog, ProgressSummary};
use services::ProceedOutcome;

pub fn lesson(week: &str, day: u32, lesson: &LessonRecord, completed: bool) -> String {
    let mark = if completed { "[x]" } else { "[ ]" };
    let mut out = String::new();
    let _ = writeln!(out, "{mark} {week}, day {day}: {}", lesson.title);
    let _ = writeln!(out, "  Theory:   {}", lesson.theory);
    let _ = writeln!(out, "  Practice: {}", lesson.practice);
    let _ = writeln!(out, "  Tasks:    {}", lesson.tasks);
    out
}

pub fn summary(summary: &ProgressSummary) -> String {
    if summary.is_complete {
        format!("All {} lessons completed.", summary.total)
    } else {
        format!(
            "{} of {} lessons completed, {} to go.",
            summary.completed, summary.total, summary.remaining
        )
    }
}

pub fn status(
    record: &ProgressRecord,
    current: &LessonRecord,
    unlocked: bool,
    finished: bool,
    progress: &ProgressSummary,
) -> String {
    let mut out = lesson(
        &record.current_week,
        record.current_day,
        current,
        unlocked,
    );
    let next = match (unlocked, finished) {
        (true, true) => "This was the last lesson.",
        (true, false) => "Next lesson is unlocked.",
        (false, _) => "Finish this lesson to unlock the next one.",
    };
    let _ = writeln!(out, "{next}");
    let _ = writeln!(out, "{}", summary(progress));
    out
}

/// One line per week: `done/total` followed by per-day markers.
pub fn weeks(catalog: &Catalog, record: &ProgressRecord) -> String {
    let mut out = String::new();
    for info in catalog.weeks() {
        let Some(week) = catalog.week(&info.name) else {
            continue;
        };
        let mut done = 0;
        let mut marks = String::new();
        for (day, _) in week.days() {
            let mark = if record.is_current_day(&info.name, day) {
                '>'
            } else if record.is_day_completed(&info.name, day) {
                'x'
            } else {
                '.'
            };
            if record.is_day_completed(&info.name, day) {
                done += 1;
            }
            marks.push(mark);
        }
        let _ = writeln!(
            out,
            "{:>2}/{:<2} {marks:<7} {}",
            done,
            week.days().count(),
            info.name
        );
    }
    out
}

pub fn proceed(outcome: ProceedOutcome, record: &ProgressRecord) -> String {
    match outcome {
        ProceedOutcome::Locked => format!(
            "{}, day {} is not completed yet. Run `pylearn complete` first.",
            record.current_week, record.current_day
        ),
        ProceedOutcome::Advanced => format!(
            "Moved on to {}, day {}.",
            record.current_week, record.current_day
        ),
        ProceedOutcome::Finished => "That was the last lesson. Course finished!".to_owned(),
    }
}

pub fn reminder<Tz: TimeZone>(
    settings: &NotificationSettings,
    next: Option<&DateTime<Tz>>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let state = if settings.enabled() { "on" } else { "off" };
    let mut out = format!(
        "Daily reminder {state} at {:02}:{:02}.",
        settings.hour(),
        settings.minute()
    );
    if let Some(next) = next {
        let _ = write!(out, " Next: {}.", next.format("%Y-%m-%d %H:%M"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pylearn_core::catalog::Week;

    fn catalog() -> Catalog {
        let lesson = |t: &str| LessonRecord::new(t, "theory", "practice", "tasks");
        Catalog::new(vec![
            Week::new("A")
                .with_day(1, lesson("a1"))
                .with_day(2, lesson("a2"))
                .with_day(3, lesson("a3")),
            Week::new("B").with_day(1, lesson("b1")),
        ])
        .unwrap()
    }

    #[test]
    fn weeks_marks_cursor_and_completed_days() {
        let mut record = ProgressRecord::new("A", 2);
        record.set_completed("A", 1, true);

        let text = weeks(&catalog(), &record);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1/3"));
        assert!(lines[0].contains("x>."));
        assert!(lines[1].ends_with('B'));
    }

    #[test]
    fn status_reports_lock_state() {
        let catalog = catalog();
        let record = ProgressRecord::new("A", 1);
        let progress = ProgressSummary {
            total: 4,
            completed: 0,
            remaining: 4,
            is_complete: false,
        };

        let text = status(&record, catalog.lesson_at("A", 1).unwrap(), false, false, &progress);
        assert!(text.starts_with("[ ] A, day 1: a1"));
        assert!(text.contains("Finish this lesson"));
        assert!(text.ends_with("0 of 4 lessons completed, 4 to go.\n"));

        let last = ProgressRecord::new("B", 1);
        let text = status(&last, catalog.lesson_at("B", 1).unwrap(), true, true, &progress);
        assert!(text.starts_with("[x] B, day 1: b1"));
        assert!(text.contains("This was the last lesson."));
    }

    #[test]
    fn reminder_shows_time_and_next_trigger() {
        let settings = NotificationSettings::default();
        let next = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        assert_eq!(
            reminder(&settings, Some(&next)),
            "Daily reminder on at 09:00. Next: 2026-03-02 09:00."
        );
    }
}
