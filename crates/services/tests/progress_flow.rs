use std::sync::Arc;

use async_trait::async_trait;
use pylearn_core::model::{LessonRecord, ProgressRecord};
use pylearn_core::{Catalog, TrackerError, Week};
use services::{AppServices, Clock, ProceedOutcome, ProgressService, ProgressServiceError};
use storage::repository::{
    InMemoryRepository, ProgressDocument, ProgressRepository, StorageError,
};

fn lesson(title: &str) -> LessonRecord {
    LessonRecord::new(title, "theory", "practice", "tasks")
}

/// Week A has days 1..=3, week B has days 1..=2.
fn small_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Week::new("A")
                .with_day(1, lesson("A1"))
                .with_day(2, lesson("A2"))
                .with_day(3, lesson("A3")),
            Week::new("B").with_day(1, lesson("B1")).with_day(2, lesson("B2")),
        ])
        .unwrap()
        .with_motivational_quotes(["keep going"]),
    )
}

fn service(repo: &InMemoryRepository) -> ProgressService {
    ProgressService::new(small_catalog(), Arc::new(repo.clone()))
}

async fn store(repo: &InMemoryRepository, record: &ProgressRecord) {
    repo.save_progress(&ProgressDocument::from_record(record))
        .await
        .unwrap();
}

struct UnavailableRepository;

#[async_trait]
impl ProgressRepository for UnavailableRepository {
    async fn get_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
        Err(StorageError::Io("disk unplugged".into()))
    }

    async fn save_progress(&self, _document: &ProgressDocument) -> Result<(), StorageError> {
        Err(StorageError::Io("disk full".into()))
    }
}

#[tokio::test]
async fn load_on_empty_storage_returns_default_record() {
    let repo = InMemoryRepository::new();
    let record = service(&repo).load().await.unwrap();
    assert_eq!(record, ProgressRecord::new("A", 1));
    assert!(repo.get_progress().await.unwrap().is_none(), "load must not save");
}

#[tokio::test]
async fn save_then_load_returns_same_record() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    let mut record = ProgressRecord::new("B", 2);
    record.set_completed("A", 3, true);
    svc.save(&record).await.unwrap();
    assert_eq!(svc.load().await.unwrap(), record);
}

#[tokio::test]
async fn advance_crosses_week_boundary_and_stops_at_the_end() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);

    let mut record = ProgressRecord::new("A", 3);
    assert!(svc.advance(&mut record).unwrap());
    assert_eq!(record, ProgressRecord::new("B", 1));

    let mut record = ProgressRecord::new("B", 2);
    assert!(!svc.advance(&mut record).unwrap());
    assert!(!svc.advance(&mut record).unwrap());
    assert_eq!(record, ProgressRecord::new("B", 2));
}

#[tokio::test]
async fn unlocked_tracks_the_cursor_key() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    let mut record = ProgressRecord::new("A", 3);
    record.completed_days.insert("A_3".into(), true);
    assert!(svc.is_unlocked(&record));
    record.current_day = 2;
    assert!(!svc.is_unlocked(&record));
}

#[tokio::test]
async fn proceed_is_locked_until_lesson_completed() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);

    let result = svc.proceed().await.unwrap();
    assert_eq!(result.outcome, ProceedOutcome::Locked);
    assert_eq!(result.record, ProgressRecord::new("A", 1));

    svc.complete_current().await.unwrap();
    let result = svc.proceed().await.unwrap();
    assert_eq!(result.outcome, ProceedOutcome::Advanced);
    assert_eq!(result.record.current_day, 2);
    assert!(result.record.is_day_completed("A", 1));

    // Persisted, so a fresh load sees the move.
    assert_eq!(svc.load().await.unwrap(), result.record);
}

#[tokio::test]
async fn proceed_reports_finished_on_last_lesson() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    let mut record = ProgressRecord::new("B", 2);
    record.mark_completed();
    store(&repo, &record).await;

    let result = svc.proceed().await.unwrap();
    assert_eq!(result.outcome, ProceedOutcome::Finished);
    assert_eq!(result.record, record);
}

#[tokio::test]
async fn walking_the_whole_course_completes_every_lesson() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);

    let mut steps = 0;
    loop {
        svc.complete_current().await.unwrap();
        let result = svc.proceed().await.unwrap();
        steps += 1;
        if result.outcome == ProceedOutcome::Finished {
            let summary = svc.summary(&result.record);
            assert!(summary.is_complete);
            assert_eq!(summary.completed, 5);
            break;
        }
        assert_eq!(result.outcome, ProceedOutcome::Advanced);
    }
    assert_eq!(steps, 5);
}

#[tokio::test]
async fn corrupted_week_surfaces_instead_of_clamping() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    let mut record = ProgressRecord::new("hand-edited", 1);
    record.mark_completed();
    store(&repo, &record).await;

    // Loading passes the record through untouched.
    assert_eq!(svc.load().await.unwrap(), record);
    assert!(svc.current_lesson(&record).is_none());

    let err = svc.proceed().await.unwrap_err();
    assert!(matches!(
        err,
        ProgressServiceError::Tracker(TrackerError::UnknownWeek(ref week)) if week == "hand-edited"
    ));
    assert_eq!(svc.load().await.unwrap(), record);
}

#[tokio::test]
async fn complete_current_refuses_corrupted_cursor() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    let record = ProgressRecord::new("hand-edited", 1);
    store(&repo, &record).await;
    let before = repo.get_progress().await.unwrap();

    let err = svc.complete_current().await.unwrap_err();
    assert!(matches!(
        err,
        ProgressServiceError::Tracker(TrackerError::UnknownWeek(ref week)) if week == "hand-edited"
    ));
    assert_eq!(repo.get_progress().await.unwrap(), before);

    store(&repo, &ProgressRecord::new("A", 7)).await;
    let err = svc.load_checked().await.unwrap_err();
    assert!(matches!(
        err,
        ProgressServiceError::Tracker(TrackerError::UnknownDay { day: 7, .. })
    ));
}

#[tokio::test]
async fn finished_only_on_the_last_lesson() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    assert!(!svc.is_finished(&ProgressRecord::new("A", 3)).unwrap());
    assert!(svc.is_finished(&ProgressRecord::new("B", 2)).unwrap());
    assert!(svc.is_finished(&ProgressRecord::new("nowhere", 1)).is_err());
}

#[tokio::test]
async fn toggle_day_flips_declared_lessons_only() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);

    let (record, completed) = svc.toggle_day("B", 1).await.unwrap();
    assert!(completed);
    assert!(record.is_day_completed("B", 1));

    let (record, completed) = svc.toggle_day("B", 1).await.unwrap();
    assert!(!completed);
    assert!(!record.is_day_completed("B", 1));

    let err = svc.toggle_day("B", 9).await.unwrap_err();
    assert!(matches!(err, ProgressServiceError::UnknownLesson { day: 9, .. }));
}

#[tokio::test]
async fn reset_restores_default_record() {
    let repo = InMemoryRepository::new();
    let svc = service(&repo);
    let mut record = ProgressRecord::new("B", 1);
    record.set_completed("A", 1, true);
    store(&repo, &record).await;

    let reset = svc.reset().await.unwrap();
    assert_eq!(reset, ProgressRecord::new("A", 1));
    assert_eq!(svc.load().await.unwrap(), reset);
}

#[tokio::test]
async fn storage_failures_propagate_verbatim() {
    let svc = ProgressService::new(small_catalog(), Arc::new(UnavailableRepository));

    let err = svc.load().await.unwrap_err();
    assert!(matches!(err, ProgressServiceError::Storage(StorageError::Io(ref msg)) if msg == "disk unplugged"));

    let err = svc.save(&ProgressRecord::new("A", 1)).await.unwrap_err();
    assert!(matches!(err, ProgressServiceError::Storage(StorageError::Io(ref msg)) if msg == "disk full"));
}

#[tokio::test]
async fn quote_comes_from_catalog() {
    let repo = InMemoryRepository::new();
    assert_eq!(service(&repo).motivational_quote(), Some("keep going"));
}

#[tokio::test]
async fn json_backed_services_persist_across_instances() {
    let dir = tempfile::tempdir().expect("temp dir should be created");

    let first = AppServices::new_json(dir.path(), Clock::system());
    let progress = first.progress();
    let record = progress.complete_current().await.unwrap();
    assert_eq!(record.current_week, "Неделя 1 — База Python");
    progress.proceed().await.unwrap();

    let second = AppServices::new_json(dir.path(), Clock::system());
    let loaded = second.progress().load().await.unwrap();
    assert_eq!(loaded.current_day, 2);
    assert!(loaded.is_day_completed("Неделя 1 — База Python", 1));
    assert_eq!(
        second
            .progress()
            .current_lesson(&loaded)
            .map(|l| l.title.as_str()),
        Some("День 2: Ввод и вывод данных")
    );
}
