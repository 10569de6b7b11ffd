use pylearn_core::Catalog;
use pylearn_core::model::{NotificationSettings, ProgressRecord};
use storage::repository::{
    NotificationSettingsRepository, ProgressDocument, ProgressRepository, Storage, StorageError,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_starts_empty() {
    let repo = connect("memdb_empty").await;
    assert!(repo.get_progress().await.unwrap().is_none());
    assert!(repo.get_settings().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_roundtrip_overwrites_single_progress_row() {
    let repo = connect("memdb_progress").await;
    let catalog = Catalog::python_course();

    let mut record = ProgressRecord::new(catalog.first_week(), 1);
    record.mark_completed();
    repo.save_progress(&ProgressDocument::from_record(&record))
        .await
        .unwrap();

    record.current_day = 2;
    record.mark_completed();
    repo.save_progress(&ProgressDocument::from_record(&record))
        .await
        .unwrap();

    let loaded = repo
        .get_progress()
        .await
        .unwrap()
        .expect("stored")
        .into_record(&catalog);
    assert_eq!(loaded, record);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn sqlite_surfaces_corrupted_document() {
    let repo = connect("memdb_corrupt").await;
    sqlx::query("INSERT INTO progress (id, document, updated_at) VALUES (1, 'garbage', '')")
        .execute(repo.pool())
        .await
        .unwrap();

    let err = repo.get_progress().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn sqlite_roundtrip_notification_settings() {
    let repo = connect("memdb_settings").await;
    let settings = NotificationSettings::from_persisted(false, 21, 45).unwrap();
    repo.save_settings(&settings).await.unwrap();
    assert_eq!(repo.get_settings().await.unwrap(), Some(settings));

    let updated = NotificationSettings::default();
    repo.save_settings(&updated).await.unwrap();
    assert_eq!(repo.get_settings().await.unwrap(), Some(updated));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(versions, 1);
}

#[tokio::test]
async fn storage_sqlite_wires_both_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    let doc = ProgressDocument::from_record(&ProgressRecord::new("W", 3));
    storage.progress.save_progress(&doc).await.unwrap();
    assert_eq!(storage.progress.get_progress().await.unwrap(), Some(doc));
    assert!(storage.notifications.get_settings().await.unwrap().is_none());
}

#[tokio::test]
async fn storage_sqlite_creates_a_missing_database_file() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("fresh.db");
    assert!(!path.exists());

    let storage = Storage::sqlite(&format!("sqlite://{}", path.display()))
        .await
        .expect("storage");
    let doc = ProgressDocument::from_record(&ProgressRecord::new("W", 1));
    storage.progress.save_progress(&doc).await.unwrap();

    assert!(path.exists());
    assert_eq!(storage.progress.get_progress().await.unwrap(), Some(doc));
}
