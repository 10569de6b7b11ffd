use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use pylearn_core::model::{NotificationSettings, NotificationSettingsDraft};
use pylearn_core::time::{fixed_clock, fixed_now};
use pylearn_core::{Catalog, Clock};
use services::{ReminderService, ReminderServiceError};
use storage::repository::InMemoryRepository;

fn service(clock: Clock) -> ReminderService {
    ReminderService::new(
        clock,
        Arc::new(Catalog::python_course()),
        Arc::new(InMemoryRepository::new()),
    )
}

#[tokio::test]
async fn defaults_until_saved() {
    let svc = service(fixed_clock());
    assert_eq!(svc.load().await.unwrap(), NotificationSettings::default());

    let saved = svc
        .save(NotificationSettingsDraft {
            enabled: true,
            hour: 19,
            minute: 30,
        })
        .await
        .unwrap();
    assert_eq!(svc.load().await.unwrap(), saved);
    assert_eq!(saved.hour(), 19);
}

#[tokio::test]
async fn invalid_draft_is_rejected_and_not_saved() {
    let svc = service(fixed_clock());
    let err = svc
        .save(NotificationSettingsDraft {
            enabled: true,
            hour: 9,
            minute: 75,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ReminderServiceError::Settings(_)));
    assert_eq!(svc.load().await.unwrap(), NotificationSettings::default());
}

#[tokio::test]
async fn next_reminder_follows_the_clock() {
    let settings = NotificationSettings::default();
    let nine_on = |day: u32| Utc.with_ymd_and_hms(2023, 11, day, 9, 0, 0).unwrap();

    // fixed_now() is 2023-11-14 22:13 UTC, past today's slot.
    let mut clock = fixed_clock();
    assert_eq!(clock.now(), fixed_now());
    assert_eq!(service(clock).next_reminder_in(&settings, &Utc), Some(nine_on(15)));

    clock.advance(Duration::hours(10));
    assert_eq!(service(clock).next_reminder_in(&settings, &Utc), Some(nine_on(15)));

    clock.advance(Duration::hours(1));
    assert_eq!(service(clock).next_reminder_in(&settings, &Utc), Some(nine_on(16)));

    let off = NotificationSettings::from_persisted(false, 9, 0).unwrap();
    assert_eq!(service(clock).next_reminder_in(&off, &Utc), None);
}

#[tokio::test]
async fn reminder_message_comes_from_catalog() {
    let svc = service(fixed_clock());
    let catalog = Catalog::python_course();
    let message = svc.reminder_message().expect("built-in messages");
    assert!(catalog.notification_messages().iter().any(|m| m == message));
}
