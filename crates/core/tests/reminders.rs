//! Reminder sweeps

mod support;

use std::sync::Arc;

use chrono::{Duration, NaiveTime};
use skoo_core::testing::InMemoryStore;
use skoo_core::{FixedClock, ReminderService};
use skoo_domain::{NotificationKind, RevisionSession, SessionStatus, SkooError};
use uuid::Uuid;

fn planned_at(user_id: Uuid, start: NaiveTime, status: SessionStatus) -> RevisionSession {
    RevisionSession {
        id: Uuid::new_v4(),
        user_id,
        subject_id: Uuid::new_v4(),
        subject_name: Some("Histoire".into()),
        date: support::fixed_now().date_naive(),
        start_time: start,
        end_time: start + Duration::hours(1),
        notes: None,
        status,
    }
}

#[tokio::test]
async fn session_reminders_cover_the_fifteen_minute_window_once() {
    let user = Uuid::new_v4();
    let store = InMemoryStore::new();
    // now is 08:00; the window is [08:15, 08:16)
    store.add_session(planned_at(user, NaiveTime::from_hms_opt(8, 15, 0).unwrap(), SessionStatus::Planned));
    store.add_session(planned_at(user, NaiveTime::from_hms_opt(8, 16, 0).unwrap(), SessionStatus::Planned));
    store.add_session(planned_at(user, NaiveTime::from_hms_opt(8, 15, 30).unwrap(), SessionStatus::Skipped));

    let clock = Arc::new(FixedClock::new(support::fixed_now()));
    let service = ReminderService::new(Arc::new(store.clone()), clock);

    let first = service.send_session_reminders().await.unwrap();
    assert_eq!(first.sessions_checked, 1);
    assert_eq!(first.reminders_sent, 1);

    let notifications = store.notifications();
    assert_eq!(notifications[0].kind, NotificationKind::SessionReminder);
    assert_eq!(notifications[0].title, "Session dans 15 minutes");
    assert_eq!(notifications[0].message, "Ta session de Histoire commence bientôt !");
    assert_eq!(notifications[0].link, "/app");

    let second = service.send_session_reminders().await.unwrap();
    assert_eq!(second.sessions_checked, 1);
    assert_eq!(second.reminders_sent, 0);
    assert_eq!(store.notifications().len(), 1);
}

#[tokio::test]
async fn exam_reminders_fire_on_countdown_days_only() {
    let user = Uuid::new_v4();
    let store = InMemoryStore::new();
    let today = support::fixed_now().date_naive();
    store.add_subject_with_exam(user, "Maths", Some(today + Duration::days(1)), Some("Partiel"));
    store.add_subject_with_exam(user, "Anglais", Some(today + Duration::days(3)), None);
    store.add_subject_with_exam(user, "Chimie", Some(today + Duration::days(7)), Some("Contrôle continu"));
    store.add_subject_with_exam(user, "Droit", Some(today + Duration::days(5)), None);

    let clock = Arc::new(FixedClock::new(support::fixed_now()));
    let service = ReminderService::new(Arc::new(store.clone()), clock);

    let report = service.send_exam_reminders().await.unwrap();
    assert_eq!(report.notifications_sent, 3);

    let messages: Vec<String> = store.notifications().into_iter().map(|n| n.message).collect();
    assert!(messages.contains(&"Maths (Partiel) est demain. Courage !".to_string()));
    assert!(messages.contains(&"Anglais est dans 3 jours. Courage !".to_string()));
    assert!(messages.contains(&"Chimie (CC) est dans 7 jours. Courage !".to_string()));

    let again = service.send_exam_reminders().await.unwrap();
    assert_eq!(again.notifications_sent, 0);
}

#[tokio::test]
async fn failed_exam_inserts_are_not_counted() {
    let store = InMemoryStore::new();
    let today = support::fixed_now().date_naive();
    store.add_subject_with_exam(Uuid::new_v4(), "Maths", Some(today + Duration::days(1)), None);
    store.fail_writes();

    let clock = Arc::new(FixedClock::new(support::fixed_now()));
    let report = ReminderService::new(Arc::new(store.clone()), clock)
        .send_exam_reminders()
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.notifications_sent, 0);
}

#[tokio::test]
async fn unreachable_store_fails_the_session_sweep() {
    let store = InMemoryStore::new();
    store.add_session(planned_at(Uuid::new_v4(), NaiveTime::from_hms_opt(8, 15, 0).unwrap(), SessionStatus::Planned));
    store.go_offline();

    let clock = Arc::new(FixedClock::new(support::fixed_now()));
    let err = ReminderService::new(Arc::new(store.clone()), clock)
        .send_session_reminders()
        .await
        .unwrap_err();

    assert_eq!(err, SkooError::Database("connection closed".into()));
    assert!(store.notifications().is_empty());
}
