//! Integration tests for the session store and chat log
//!
//! These run against a real migrated SQLite file per test, so the
//! conditional updates and counters are exercised through the same
//! pool configuration the server uses.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use pretty_assertions::assert_eq;

use classlive::model::{Material, Role};
use classlive::store::{ChatLog, NewSession, SessionStore};

use common::TestDatabase;

fn sample_session(teacher_id: &str, org_id: &str) -> NewSession {
    NewSession {
        teacher_id: teacher_id.to_string(),
        org_id: org_id.to_string(),
        course_id: None,
        session_title: "Fractions Revision".to_string(),
        short_description: "Quick revision of unit fractions".to_string(),
        session_heading: "Mathematics - Class 6".to_string(),
        scheduled_date: Utc::now(),
        scheduled_time: "10:30 AM".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());

    let created = store.create(sample_session("t-1", "org-1")).await.unwrap();
    let fetched = store.get(&created.session_id).await.unwrap();

    assert_eq!(fetched.session_id, created.session_id);
    assert_eq!(fetched.teacher_id, "t-1");
    assert_eq!(fetched.org_id, "org-1");
    assert_eq!(fetched.session_title, "Fractions Revision");
    assert_eq!(fetched.scheduled_time, "10:30 AM");
    assert!(!fetched.is_active);
    assert!(fetched.started_at.is_none());
    assert_eq!(fetched.current_slide_index, 0);
    assert_eq!(fetched.understood_count, 0);
    assert!(fetched.participants.is_empty());
    assert!(fetched.materials.is_empty());
}

#[tokio::test]
async fn test_get_unknown_session_is_not_found() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());

    let err = store.get("no-such-session").await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(err.message(), "Session not found");
}

#[tokio::test]
async fn test_start_and_end_lifecycle() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    store.start(&session.session_id).await.unwrap();
    let active = store.get(&session.session_id).await.unwrap();
    assert!(active.is_active);
    assert!(active.started_at.is_some());
    assert!(active.ended_at.is_none());

    store.end(&session.session_id).await.unwrap();
    let ended = store.get(&session.session_id).await.unwrap();
    assert!(!ended.is_active);
    assert!(ended.ended_at.is_some());
}

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    store.start(&session.session_id).await.unwrap();
    let err = store.start(&session.session_id).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), "Session already active");
}

#[tokio::test]
async fn test_end_without_start_is_rejected() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    let err = store.end(&session.session_id).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), "Session not active");
}

#[tokio::test]
async fn test_start_unknown_session_is_not_found() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());

    let err = store.start("no-such-session").await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_participant_is_idempotent() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    let count = store
        .add_participant(&session.session_id, "s-1")
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Rejoining must not duplicate the entry
    let count = store
        .add_participant(&session.session_id, "s-1")
        .await
        .unwrap();
    assert_eq!(count, 1);

    let count = store
        .add_participant(&session.session_id, "s-2")
        .await
        .unwrap();
    assert_eq!(count, 2);

    let fetched = store.get(&session.session_id).await.unwrap();
    assert_eq!(fetched.participants, vec!["s-1", "s-2"]);
}

#[tokio::test]
async fn test_increment_understood_is_atomic_under_concurrency() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        let session_id = session.session_id.clone();
        handles.push(tokio::spawn(async move {
            store.increment_understood(&session_id).await.unwrap()
        }));
    }

    let mut counts = Vec::new();
    for handle in handles {
        counts.push(handle.await.unwrap());
    }
    counts.sort_unstable();

    // Every increment landed and each saw a distinct value
    assert_eq!(counts, (1..=10).collect::<Vec<i64>>());

    let fetched = store.get(&session.session_id).await.unwrap();
    assert_eq!(fetched.understood_count, 10);
}

#[tokio::test]
async fn test_set_current_slide_persists() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    store.set_current_slide(&session.session_id, 4).await.unwrap();
    let fetched = store.get(&session.session_id).await.unwrap();
    assert_eq!(fetched.current_slide_index, 4);
}

#[tokio::test]
async fn test_materials_kept_in_upload_order() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    for name in ["chapter-1.pdf", "worksheet.pdf"] {
        let material = Material {
            file_name: name.to_string(),
            url: format!("/media/live-sessions/{}/{}", session.session_id, name),
            upload_time: Utc::now(),
            size: 512,
        };
        store
            .add_material(&session.session_id, &material)
            .await
            .unwrap();
    }

    let materials = store.materials(&session.session_id).await.unwrap();
    assert_eq!(materials.len(), 2);
    assert_eq!(materials[0].file_name, "chapter-1.pdf");
    assert_eq!(materials[1].file_name, "worksheet.pdf");
}

#[tokio::test]
async fn test_org_listings_filter_by_state_and_org() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());

    let first = store.create(sample_session("t-1", "org-1")).await.unwrap();
    let _second = store.create(sample_session("t-1", "org-1")).await.unwrap();
    let _other_org = store.create(sample_session("t-9", "org-2")).await.unwrap();

    store.start(&first.session_id).await.unwrap();

    let active = store.list_active_by_org("org-1").await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].session_id, first.session_id);

    let all = store.list_by_org("org-1", 50).await.unwrap();
    assert_eq!(all.len(), 2);

    let mine = store.list_by_teacher("t-1").await.unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn test_chat_ids_are_monotonic_per_session() {
    let db = TestDatabase::new().await;
    let store = SessionStore::new(db.pool().clone());
    let chat = ChatLog::new(db.pool().clone());
    let session = store.create(sample_session("t-1", "org-1")).await.unwrap();

    let first = chat
        .append(&session.session_id, "s-1", "Ravi", Role::Student, "hello")
        .await
        .unwrap();
    let second = chat
        .append(&session.session_id, "t-1", "Asha", Role::Teacher, "welcome")
        .await
        .unwrap();
    assert!(second.message_id > first.message_id);

    let history = chat.list(&session.session_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].message, "hello");
    assert_eq!(history[0].role, Role::Student);
    assert_eq!(history[1].message, "welcome");
    assert_eq!(history[1].user_name, "Asha");
}
