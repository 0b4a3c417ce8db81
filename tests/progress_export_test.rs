// ABOUTME: Service-level tests for progress summaries and the favorites CSV export
// ABOUTME: Seeds logs with explicit timestamps so date windows are deterministic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{TimeZone, Utc};
use common::{create_test_exercise, create_test_resources, create_test_user, entry, new_workout};
use ironlog_server::config::ProgressWindow;
use ironlog_server::database::Database;
use ironlog_server::models::NewWorkoutExercise;
use ironlog_server::services::export::export_favorites;
use ironlog_server::services::progress::{resolve_window, summarize, DateRange};

fn whole_history() -> DateRange {
    resolve_window(
        ProgressWindow::All,
        None,
        None,
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_weight_change_over_three_entries() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();

    for (kg, at) in [
        (80.0, "2025-01-01T08:00:00.000Z"),
        (78.0, "2025-01-08T08:00:00.000Z"),
        (76.0, "2025-01-15T08:00:00.000Z"),
    ] {
        db.weight().log_at(user_id, kg, at).await.unwrap();
    }

    let summary = summarize(&db.history(), &db.weight(), user_id, whole_history())
        .await
        .unwrap();
    assert_eq!(summary.weight.len(), 3);
    assert!((summary.weight[0].weight_kg - 80.0).abs() < f64::EPSILON);
    assert!((summary.weight_change.unwrap() - (-4.0)).abs() < f64::EPSILON);
    assert_eq!(summary.completed_workouts, 0);
}

#[tokio::test]
async fn test_weight_change_needs_two_entries() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();

    let empty = summarize(&db.history(), &db.weight(), user_id, whole_history())
        .await
        .unwrap();
    assert!(empty.weight.is_empty());
    assert!(empty.weight_change.is_none());

    db.weight()
        .log_at(user_id, 82.0, "2025-02-01T08:00:00.000Z")
        .await
        .unwrap();
    let single = summarize(&db.history(), &db.weight(), user_id, whole_history())
        .await
        .unwrap();
    assert_eq!(single.weight.len(), 1);
    assert!(single.weight_change.is_none());

    let json = serde_json::to_value(&single).unwrap();
    assert!(json["weightChange"].is_null());
}

#[tokio::test]
async fn test_summary_respects_window_bounds() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let workout = db
        .workouts()
        .create(user_id, &new_workout("Full Body", true, Vec::new()))
        .await
        .unwrap();

    for at in [
        "2025-03-01T09:00:00.000Z",
        "2025-03-10T09:00:00.000Z",
        "2025-03-20T09:00:00.000Z",
    ] {
        db.history().record_at(user_id, workout.id, None, at).await.unwrap();
    }
    db.weight()
        .log_at(user_id, 90.0, "2025-02-28T07:00:00.000Z")
        .await
        .unwrap();
    db.weight()
        .log_at(user_id, 89.0, "2025-03-10T07:00:00.000Z")
        .await
        .unwrap();
    db.weight()
        .log_at(user_id, 88.5, "2025-03-10T20:00:00.000Z")
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    let range = resolve_window(
        ProgressWindow::All,
        Some("2025-03-05"),
        Some("2025-03-10"),
        now,
    )
    .unwrap();
    let summary = summarize(&db.history(), &db.weight(), user_id, range)
        .await
        .unwrap();

    assert_eq!(summary.completed_workouts, 1);
    assert_eq!(
        summary.list_of_completed_workouts[0].completed_at,
        "2025-03-10T09:00:00.000Z"
    );
    assert_eq!(
        summary.list_of_completed_workouts[0].workout_name.as_deref(),
        Some("Full Body")
    );
    // A date-only end bound covers the whole day
    assert_eq!(summary.weight.len(), 2);
    assert!((summary.weight_change.unwrap() - (-0.5)).abs() < 1e-9);
    assert_eq!(summary.start_date, "2025-03-05T00:00:00.000Z");
    assert_eq!(summary.end_date, "2025-03-10T23:59:59.999Z");
}

#[tokio::test]
async fn test_week_window_starts_on_monday() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let workout = db
        .workouts()
        .create(user_id, &new_workout("Run", true, Vec::new()))
        .await
        .unwrap();

    // 2025-06-08 is a Sunday, 2025-06-09 a Monday
    db.history()
        .record_at(user_id, workout.id, None, "2025-06-08T18:00:00.000Z")
        .await
        .unwrap();
    db.history()
        .record_at(user_id, workout.id, Some("tempo"), "2025-06-09T06:30:00.000Z")
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap();
    let range = resolve_window(ProgressWindow::Week, None, None, now).unwrap();
    let summary = summarize(&db.history(), &db.weight(), user_id, range)
        .await
        .unwrap();

    assert_eq!(summary.completed_workouts, 1);
    assert_eq!(
        summary.list_of_completed_workouts[0].notes.as_deref(),
        Some("tempo")
    );
    assert_eq!(summary.start_date, "2025-06-09T00:00:00.000Z");
}

async fn favorite_export_fixture(db: &Database, user_id: i64) {
    let squat = create_test_exercise(db, user_id, "Squat", true).await.unwrap();
    let plank = create_test_exercise(db, user_id, "Plank, Side", true).await.unwrap();

    let legs = db
        .workouts()
        .create(
            user_id,
            &new_workout(
                "Leg Day",
                true,
                vec![
                    entry(squat, 5, 5),
                    NewWorkoutExercise {
                        exercise_id: plank,
                        sets: Some(0),
                        duration_minutes: Some(2),
                        ..NewWorkoutExercise::default()
                    },
                ],
            ),
        )
        .await
        .unwrap();
    let rest = db
        .workouts()
        .create(user_id, &new_workout("Rest", true, Vec::new()))
        .await
        .unwrap();

    db.favorites().add(user_id, legs.id).await.unwrap();
    db.favorites().add(user_id, rest.id).await.unwrap();
}

#[tokio::test]
async fn test_export_favorites_csv_layout() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    favorite_export_fixture(db, user_id).await;

    let csv = export_favorites(&db.favorites(), &db.workouts(), user_id)
        .await
        .unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "Workout Name,Workout Description,Exercise Name,Sets,Reps,Duration"
    );
    assert!(lines.contains(&"Leg Day,,Squat,5,5,-"));
    assert!(lines.contains(&",,\"Plank, Side\",0,-,2"));
    // Every workout block ends with a separator row, even without entries
    assert_eq!(lines.iter().filter(|l| **l == ",,,,,").count(), 2);
    assert_eq!(lines.len(), 1 + 2 + 1 + 1);
}

#[tokio::test]
async fn test_export_without_favorites_is_header_only() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();

    let csv = export_favorites(&db.favorites(), &db.workouts(), user_id)
        .await
        .unwrap();
    assert_eq!(
        csv,
        "Workout Name,Workout Description,Exercise Name,Sets,Reps,Duration\n"
    );
}
