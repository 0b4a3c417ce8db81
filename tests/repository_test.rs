// ABOUTME: Repository tests against an in-memory database
// ABOUTME: Covers filters, owner scoping, merge-updates, aggregate writes, favorites, and logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;

use common::{create_test_exercise, create_test_resources, create_test_user, entry, new_workout};
use ironlog_server::errors::ErrorCode;
use ironlog_server::models::{
    ExerciseUpdate, NewExercise, NewWorkout, ProfileUpdate, WorkoutUpdate,
};

fn filters(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[tokio::test]
async fn test_exercise_filters_and_ordering() {
    let resources = create_test_resources().await.unwrap();
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let db = &resources.database;

    for (name, category) in [
        ("Squat", "strength"),
        ("Front Squat", "strength"),
        ("Running", "cardio"),
    ] {
        db.exercises()
            .create(
                user_id,
                &NewExercise {
                    name: Some(name.to_owned()),
                    category: Some(category.to_owned()),
                    ..NewExercise::default()
                },
            )
            .await
            .unwrap();
    }

    let all = db.exercises().list_owned(user_id, &filters(&[])).await.unwrap();
    let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Front Squat", "Running", "Squat"]);

    let squats = db
        .exercises()
        .list_owned(user_id, &filters(&[("name", "SQUAT")]))
        .await
        .unwrap();
    assert_eq!(squats.len(), 2);

    let combined = db
        .exercises()
        .list_owned(user_id, &filters(&[("name", "squat"), ("category", "cardio")]))
        .await
        .unwrap();
    assert!(combined.is_empty());

    // Unknown keys never reach SQL; blank values are ignored
    let ignored = db
        .exercises()
        .list_owned(user_id, &filters(&[("created_by", "1 OR 1=1"), ("category", "  ")]))
        .await
        .unwrap();
    assert_eq!(ignored.len(), 3);

    // Wildcards in the value match literally
    let literal = db
        .exercises()
        .list_owned(user_id, &filters(&[("name", "%")]))
        .await
        .unwrap();
    assert!(literal.is_empty());
}

#[tokio::test]
async fn test_name_filter_matches_non_ascii_in_any_case() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    create_test_exercise(db, user_id, "Übung Kniebeuge", true).await.unwrap();
    let renamed = create_test_exercise(db, user_id, "Squat", true).await.unwrap();

    for needle in ["Übung", "übung", "ÜBUNG", "kniebeuge"] {
        let rows = db
            .exercises()
            .list_owned(user_id, &filters(&[("name", needle)]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1, "filter {needle:?}");
        assert_eq!(rows[0].name, "Übung Kniebeuge");
    }

    // Renames keep the searchable copy current
    let update = ExerciseUpdate {
        name: Some("Čučeň".to_owned()),
        ..ExerciseUpdate::default()
    };
    db.exercises().update(renamed, user_id, &update).await.unwrap();
    let rows = db
        .exercises()
        .list_owned(user_id, &filters(&[("name", "čuč")]))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, renamed);
    assert!(db
        .exercises()
        .list_owned(user_id, &filters(&[("name", "squat")]))
        .await
        .unwrap()
        .is_empty());

    db.workouts()
        .create(
            user_id,
            &NewWorkout {
                name: Some("Rücken".to_owned()),
                description: Some("Schulter und RÜCKEN".to_owned()),
                is_private: Some(true),
                exercises: Vec::new(),
            },
        )
        .await
        .unwrap();
    let workouts = db
        .workouts()
        .list_owned(user_id, &filters(&[("description", "rücken")]))
        .await
        .unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].name, "Rücken");
}

#[tokio::test]
async fn test_injection_attempt_is_a_plain_value() {
    let resources = create_test_resources().await.unwrap();
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    create_test_exercise(&resources.database, user_id, "Squat", true).await.unwrap();

    let rows = resources
        .database
        .exercises()
        .list_owned(user_id, &filters(&[("name", "'; DROP TABLE exercises; --")]))
        .await
        .unwrap();
    assert!(rows.is_empty());

    let still_there = resources
        .database
        .exercises()
        .list_owned(user_id, &filters(&[]))
        .await
        .unwrap();
    assert_eq!(still_there.len(), 1);
}

#[tokio::test]
async fn test_exercise_ownership_isolation() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (owner, _) = create_test_user(&resources, "owner@example.com", "owner").await.unwrap();
    let (other, _) = create_test_user(&resources, "other@example.com", "other").await.unwrap();
    let exercise_id = create_test_exercise(db, owner, "Deadlift", true).await.unwrap();

    let err = db.exercises().get_owned(exercise_id, other).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.message, "Exercise not found");

    let update = ExerciseUpdate {
        name: Some("Stolen".to_owned()),
        ..ExerciseUpdate::default()
    };
    let err = db.exercises().update(exercise_id, other, &update).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = db.exercises().delete(exercise_id, other).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let unchanged = db.exercises().get_owned(exercise_id, owner).await.unwrap();
    assert_eq!(unchanged.name, "Deadlift");
}

#[tokio::test]
async fn test_public_exercise_listings() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (ann, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let (bob, _) = create_test_user(&resources, "bob@example.com", "bob").await.unwrap();
    let public_id = create_test_exercise(db, ann, "Plank", false).await.unwrap();
    let private_id = create_test_exercise(db, ann, "Secret Move", true).await.unwrap();
    create_test_exercise(db, bob, "Burpee", false).await.unwrap();

    let everyone = db.exercises().list_public(None, &filters(&[])).await.unwrap();
    assert_eq!(everyone.len(), 2);
    assert!(everyone.iter().all(|e| !e.is_private && e.username.is_some()));

    let anns = db.exercises().list_public(Some(ann), &filters(&[])).await.unwrap();
    assert_eq!(anns.len(), 1);
    assert_eq!(anns[0].id, public_id);
    assert_eq!(anns[0].username.as_deref(), Some("ann"));

    assert!(db.exercises().get_public(public_id).await.is_ok());
    let err = db.exercises().get_public(private_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_merge_update_with_empty_partial_is_identity() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let exercise_id = create_test_exercise(db, user_id, "Row", true).await.unwrap();

    let before = db.exercises().get_owned(exercise_id, user_id).await.unwrap();
    let after = db
        .exercises()
        .update(exercise_id, user_id, &ExerciseUpdate::default())
        .await
        .unwrap();
    assert_eq!(before, after);

    // Explicit null keeps the stored value too
    let update: ExerciseUpdate =
        serde_json::from_str(r#"{"category": null, "difficulty": "hard"}"#).unwrap();
    let updated = db.exercises().update(exercise_id, user_id, &update).await.unwrap();
    assert_eq!(updated.category.as_deref(), Some("strength"));
    assert_eq!(updated.difficulty.as_deref(), Some("hard"));

    let profile_before = db.users().get_profile(user_id).await.unwrap();
    let profile_after = db
        .users()
        .update_profile(user_id, &ProfileUpdate::default())
        .await
        .unwrap();
    assert_eq!(profile_before, profile_after);
}

#[tokio::test]
async fn test_exercise_in_use_cannot_be_deleted() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let squat = create_test_exercise(db, user_id, "Squat", true).await.unwrap();
    db.workouts()
        .create(user_id, &new_workout("Legs", true, vec![entry(squat, 5, 5)]))
        .await
        .unwrap();

    let err = db.exercises().delete(squat, user_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(db.exercises().get_owned(squat, user_id).await.is_ok());
}

#[tokio::test]
async fn test_leg_day_replace_all_entries() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let squat = create_test_exercise(db, user_id, "Squat", true).await.unwrap();
    let lunge = create_test_exercise(db, user_id, "Lunge", true).await.unwrap();
    let press = create_test_exercise(db, user_id, "Leg Press", true).await.unwrap();

    let created = db
        .workouts()
        .create(
            user_id,
            &new_workout("Leg Day", true, vec![entry(squat, 5, 5), entry(lunge, 3, 12)]),
        )
        .await
        .unwrap();
    assert_eq!(created.exercises.len(), 2);
    assert_eq!(created.exercises[0].exercise_id, squat);
    assert_eq!(created.exercises[0].exercise_name.as_deref(), Some("Squat"));
    assert_eq!(created.exercises[1].exercise_id, lunge);

    let update = WorkoutUpdate {
        exercises: Some(vec![entry(press, 4, 10)]),
        ..WorkoutUpdate::default()
    };
    let updated = db.workouts().update(created.id, user_id, &update).await.unwrap();
    assert_eq!(updated.name, "Leg Day");
    assert_eq!(updated.exercises.len(), 1);
    assert_eq!(updated.exercises[0].exercise_id, press);
    assert_eq!(updated.exercises[0].sets, Some(4));

    // An empty list keeps the entries
    let update = WorkoutUpdate {
        name: Some("Leg Day II".to_owned()),
        exercises: Some(Vec::new()),
        ..WorkoutUpdate::default()
    };
    let renamed = db.workouts().update(created.id, user_id, &update).await.unwrap();
    assert_eq!(renamed.name, "Leg Day II");
    assert_eq!(renamed.exercises, updated.exercises);
}

#[tokio::test]
async fn test_dangling_entry_rolls_back_everything() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let squat = create_test_exercise(db, user_id, "Squat", true).await.unwrap();

    let err = db
        .workouts()
        .create(
            user_id,
            &new_workout("Broken", true, vec![entry(squat, 5, 5), entry(9999, 1, 1)]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("9999"));
    assert!(db
        .workouts()
        .list_owned(user_id, &filters(&[]))
        .await
        .unwrap()
        .is_empty());

    let workout = db
        .workouts()
        .create(user_id, &new_workout("Legs", true, vec![entry(squat, 5, 5)]))
        .await
        .unwrap();
    let update = WorkoutUpdate {
        name: Some("Renamed".to_owned()),
        exercises: Some(vec![entry(9999, 1, 1)]),
        ..WorkoutUpdate::default()
    };
    assert!(db.workouts().update(workout.id, user_id, &update).await.is_err());

    let unchanged = db.workouts().get_owned(workout.id, user_id).await.unwrap();
    assert_eq!(unchanged.name, "Legs");
    assert_eq!(unchanged.exercises.len(), 1);
    assert_eq!(unchanged.exercises[0].exercise_id, squat);
}

#[tokio::test]
async fn test_entries_cannot_use_another_users_private_exercise() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (ann, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let (bob, _) = create_test_user(&resources, "bob@example.com", "bob").await.unwrap();
    let secret = create_test_exercise(db, bob, "Bob's secret move", true).await.unwrap();
    let shared = create_test_exercise(db, bob, "Burpee", false).await.unwrap();
    let squat = create_test_exercise(db, ann, "Squat", true).await.unwrap();

    let err = db
        .workouts()
        .create(ann, &new_workout("Sneaky", false, vec![entry(secret, 3, 10)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, format!("Exercise {secret} does not exist"));
    assert!(db.workouts().list_owned(ann, &filters(&[])).await.unwrap().is_empty());

    // Public exercises of other users are fine
    let workout = db
        .workouts()
        .create(ann, &new_workout("Mixed", false, vec![entry(squat, 5, 5), entry(shared, 3, 10)]))
        .await
        .unwrap();
    assert_eq!(workout.exercises[1].exercise_name.as_deref(), Some("Burpee"));

    let update = WorkoutUpdate {
        exercises: Some(vec![entry(secret, 1, 1)]),
        ..WorkoutUpdate::default()
    };
    let err = db.workouts().update(workout.id, ann, &update).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let unchanged = db.workouts().get_owned(workout.id, ann).await.unwrap();
    assert_eq!(unchanged.exercises.len(), 2);

    // Nothing of Ann's pins Bob's private exercise
    db.exercises().delete(secret, bob).await.unwrap();
}

#[tokio::test]
async fn test_exercise_made_private_later_hides_its_name() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (ann, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let (bob, _) = create_test_user(&resources, "bob@example.com", "bob").await.unwrap();
    let burpee = create_test_exercise(db, bob, "Burpee", false).await.unwrap();
    let workout = db
        .workouts()
        .create(ann, &new_workout("Conditioning", false, vec![entry(burpee, 3, 10)]))
        .await
        .unwrap();

    let update = ExerciseUpdate {
        name: Some("Private Burpee".to_owned()),
        is_private: Some(true),
        ..ExerciseUpdate::default()
    };
    db.exercises().update(burpee, bob, &update).await.unwrap();

    let public = db.workouts().get_public(workout.id).await.unwrap();
    assert_eq!(public.exercises.len(), 1);
    assert_eq!(public.exercises[0].exercise_id, burpee);
    assert!(public.exercises[0].exercise_name.is_none());
}

#[tokio::test]
async fn test_workout_ownership_and_delete() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (owner, _) = create_test_user(&resources, "owner@example.com", "owner").await.unwrap();
    let (other, _) = create_test_user(&resources, "other@example.com", "other").await.unwrap();
    let squat = create_test_exercise(db, owner, "Squat", true).await.unwrap();
    let workout = db
        .workouts()
        .create(owner, &new_workout("Legs", true, vec![entry(squat, 5, 5)]))
        .await
        .unwrap();

    assert_eq!(
        db.workouts().get_owned(workout.id, other).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    assert_eq!(
        db.workouts().delete(workout.id, other).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    assert_eq!(
        db.workouts().get_public(workout.id).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );

    db.workouts().delete(workout.id, owner).await.unwrap();
    assert!(db.workouts().entries(workout.id).await.unwrap().is_empty());
    assert_eq!(
        db.workouts().delete(workout.id, owner).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
}

#[tokio::test]
async fn test_favorites_are_idempotent_and_visibility_checked() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (ann, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let (bob, _) = create_test_user(&resources, "bob@example.com", "bob").await.unwrap();
    let public = db
        .workouts()
        .create(bob, &new_workout("Bob Public", false, Vec::new()))
        .await
        .unwrap();
    let private = db
        .workouts()
        .create(bob, &new_workout("Bob Private", true, Vec::new()))
        .await
        .unwrap();

    let first = db.favorites().add(ann, public.id).await.unwrap();
    let second = db.favorites().add(ann, public.id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(db.favorites().list(ann).await.unwrap().len(), 1);

    let err = db.favorites().add(ann, private.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    db.favorites().remove(ann, public.id).await.unwrap();
    assert!(db.favorites().list(ann).await.unwrap().is_empty());
    assert_eq!(
        db.favorites().remove(ann, public.id).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
}

#[tokio::test]
async fn test_history_requires_visible_workout() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (ann, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let (bob, _) = create_test_user(&resources, "bob@example.com", "bob").await.unwrap();
    let own = db
        .workouts()
        .create(ann, &new_workout("Mine", true, Vec::new()))
        .await
        .unwrap();
    let hidden = db
        .workouts()
        .create(bob, &new_workout("Hidden", true, Vec::new()))
        .await
        .unwrap();

    db.history()
        .record_at(ann, own.id, Some("easy"), "2025-01-01T08:00:00.000Z")
        .await
        .unwrap();
    db.history()
        .record_at(ann, own.id, None, "2025-01-02T08:00:00.000Z")
        .await
        .unwrap();
    assert_eq!(
        db.history().record(ann, hidden.id, None).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );

    let history = db.history().list(ann).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].completed_at, "2025-01-02T08:00:00.000Z");
    assert_eq!(history[0].workout_name.as_deref(), Some("Mine"));
    assert_eq!(history[1].notes.as_deref(), Some("easy"));
}

#[tokio::test]
async fn test_weight_log_mirrors_profile() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_test_user(&resources, "ann@example.com", "ann").await.unwrap();

    db.weight().log_at(user_id, 80.0, "2025-01-01T08:00:00.000Z").await.unwrap();
    db.weight().log_at(user_id, 78.5, "2025-01-08T08:00:00.000Z").await.unwrap();

    let history = db.weight().history(user_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!((history[0].weight_kg - 78.5).abs() < f64::EPSILON);

    let profile = db.users().get_profile(user_id).await.unwrap();
    assert_eq!(profile.weight_kg, Some(78.5));

    assert_eq!(
        db.weight().log(9999, 70.0).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
}

#[tokio::test]
async fn test_profile_username_uniqueness() {
    let resources = create_test_resources().await.unwrap();
    let db = &resources.database;
    create_test_user(&resources, "ann@example.com", "ann").await.unwrap();
    let (bob, _) = create_test_user(&resources, "bob@example.com", "bob").await.unwrap();

    let update = ProfileUpdate {
        username: Some("ann".to_owned()),
        ..ProfileUpdate::default()
    };
    let err = db.users().update_profile(bob, &update).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("ironlog.db").display());

    let first = ironlog_server::database::Database::new(&url).await.unwrap();
    let user = first
        .users()
        .create(&ironlog_server::database::NewUser {
            email: "ann@example.com".to_owned(),
            username: "ann".to_owned(),
            password_hash: "not-a-real-hash".to_owned(),
        })
        .await
        .unwrap();
    first.pool().close().await;

    // Migrations are idempotent on an existing file
    let second = ironlog_server::database::Database::new(&url).await.unwrap();
    let profile = second.users().get_profile(user.id).await.unwrap();
    assert_eq!(profile.email, "ann@example.com");
    assert!(second.users().exists("ann@example.com", "someone").await.unwrap());
}
