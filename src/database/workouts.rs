// ABOUTME: Workout aggregate repository: workout rows plus their ordered exercise entries
// ABOUTME: Every multi-statement write runs in one transaction with rollback on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! # Workout Aggregate
//!
//! A workout owns its entries; entries are never addressed on their own.
//!
//! - Reads attach entries ordered by insertion position.
//! - `create` inserts the workout and its entries together.
//! - `update` merges scalar fields and replaces the entry list only when a non-empty
//!   list is supplied. An empty or absent list keeps the existing entries.
//! - `delete` removes the workout and its entries together.

use ironlog_core::errors::database::{constraint_violation, ConstraintViolation};
use ironlog_core::models::{
    NewWorkout, NewWorkoutExercise, Workout, WorkoutExerciseEntry, WorkoutUpdate,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use tracing::{debug, info};

use super::filters::{fold_case, FilterBuilder, FilterParams, WORKOUT_FILTERS};
use super::now_timestamp;
use super::transactions::SqliteTransactionGuard;
use crate::errors::{AppError, AppResult};

const WORKOUT: &str = "Workout";

/// Workout database operations manager
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// List workouts owned by `owner_id` with their entries
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_owned(&self, owner_id: i64, filters: &FilterParams) -> AppResult<Vec<Workout>> {
        let filtered = FilterBuilder::new(WORKOUT_FILTERS).build(
            r"
            SELECT id, created_by, name, description, is_private, created_at
            FROM workouts
            WHERE created_by = $1",
            filters,
            2,
        );
        let sql = format!("{} ORDER BY name ASC NULLS LAST, id ASC", filtered.sql);

        let mut query = sqlx::query(&sql).bind(owner_id);
        for value in filtered.values {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        self.attach_entries(rows).await
    }

    /// List public workouts with their entries
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_public(&self, filters: &FilterParams) -> AppResult<Vec<Workout>> {
        let filtered = FilterBuilder::new(WORKOUT_FILTERS).build(
            r"
            SELECT id, created_by, name, description, is_private, created_at
            FROM workouts
            WHERE is_private = 0",
            filters,
            1,
        );
        let sql = format!("{} ORDER BY name ASC NULLS LAST, id ASC", filtered.sql);

        let mut query = sqlx::query(&sql);
        for value in filtered.values {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list public workouts: {e}")))?;

        self.attach_entries(rows).await
    }

    /// Get a workout owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or owned by someone else
    pub async fn get_owned(&self, workout_id: i64, owner_id: i64) -> AppResult<Workout> {
        let row = sqlx::query(
            r"
            SELECT id, created_by, name, description, is_private, created_at
            FROM workouts
            WHERE id = $1 AND created_by = $2
            ",
        )
        .bind(workout_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?
        .ok_or_else(|| AppError::not_found(WORKOUT))?;

        let entries = fetch_entries(&self.pool, workout_id).await?;
        Ok(row_to_workout(&row, entries))
    }

    /// Get a public workout
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or private
    pub async fn get_public(&self, workout_id: i64) -> AppResult<Workout> {
        let row = sqlx::query(
            r"
            SELECT id, created_by, name, description, is_private, created_at
            FROM workouts
            WHERE id = $1 AND is_private = 0
            ",
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get public workout: {e}")))?
        .ok_or_else(|| AppError::not_found(WORKOUT))?;

        let entries = fetch_entries(&self.pool, workout_id).await?;
        Ok(row_to_workout(&row, entries))
    }

    /// Whether `user_id` may see the workout (owns it, or it is public)
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn is_visible_to(&self, workout_id: i64, user_id: i64) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM workouts WHERE id = $1 AND (created_by = $2 OR is_private = 0)",
        )
        .bind(workout_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check workout visibility: {e}")))?;
        Ok(row.is_some())
    }

    /// Ordered entries of a workout, regardless of owner
    ///
    /// Callers are responsible for having checked visibility.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn entries(&self, workout_id: i64) -> AppResult<Vec<WorkoutExerciseEntry>> {
        fetch_entries(&self.pool, workout_id).await
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create a workout and its entries atomically
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` without a name, `InvalidInput` for invalid or
    /// dangling entries (nothing is written), or a database error
    pub async fn create(&self, owner_id: i64, workout: &NewWorkout) -> AppResult<Workout> {
        let name = workout
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::missing_field("Workout name is required"))?;
        validate_entries(&workout.exercises)?;

        let mut guard = SqliteTransactionGuard::begin(&self.pool).await?;

        let result = sqlx::query(
            r"
            INSERT INTO workouts (created_by, name, name_folded, description,
                                  description_folded, is_private, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(owner_id)
        .bind(name)
        .bind(fold_case(name))
        .bind(workout.description.as_deref())
        .bind(workout.description.as_deref().map(fold_case))
        .bind(workout.is_private.unwrap_or(true))
        .bind(now_timestamp())
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;
        let workout_id = result.last_insert_rowid();

        insert_entries(&mut guard, workout_id, owner_id, &workout.exercises).await?;
        guard.commit().await?;

        info!(
            workout_id,
            owner_id,
            entries = workout.exercises.len(),
            "Workout created"
        );
        self.get_owned(workout_id, owner_id).await
    }

    /// Merge-update a workout, replacing its entries only for a non-empty list
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or owned by someone else, `InvalidInput`
    /// for invalid or dangling entries (nothing is written), or a database error
    pub async fn update(
        &self,
        workout_id: i64,
        owner_id: i64,
        update: &WorkoutUpdate,
    ) -> AppResult<Workout> {
        let name = match update.name.as_deref().map(str::trim) {
            Some("") => return Err(AppError::invalid_input("Workout name cannot be empty")),
            other => other,
        };
        let replacement = update.replacement_entries();
        if let Some(entries) = replacement {
            validate_entries(entries)?;
        }

        let mut guard = SqliteTransactionGuard::begin(&self.pool).await?;

        let updated = sqlx::query(
            r"
            UPDATE workouts
            SET name = COALESCE($1, name),
                name_folded = COALESCE($2, name_folded),
                description = COALESCE($3, description),
                description_folded = COALESCE($4, description_folded),
                is_private = COALESCE($5, is_private)
            WHERE id = $6 AND created_by = $7
            RETURNING id
            ",
        )
        .bind(name)
        .bind(name.map(fold_case))
        .bind(update.description.as_deref())
        .bind(update.description.as_deref().map(fold_case))
        .bind(update.is_private)
        .bind(workout_id)
        .bind(owner_id)
        .fetch_optional(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        if updated.is_none() {
            guard.rollback().await?;
            return Err(AppError::not_found(WORKOUT));
        }

        if let Some(entries) = replacement {
            sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
                .bind(workout_id)
                .execute(guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to clear workout entries: {e}")))?;
            insert_entries(&mut guard, workout_id, owner_id, entries).await?;
            debug!(workout_id, entries = entries.len(), "Workout entries replaced");
        }

        guard.commit().await?;
        self.get_owned(workout_id, owner_id).await
    }

    /// Delete a workout and its entries atomically
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or owned by someone else, or a database error
    pub async fn delete(&self, workout_id: i64, owner_id: i64) -> AppResult<()> {
        let mut guard = SqliteTransactionGuard::begin(&self.pool).await?;

        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND created_by = $2")
            .bind(workout_id)
            .bind(owner_id)
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        if result.rows_affected() == 0 {
            guard.rollback().await?;
            return Err(AppError::not_found(WORKOUT));
        }

        // Normally already removed by ON DELETE CASCADE
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(workout_id)
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout entries: {e}")))?;

        guard.commit().await?;
        info!(workout_id, owner_id, "Workout deleted");
        Ok(())
    }

    async fn attach_entries(&self, rows: Vec<SqliteRow>) -> AppResult<Vec<Workout>> {
        let mut workouts = Vec::with_capacity(rows.len());
        for row in rows {
            let entries = fetch_entries(&self.pool, row.get("id")).await?;
            workouts.push(row_to_workout(&row, entries));
        }
        Ok(workouts)
    }
}

// ============================================================================
// Entry helpers
// ============================================================================

fn validate_entries(entries: &[NewWorkoutExercise]) -> AppResult<()> {
    for entry in entries {
        let counts = [
            ("sets", entry.sets),
            ("reps", entry.reps),
            ("duration_minutes", entry.duration_minutes),
        ];
        if let Some((field, _)) = counts.iter().find(|(_, v)| v.is_some_and(|n| n < 0)) {
            return Err(AppError::invalid_input(format!(
                "{field} must not be negative (exercise {})",
                entry.exercise_id
            )));
        }
    }
    Ok(())
}

async fn insert_entries(
    guard: &mut SqliteTransactionGuard<'_>,
    workout_id: i64,
    owner_id: i64,
    entries: &[NewWorkoutExercise],
) -> AppResult<()> {
    for (position, entry) in entries.iter().enumerate() {
        // Only the owner's exercises or public ones; others read as missing
        let usable = sqlx::query(
            "SELECT 1 FROM exercises WHERE id = $1 AND (created_by = $2 OR is_private = 0)",
        )
        .bind(entry.exercise_id)
        .bind(owner_id)
        .fetch_optional(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to check workout entry: {e}")))?;
        if usable.is_none() {
            return Err(missing_exercise(entry.exercise_id));
        }

        sqlx::query(
            r"
            INSERT INTO workout_exercises
                (workout_id, exercise_id, created_by, position, sets, reps, duration_minutes, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(workout_id)
        .bind(entry.exercise_id)
        .bind(owner_id)
        .bind(i64::try_from(position).unwrap_or(i64::MAX))
        .bind(entry.sets)
        .bind(entry.reps)
        .bind(entry.duration_minutes)
        .bind(entry.notes.as_deref())
        .execute(guard.executor()?)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintViolation::ForeignKey) => missing_exercise(entry.exercise_id),
            _ => AppError::database(format!("Failed to insert workout entry: {e}")),
        })?;
    }
    Ok(())
}

fn missing_exercise(exercise_id: i64) -> AppError {
    AppError::invalid_input(format!("Exercise {exercise_id} does not exist"))
}

async fn fetch_entries<'e, E>(executor: E, workout_id: i64) -> AppResult<Vec<WorkoutExerciseEntry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        r"
        SELECT we.exercise_id, e.name AS exercise_name, we.sets, we.reps,
               we.duration_minutes, we.notes
        FROM workout_exercises we
        LEFT JOIN exercises e
               ON e.id = we.exercise_id AND (e.created_by = we.created_by OR e.is_private = 0)
        WHERE we.workout_id = $1
        ORDER BY we.position ASC, we.id ASC
        ",
    )
    .bind(workout_id)
    .fetch_all(executor)
    .await
    .map_err(|e| AppError::database(format!("Failed to get workout entries: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|r| WorkoutExerciseEntry {
            exercise_id: r.get("exercise_id"),
            exercise_name: r.get("exercise_name"),
            sets: r.get("sets"),
            reps: r.get("reps"),
            duration_minutes: r.get("duration_minutes"),
            notes: r.get("notes"),
        })
        .collect())
}

fn row_to_workout(r: &SqliteRow, exercises: Vec<WorkoutExerciseEntry>) -> Workout {
    Workout {
        id: r.get("id"),
        created_by: r.get("created_by"),
        name: r.get("name"),
        description: r.get("description"),
        is_private: r.get("is_private"),
        created_at: r.get("created_at"),
        exercises,
    }
}
