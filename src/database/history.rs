// ABOUTME: Workout completion log
// ABOUTME: Records completions of visible workouts and reads them back newest first or by window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use ironlog_core::models::WorkoutHistoryRecord;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use super::now_timestamp;
use crate::errors::{AppError, AppResult};

/// Workout history database operations manager
pub struct HistoryManager {
    pool: SqlitePool,
}

impl HistoryManager {
    /// Create a new history manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record that `user_id` completed `workout_id` now
    ///
    /// The workout must be owned by the user or public.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the workout is not visible to the user, or a
    /// database error
    pub async fn record(
        &self,
        user_id: i64,
        workout_id: i64,
        notes: Option<&str>,
    ) -> AppResult<WorkoutHistoryRecord> {
        self.record_at(user_id, workout_id, notes, &now_timestamp())
            .await
    }

    /// Record a completion with an explicit timestamp (storage format)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the workout is not visible to the user, or a
    /// database error
    pub async fn record_at(
        &self,
        user_id: i64,
        workout_id: i64,
        notes: Option<&str>,
        completed_at: &str,
    ) -> AppResult<WorkoutHistoryRecord> {
        // INSERT ... SELECT writes nothing unless the workout is visible
        let row = sqlx::query(
            r"
            INSERT INTO workout_history (user_id, workout_id, completed_at, notes)
            SELECT $1, w.id, $3, $4
            FROM workouts w
            WHERE w.id = $2 AND (w.created_by = $1 OR w.is_private = 0)
            RETURNING id, user_id, workout_id, completed_at, notes
            ",
        )
        .bind(user_id)
        .bind(workout_id)
        .bind(completed_at)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record workout completion: {e}")))?
        .ok_or_else(|| AppError::not_found("Workout"))?;

        info!(user_id, workout_id, "Workout completed");
        Ok(row_to_record(&row))
    }

    /// Completions for `user_id`, newest first, with workout names
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<WorkoutHistoryRecord>> {
        let rows = sqlx::query(
            r"
            SELECT h.id, h.user_id, h.workout_id, h.completed_at, h.notes,
                   w.name AS workout_name
            FROM workout_history h
            JOIN workouts w ON w.id = h.workout_id
            WHERE h.user_id = $1
            ORDER BY h.completed_at DESC, h.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout history: {e}")))?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    /// Completions for `user_id` with `start <= completed_at <= end`, newest first
    ///
    /// Bounds are timestamps in storage format.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_in_window(
        &self,
        user_id: i64,
        start: &str,
        end: &str,
    ) -> AppResult<Vec<WorkoutHistoryRecord>> {
        let rows = sqlx::query(
            r"
            SELECT h.id, h.user_id, h.workout_id, h.completed_at, h.notes,
                   w.name AS workout_name
            FROM workout_history h
            JOIN workouts w ON w.id = h.workout_id
            WHERE h.user_id = $1 AND h.completed_at >= $2 AND h.completed_at <= $3
            ORDER BY h.completed_at DESC, h.id DESC
            ",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout history window: {e}")))?;

        Ok(rows.iter().map(row_to_record).collect())
    }
}

fn row_to_record(r: &SqliteRow) -> WorkoutHistoryRecord {
    WorkoutHistoryRecord {
        id: r.get("id"),
        user_id: r.get("user_id"),
        workout_id: r.get("workout_id"),
        workout_name: r.try_get("workout_name").ok(),
        completed_at: r.get("completed_at"),
        notes: r.get("notes"),
    }
}
