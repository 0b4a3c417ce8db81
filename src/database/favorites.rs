// ABOUTME: Favorite workout pairings per user
// ABOUTME: Adding is idempotent on (user, workout); listing joins the workout rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use ironlog_core::models::{FavoriteWorkout, FavoritedWorkout};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::now_timestamp;
use crate::errors::{AppError, AppResult};

/// Favorites database operations manager
pub struct FavoriteManager {
    pool: SqlitePool,
}

impl FavoriteManager {
    /// Create a new favorites manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Favorite a workout visible to `user_id`
    ///
    /// Favoriting twice returns the existing pairing unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the workout is not visible to the user, or a
    /// database error
    pub async fn add(&self, user_id: i64, workout_id: i64) -> AppResult<FavoriteWorkout> {
        let inserted = sqlx::query(
            r"
            INSERT INTO favorite_workouts (user_id, workout_id, created_at)
            SELECT $1, w.id, $3
            FROM workouts w
            WHERE w.id = $2 AND (w.created_by = $1 OR w.is_private = 0)
            ON CONFLICT (user_id, workout_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(workout_id)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT fw.id, fw.user_id, fw.workout_id, fw.created_at
            FROM favorite_workouts fw
            JOIN workouts w ON w.id = fw.workout_id
            WHERE fw.user_id = $1 AND fw.workout_id = $2
              AND (w.created_by = $1 OR w.is_private = 0)
            ",
        )
        .bind(user_id)
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get favorite: {e}")))?
        .ok_or_else(|| AppError::not_found("Workout"))?;

        debug!(
            user_id,
            workout_id,
            created = inserted.rows_affected() > 0,
            "Workout favorited"
        );
        Ok(FavoriteWorkout {
            id: row.get("id"),
            user_id: row.get("user_id"),
            workout_id: row.get("workout_id"),
            created_at: row.get("created_at"),
        })
    }

    /// Remove a favorite pairing
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user had not favorited the workout, or a
    /// database error
    pub async fn remove(&self, user_id: i64, workout_id: i64) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM favorite_workouts WHERE user_id = $1 AND workout_id = $2")
                .bind(user_id)
                .bind(workout_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Favorite"));
        }
        Ok(())
    }

    /// Favorited workouts for `user_id`, most recently favorited first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<FavoritedWorkout>> {
        let rows = sqlx::query(
            r"
            SELECT w.id, w.created_by, w.name, w.description, w.is_private,
                   fw.created_at AS favorited_at
            FROM favorite_workouts fw
            JOIN workouts w ON w.id = fw.workout_id
            WHERE fw.user_id = $1
            ORDER BY fw.created_at DESC, fw.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| FavoritedWorkout {
                id: r.get("id"),
                created_by: r.get("created_by"),
                name: r.get("name"),
                description: r.get("description"),
                is_private: r.get("is_private"),
                favorited_at: r.get("favorited_at"),
            })
            .collect())
    }
}
