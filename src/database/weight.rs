// ABOUTME: Body weight log
// ABOUTME: Each entry also becomes the user's current profile weight, atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use ironlog_core::models::WeightEntry;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::now_timestamp;
use super::transactions::SqliteTransactionGuard;
use crate::errors::{AppError, AppResult};

/// Weight log database operations manager
pub struct WeightManager {
    pool: SqlitePool,
}

impl WeightManager {
    /// Create a new weight manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Log a weight measurement taken now
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn log(&self, user_id: i64, weight_kg: f64) -> AppResult<WeightEntry> {
        self.log_at(user_id, weight_kg, &now_timestamp()).await
    }

    /// Log a weight measurement with an explicit timestamp (storage format)
    ///
    /// Inserts the entry and updates `users.weight_kg` in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist, or a database error
    pub async fn log_at(
        &self,
        user_id: i64,
        weight_kg: f64,
        recorded_at: &str,
    ) -> AppResult<WeightEntry> {
        let mut guard = SqliteTransactionGuard::begin(&self.pool).await?;

        let updated = sqlx::query("UPDATE users SET weight_kg = $1 WHERE id = $2")
            .bind(weight_kg)
            .bind(user_id)
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to update current weight: {e}")))?;
        if updated.rows_affected() == 0 {
            guard.rollback().await?;
            return Err(AppError::not_found("User"));
        }

        let row = sqlx::query(
            r"
            INSERT INTO weight_history (user_id, weight_kg, recorded_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, weight_kg, recorded_at
            ",
        )
        .bind(user_id)
        .bind(weight_kg)
        .bind(recorded_at)
        .fetch_one(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to log weight: {e}")))?;
        let entry = row_to_entry(&row);

        guard.commit().await?;
        debug!(user_id, entry_id = entry.id, "Weight logged");
        Ok(entry)
    }

    /// Weight entries for `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn history(&self, user_id: i64) -> AppResult<Vec<WeightEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, weight_kg, recorded_at
            FROM weight_history
            WHERE user_id = $1
            ORDER BY recorded_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get weight history: {e}")))?;

        Ok(rows.iter().map(row_to_entry).collect())
    }

    /// Weight entries with `start <= recorded_at <= end`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn in_window(
        &self,
        user_id: i64,
        start: &str,
        end: &str,
    ) -> AppResult<Vec<WeightEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, weight_kg, recorded_at
            FROM weight_history
            WHERE user_id = $1 AND recorded_at >= $2 AND recorded_at <= $3
            ORDER BY recorded_at ASC, id ASC
            ",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get weight window: {e}")))?;

        Ok(rows.iter().map(row_to_entry).collect())
    }
}

fn row_to_entry(r: &SqliteRow) -> WeightEntry {
    WeightEntry {
        id: r.get("id"),
        user_id: r.get("user_id"),
        weight_kg: r.get("weight_kg"),
        recorded_at: r.get("recorded_at"),
    }
}
