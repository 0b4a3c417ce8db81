// ABOUTME: Exercise repository with owner-scoped CRUD and public listings
// ABOUTME: List endpoints use the filter builder; updates merge with stored values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use ironlog_core::errors::database::{constraint_violation, ConstraintViolation};
use ironlog_core::models::{Exercise, ExerciseUpdate, NewExercise};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::filters::{fold_case, FilterBuilder, FilterParams, EXERCISE_FILTERS};
use super::now_timestamp;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};

const EXERCISE: &str = "Exercise";

const ORDER_BY_NAME: &str = " ORDER BY name ASC NULLS LAST, id ASC";

/// Exercise database operations manager
pub struct ExerciseManager {
    pool: SqlitePool,
}

impl ExerciseManager {
    /// Create a new exercise manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List exercises owned by `owner_id`, private and public
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_owned(&self, owner_id: i64, filters: &FilterParams) -> AppResult<Vec<Exercise>> {
        let filtered = FilterBuilder::new(EXERCISE_FILTERS).build(
            r"
            SELECT id, created_by, name, description, category, muscle_group, difficulty,
                   is_private, created_at
            FROM exercises
            WHERE created_by = $1",
            filters,
            2,
        );
        let sql = format!("{}{ORDER_BY_NAME}", filtered.sql);

        let mut query = sqlx::query(&sql).bind(owner_id);
        for value in filtered.values {
            query = query.bind(value);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        Ok(rows.iter().map(row_to_exercise).collect())
    }

    /// List public exercises, optionally restricted to one owner
    ///
    /// Each row carries the owner's username.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_public(
        &self,
        owner_id: Option<i64>,
        filters: &FilterParams,
    ) -> AppResult<Vec<Exercise>> {
        let (base, start_index) = owner_id.map_or(
            (PUBLIC_EXERCISES_BASE.to_owned(), 1),
            |_| (format!("{PUBLIC_EXERCISES_BASE} AND e.created_by = $1"), 2),
        );
        let filtered = FilterBuilder::new(EXERCISE_FILTERS)
            .with_alias("e")
            .build(&base, filters, start_index);
        let sql = format!(
            "{} ORDER BY e.name ASC NULLS LAST, e.id ASC",
            filtered.sql
        );

        let mut query = sqlx::query(&sql);
        if let Some(owner_id) = owner_id {
            query = query.bind(owner_id);
        }
        for value in filtered.values {
            query = query.bind(value);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list public exercises: {e}")))?;

        Ok(rows.iter().map(row_to_exercise).collect())
    }

    /// Get an exercise owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or owned by someone else
    pub async fn get_owned(&self, exercise_id: i64, owner_id: i64) -> AppResult<Exercise> {
        let row = sqlx::query(
            r"
            SELECT id, created_by, name, description, category, muscle_group, difficulty,
                   is_private, created_at
            FROM exercises
            WHERE id = $1 AND created_by = $2
            ",
        )
        .bind(exercise_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get exercise: {e}")))?;

        row.as_ref()
            .map(row_to_exercise)
            .ok_or_else(|| AppError::not_found(EXERCISE))
    }

    /// Get a public exercise by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or private
    pub async fn get_public(&self, exercise_id: i64) -> AppResult<Exercise> {
        let sql = format!("{PUBLIC_EXERCISES_BASE} AND e.id = $1");
        let row = sqlx::query(&sql)
            .bind(exercise_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get public exercise: {e}")))?;

        row.as_ref()
            .map(row_to_exercise)
            .ok_or_else(|| AppError::not_found(EXERCISE))
    }

    /// Create an exercise owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` without a name, or a database error
    pub async fn create(&self, owner_id: i64, exercise: &NewExercise) -> AppResult<Exercise> {
        let name = exercise
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::missing_field("Exercise name is required"))?;

        let row = sqlx::query(
            r"
            INSERT INTO exercises (created_by, name, name_folded, description, category,
                                   muscle_group, difficulty, is_private, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, created_by, name, description, category, muscle_group, difficulty,
                      is_private, created_at
            ",
        )
        .bind(owner_id)
        .bind(name)
        .bind(fold_case(name))
        .bind(exercise.description.as_deref())
        .bind(exercise.category.as_deref())
        .bind(exercise.muscle_group.as_deref())
        .bind(exercise.difficulty.as_deref())
        .bind(exercise.is_private.unwrap_or(true))
        .bind(now_timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercise: {e}")))?;

        let created = row_to_exercise(&row);
        debug!(exercise_id = created.id, owner_id, "Exercise created");
        Ok(created)
    }

    /// Merge-update an exercise owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or owned by someone else, `InvalidInput`
    /// for a blank name, or a database error
    pub async fn update(
        &self,
        exercise_id: i64,
        owner_id: i64,
        update: &ExerciseUpdate,
    ) -> AppResult<Exercise> {
        let name = match update.name.as_deref().map(str::trim) {
            Some("") => return Err(AppError::invalid_input("Exercise name cannot be empty")),
            other => other,
        };

        let row = sqlx::query(
            r"
            UPDATE exercises
            SET name = COALESCE($1, name),
                name_folded = COALESCE($2, name_folded),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                muscle_group = COALESCE($5, muscle_group),
                difficulty = COALESCE($6, difficulty),
                is_private = COALESCE($7, is_private)
            WHERE id = $8 AND created_by = $9
            RETURNING id, created_by, name, description, category, muscle_group, difficulty,
                      is_private, created_at
            ",
        )
        .bind(name)
        .bind(name.map(fold_case))
        .bind(update.description.as_deref())
        .bind(update.category.as_deref())
        .bind(update.muscle_group.as_deref())
        .bind(update.difficulty.as_deref())
        .bind(update.is_private)
        .bind(exercise_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update exercise: {e}")))?;

        row.as_ref()
            .map(row_to_exercise)
            .ok_or_else(|| AppError::not_found(EXERCISE))
    }

    /// Delete an exercise owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if absent or owned by someone else, `InvalidInput`
    /// if a workout still references it, or a database error
    pub async fn delete(&self, exercise_id: i64, owner_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1 AND created_by = $2")
            .bind(exercise_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey) => {
                    AppError::invalid_input(messages::EXERCISE_IN_USE)
                }
                _ => AppError::database(format!("Failed to delete exercise: {e}")),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(EXERCISE));
        }
        Ok(())
    }
}

const PUBLIC_EXERCISES_BASE: &str = r"
    SELECT e.id, e.created_by, e.name, e.description, e.category, e.muscle_group,
           e.difficulty, e.is_private, e.created_at, u.username
    FROM exercises e
    JOIN users u ON u.id = e.created_by
    WHERE e.is_private = 0";

fn row_to_exercise(r: &SqliteRow) -> Exercise {
    Exercise {
        id: r.get("id"),
        created_by: r.get("created_by"),
        name: r.get("name"),
        description: r.get("description"),
        category: r.get("category"),
        muscle_group: r.get("muscle_group"),
        difficulty: r.get("difficulty"),
        is_private: r.get("is_private"),
        created_at: r.get("created_at"),
        // Only present on joined public queries
        username: r.try_get("username").ok(),
    }
}
