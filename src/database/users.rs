// ABOUTME: User account and profile persistence
// ABOUTME: Registration lookups, uniqueness checks, and merge-update of profile attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use chrono::{NaiveDate, Utc};
use ironlog_core::errors::database::{constraint_violation, ConstraintViolation};
use ironlog_core::models::{calculate_age, ProfileUpdate, User, UserProfile};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::now_timestamp;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};

/// Fields required to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Normalized (lowercased, trimmed) email
    pub email: String,
    /// Display name
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
}

/// User database operations manager
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether an account already uses this email or username
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn exists(&self, email: &str, username: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE email = $1 OR username = $2 LIMIT 1")
            .bind(email)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check user existence: {e}")))?;
        Ok(row.is_some())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email or username is taken, or a
    /// database error
    pub async fn create(&self, new_user: &NewUser) -> AppResult<User> {
        let now = now_timestamp();
        let result = sqlx::query(
            r"
            INSERT INTO users (email, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| match constraint_violation(&e) {
            // Lost a race with a concurrent registration
            Some(ConstraintViolation::Unique) => AppError::already_exists(messages::USER_ALREADY_EXISTS),
            _ => AppError::database(format!("Failed to create user: {e}")),
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: new_user.email.clone(),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: now,
        })
    }

    /// Look up a user by normalized email
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, username, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            email: r.get("email"),
            username: r.get("username"),
            password_hash: r.get("password_hash"),
            created_at: r.get("created_at"),
        }))
    }

    /// Get a user's profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist, or a database error
    pub async fn get_profile(&self, user_id: i64) -> AppResult<UserProfile> {
        let row = sqlx::query(
            r"
            SELECT id, username, email, weight_kg, height_cm, target_weight_kg,
                   fitness_level, weekly_goal, date_of_birth, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.map(|r| row_to_profile(&r))
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Merge-update a user's profile
    ///
    /// Absent and `null` fields keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist, `ResourceAlreadyExists`
    /// if the new username is taken, or a database error
    pub async fn update_profile(
        &self,
        user_id: i64,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let row = sqlx::query(
            r"
            UPDATE users
            SET username = COALESCE($1, username),
                weight_kg = COALESCE($2, weight_kg),
                height_cm = COALESCE($3, height_cm),
                target_weight_kg = COALESCE($4, target_weight_kg),
                fitness_level = COALESCE($5, fitness_level),
                weekly_goal = COALESCE($6, weekly_goal),
                date_of_birth = COALESCE($7, date_of_birth)
            WHERE id = $8
            RETURNING id, username, email, weight_kg, height_cm, target_weight_kg,
                      fitness_level, weekly_goal, date_of_birth, created_at
            ",
        )
        .bind(update.username.as_deref())
        .bind(update.weight_kg)
        .bind(update.height_cm)
        .bind(update.target_weight_kg)
        .bind(update.fitness_level.as_deref())
        .bind(update.weekly_goal)
        .bind(update.date_of_birth)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintViolation::Unique) => AppError::already_exists("Username already exists"),
            _ => AppError::database(format!("Failed to update profile: {e}")),
        })?;

        row.map(|r| row_to_profile(&r))
            .ok_or_else(|| AppError::not_found("User"))
    }
}

fn row_to_profile(r: &SqliteRow) -> UserProfile {
    let date_of_birth: Option<NaiveDate> = r.get("date_of_birth");
    let today = Utc::now().date_naive();
    UserProfile {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        weight_kg: r.get("weight_kg"),
        height_cm: r.get("height_cm"),
        target_weight_kg: r.get("target_weight_kg"),
        fitness_level: r.get("fitness_level"),
        weekly_goal: r.get("weekly_goal"),
        date_of_birth,
        age: date_of_birth.and_then(|dob| calculate_age(dob, today)),
        created_at: r.get("created_at"),
    }
}
