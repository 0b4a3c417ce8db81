// ABOUTME: SQLite connection management, schema migrations, and repository accessors
// ABOUTME: Owns the pool and hands out per-entity managers that share it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! # Database Management
//!
//! One `SqlitePool` backs every repository. Managers are cheap to construct (they
//! clone the pool handle) and each owns the SQL for a single entity.

mod exercises;
mod favorites;
/// Whitelisted filter clause builder for list endpoints
pub mod filters;
mod history;
/// RAII transaction guard
pub mod transactions;
mod users;
mod weight;
mod workouts;

pub use exercises::ExerciseManager;
pub use favorites::FavoriteManager;
pub use history::HistoryManager;
pub use users::{NewUser, UserManager};
pub use weight::WeightManager;
pub use workouts::WorkoutManager;

use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Format a timestamp the way it is stored (RFC 3339, UTC, millisecond precision)
///
/// A single fixed format keeps stored timestamps lexicographically comparable, which
/// the date-window queries rely on.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in storage format
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now())
}

/// Database handle shared by all repositories
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// File databases (and their parent directory) are created if missing. In-memory databases are limited to a
    /// single pooled connection, since every `SQLite` memory connection is its own
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let is_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        if !is_memory {
            if let Some(parent) = options
                .get_filename()
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool_options = if is_memory {
            // Closing the only connection would drop the whole database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database_url = %database_url, "Database initialized");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// User and profile repository
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Exercise repository
    #[must_use]
    pub fn exercises(&self) -> ExerciseManager {
        ExerciseManager::new(self.pool.clone())
    }

    /// Workout aggregate repository
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }

    /// Workout completion log
    #[must_use]
    pub fn history(&self) -> HistoryManager {
        HistoryManager::new(self.pool.clone())
    }

    /// Weight log
    #[must_use]
    pub fn weight(&self) -> WeightManager {
        WeightManager::new(self.pool.clone())
    }

    /// Favorite workouts
    #[must_use]
    pub fn favorites(&self) -> FavoriteManager {
        FavoriteManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE` statement fails
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!(statements = SCHEMA.len(), "Schema migrations applied");
        Ok(())
    }
}

/// Idempotent schema, applied in order (referenced tables first)
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        weight_kg REAL,
        height_cm REAL,
        target_weight_kg REAL,
        fitness_level TEXT,
        weekly_goal INTEGER,
        date_of_birth TEXT,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS exercises (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_by INTEGER NOT NULL REFERENCES users(id),
        name TEXT NOT NULL,
        name_folded TEXT NOT NULL,
        description TEXT,
        category TEXT,
        muscle_group TEXT,
        difficulty TEXT,
        is_private BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS workouts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_by INTEGER NOT NULL REFERENCES users(id),
        name TEXT NOT NULL,
        name_folded TEXT NOT NULL,
        description TEXT,
        description_folded TEXT,
        is_private BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS workout_exercises (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
        exercise_id INTEGER NOT NULL REFERENCES exercises(id),
        created_by INTEGER NOT NULL REFERENCES users(id),
        position INTEGER NOT NULL,
        sets INTEGER,
        reps INTEGER,
        duration_minutes INTEGER,
        notes TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS workout_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
        completed_at TEXT NOT NULL,
        notes TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS weight_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        weight_kg REAL NOT NULL,
        recorded_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS favorite_workouts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        UNIQUE (user_id, workout_id)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_exercises_owner ON exercises(created_by)",
    "CREATE INDEX IF NOT EXISTS idx_workouts_owner ON workouts(created_by)",
    "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id, position)",
    "CREATE INDEX IF NOT EXISTS idx_workout_history_user ON workout_history(user_id, completed_at)",
    "CREATE INDEX IF NOT EXISTS idx_weight_history_user ON weight_history(user_id, recorded_at)",
];
