// ABOUTME: Append-only log records: workout completions, weight entries, favorites
// ABOUTME: Rows are never updated in place once written
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use serde::{Deserialize, Serialize};

/// A completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutHistoryRecord {
    /// Primary key
    pub id: i64,
    /// User who completed the workout
    pub user_id: i64,
    /// Completed workout
    pub workout_id: i64,
    /// Workout name, joined in on reads
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub workout_name: Option<String>,
    /// When the workout was completed (ISO 8601)
    pub completed_at: String,
    /// Optional notes
    pub notes: Option<String>,
}

/// A body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Primary key
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// When the weight was recorded (ISO 8601)
    pub recorded_at: String,
}

/// A (user, workout) favorite pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteWorkout {
    /// Primary key
    pub id: i64,
    /// User who favorited
    pub user_id: i64,
    /// Favorited workout
    pub workout_id: i64,
    /// When the favorite was created (ISO 8601)
    pub created_at: String,
}

/// A favorited workout as listed to its user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritedWorkout {
    /// Workout ID
    pub id: i64,
    /// Workout owner
    pub created_by: i64,
    /// Workout name
    pub name: String,
    /// Workout description
    pub description: Option<String>,
    /// Workout visibility
    pub is_private: bool,
    /// When the favorite was created (ISO 8601)
    pub favorited_at: String,
}
