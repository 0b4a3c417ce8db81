// ABOUTME: Exercise models: stored record, creation payload, and partial update
// ABOUTME: Exercises are owner-scoped with a private/public visibility flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use serde::{Deserialize, Serialize};

/// Stored exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Primary key
    pub id: i64,
    /// Owning user
    pub created_by: i64,
    /// Exercise name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Category (strength, cardio, ...)
    pub category: Option<String>,
    /// Primary muscle group
    pub muscle_group: Option<String>,
    /// Difficulty label
    pub difficulty: Option<String>,
    /// Hidden from public listings when true
    pub is_private: bool,
    /// When the exercise was created (ISO 8601)
    pub created_at: String,
    /// Owner's username, present on public listings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub username: Option<String>,
}

/// Payload for creating an exercise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExercise {
    /// Exercise name (required)
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Primary muscle group
    pub muscle_group: Option<String>,
    /// Difficulty label
    pub difficulty: Option<String>,
    /// Visibility, private unless stated otherwise
    pub is_private: Option<bool>,
}

/// Partial exercise update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New muscle group
    pub muscle_group: Option<String>,
    /// New difficulty
    pub difficulty: Option<String>,
    /// New visibility
    pub is_private: Option<bool>,
}
