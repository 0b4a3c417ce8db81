// ABOUTME: Core data models and types for the Ironlog fitness API
// ABOUTME: Re-exports User, Exercise, Workout and activity log records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! # Data Models
//!
//! Records returned by the repositories and the request payloads that create or
//! update them. Timestamps are RFC 3339 strings in UTC, as stored.
//!
//! ## Core Models
//!
//! - `User` / `UserProfile`: account identity and profile attributes
//! - `Exercise`: owner-scoped exercise definition with a visibility flag
//! - `Workout`: aggregate root owning an ordered list of `WorkoutExerciseEntry`
//! - `WorkoutHistoryRecord`, `WeightEntry`, `FavoriteWorkout`: append-only logs

mod exercise;
mod logs;
mod user;
mod workout;

pub use exercise::{Exercise, ExerciseUpdate, NewExercise};
pub use logs::{FavoriteWorkout, FavoritedWorkout, WeightEntry, WorkoutHistoryRecord};
pub use user::{calculate_age, ProfileUpdate, User, UserProfile};
pub use workout::{NewWorkout, NewWorkoutExercise, Workout, WorkoutExerciseEntry, WorkoutUpdate};
