// ABOUTME: Client-facing response and error messages
// ABOUTME: Shared by route handlers and integration tests so wording stays in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

/// Registration succeeded
pub const USER_REGISTERED: &str = "User registered successfully";
/// Login succeeded
pub const LOGIN_SUCCESSFUL: &str = "Login successful";
/// Register body incomplete
pub const REGISTER_FIELDS_REQUIRED: &str = "Email, username, and password are required";
/// Login body incomplete
pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required";
/// Duplicate email or username
pub const USER_ALREADY_EXISTS: &str = "Username or email already exists";
/// Bad credentials (deliberately does not say which part was wrong)
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Email failed validation
pub const INVALID_EMAIL: &str = "Please provide a valid email";
/// Username too short
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters long";
/// Password too short
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";

/// Exercise deleted
pub const EXERCISE_DELETED: &str = "Exercise deleted successfully";
/// Exercise still referenced by a workout
pub const EXERCISE_IN_USE: &str = "Exercise is used by one or more workouts";
/// Workout deleted
pub const WORKOUT_DELETED: &str = "Workout deleted successfully";
/// Favorite removed
pub const WORKOUT_UNFAVORITED: &str = "Workout unfavorited";

/// Trainer rate limit exhausted
pub const TRAINER_RATE_LIMITED: &str = "Too many requests, try again later.";
/// Trainer request had no JSON body
pub const TRAINER_BODY_REQUIRED: &str = "Request body is required.";
/// Trainer question missing or blank
pub const TRAINER_QUESTION_REQUIRED: &str = "Please, enter your question.";
