// ABOUTME: Domain service layer for views derived from the repositories
// ABOUTME: Progress summaries, favorites CSV export, and the trainer chat call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Domain service layer
//!
//! Logic that spans more than one repository, or that shapes data for a specific
//! output, lives here so route handlers stay thin.

/// Favorite workouts CSV export
pub mod export;

/// Progress summary window resolution and weight trend
pub mod progress;

/// Trainer question answering through the LLM provider
pub mod trainer;
