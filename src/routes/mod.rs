// ABOUTME: Route module organization for the Ironlog HTTP API
// ABOUTME: Shared extractors plus one XxxRoutes struct per area, merged into a single router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Route module for the Ironlog API
//!
//! Each area exposes a `routes(resources)` constructor. Handlers are thin: they
//! extract input, call a repository or service, and shape the JSON reply. Every
//! failure is an [`AppError`], so extractor rejections use the same `{message, status}`
//! body as handler errors.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts};
use axum::Router;
use serde::Serialize;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Registration and login
pub mod auth;
/// Authenticated landing endpoint
pub mod dashboard;
/// Exercise CRUD and public listings
pub mod exercises;
/// Favorite workouts and CSV export
pub mod favorites;
/// Liveness endpoint
pub mod health;
/// Workout completion log
pub mod history;
/// Profile read and update
pub mod profile;
/// Progress summary
pub mod progress;
/// Trainer chat
pub mod trainer;
/// Weight log
pub mod weight;
/// Workout aggregate CRUD and public listings
pub mod workouts;

pub use auth::AuthRoutes;
pub use dashboard::DashboardRoutes;
pub use exercises::ExerciseRoutes;
pub use favorites::FavoriteRoutes;
pub use health::HealthRoutes;
pub use history::HistoryRoutes;
pub use profile::ProfileRoutes;
pub use progress::ProgressRoutes;
pub use trainer::TrainerRoutes;
pub use weight::WeightRoutes;
pub use workouts::WorkoutRoutes;

/// JSON body extractor whose rejection is an [`AppError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path extractor whose rejection is an [`AppError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string extractor whose rejection is an [`AppError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// `{ "message": ... }` reply used by deletes and simple acknowledgements
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Assemble every route group into one router
///
/// Global layers (tracing, timeout, body limit, CORS) are applied by the server.
#[must_use]
pub fn api_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(DashboardRoutes::routes(Arc::clone(resources)))
        .merge(ExerciseRoutes::routes(Arc::clone(resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(resources)))
        .merge(FavoriteRoutes::routes(Arc::clone(resources)))
        .merge(HistoryRoutes::routes(Arc::clone(resources)))
        .merge(WeightRoutes::routes(Arc::clone(resources)))
        .merge(ProfileRoutes::routes(Arc::clone(resources)))
        .merge(ProgressRoutes::routes(Arc::clone(resources)))
        .merge(TrainerRoutes::routes(Arc::clone(resources)))
}
