// ABOUTME: Workout completion route handlers
// ABOUTME: Records completions of visible workouts and lists the caller's history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::PathParam;
use crate::errors::{AppError, AppResult};
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;

/// Optional body of a completion
#[derive(Debug, Default, Deserialize)]
pub struct CompleteWorkoutRequest {
    /// Free-text notes
    pub notes: Option<String>,
}

impl CompleteWorkoutRequest {
    /// Parse an optional JSON body; an empty body means no notes
    fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))
    }
}

/// Workout history routes implementation
pub struct HistoryRoutes;

impl HistoryRoutes {
    /// Create the history routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/history", get(Self::handle_list))
            .route("/workouts/complete/:id", post(Self::handle_complete))
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .with_state(resources)
    }

    /// Handle GET /workouts/history - List completions, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let history = resources.database.history().list(user.user_id).await?;
        Ok((StatusCode::OK, Json(history)).into_response())
    }

    /// Handle POST /workouts/complete/:id - Record a completion
    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(workout_id): PathParam<i64>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let request = CompleteWorkoutRequest::from_body(&body)?;
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let record = resources
            .database
            .history()
            .record(user.user_id, workout_id, notes)
            .await?;
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }
}
