// ABOUTME: Favorite workout route handlers and the favorites CSV download
// ABOUTME: Favoriting is idempotent and limited to workouts the caller can see
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use super::{MessageResponse, PathParam};
use crate::constants::{export, messages};
use crate::errors::AppError;
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;
use crate::services::export::export_favorites;

/// Favorite workout routes implementation
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create the favorites routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts/favorite", get(Self::handle_list))
            .route(
                "/workouts/favorite/:id",
                post(Self::handle_add).delete(Self::handle_remove),
            )
            .route("/workouts/favorite/export/csv", get(Self::handle_export_csv))
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .with_state(resources)
    }

    /// Handle GET /workouts/favorite - List favorited workouts, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let favorites = resources.database.favorites().list(user.user_id).await?;
        Ok((StatusCode::OK, Json(favorites)).into_response())
    }

    /// Handle POST /workouts/favorite/:id - Favorite a workout
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(workout_id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        let favorite = resources
            .database
            .favorites()
            .add(user.user_id, workout_id)
            .await?;
        info!(user_id = user.user_id, workout_id, "Workout favorited");
        Ok((StatusCode::CREATED, Json(favorite)).into_response())
    }

    /// Handle DELETE /workouts/favorite/:id - Remove a favorite
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(workout_id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .favorites()
            .remove(user.user_id, workout_id)
            .await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::WORKOUT_UNFAVORITED)),
        )
            .into_response())
    }

    /// Handle GET /workouts/favorite/export/csv - Download favorites as CSV
    async fn handle_export_csv(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let csv = export_favorites(
            &resources.database.favorites(),
            &resources.database.workouts(),
            user.user_id,
        )
        .await?;

        let disposition = format!(
            "attachment; filename=\"{}\"",
            export::FAVORITES_CSV_FILENAME
        );
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    }
}
