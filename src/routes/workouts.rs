// ABOUTME: Workout aggregate route handlers: owner-scoped CRUD and public listings
// ABOUTME: Every workout is returned with its ordered exercise entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Workout routes
//!
//! All workout routes require a bearer token. Writes go through the aggregate
//! repository, which applies the workout row and its entries in one transaction.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ironlog_core::models::{NewWorkout, WorkoutUpdate};

use super::{JsonBody, MessageResponse, PathParam, QueryParams};
use crate::constants::messages;
use crate::database::filters::FilterParams;
use crate::errors::AppError;
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/workouts/private",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/workouts/user",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/workouts/private/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/workouts/user/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/workouts/public", get(Self::handle_list_public))
            .route("/workouts/public/:id", get(Self::handle_get_public))
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .with_state(resources)
    }

    /// Handle GET /workouts/private - List the caller's workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        QueryParams(filters): QueryParams<FilterParams>,
    ) -> Result<Response, AppError> {
        let workouts = resources
            .database
            .workouts()
            .list_owned(user.user_id, &filters)
            .await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle POST /workouts/private - Create a workout with its entries
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(body): JsonBody<NewWorkout>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .database
            .workouts()
            .create(user.user_id, &body)
            .await?;
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// Handle GET /workouts/private/:id - Get one of the caller's workouts
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .database
            .workouts()
            .get_owned(id, user.user_id)
            .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle PUT /workouts/private/:id - Merge-update a workout
    ///
    /// A non-empty `exercises` list replaces every entry.
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(id): PathParam<i64>,
        JsonBody(body): JsonBody<WorkoutUpdate>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .database
            .workouts()
            .update(id, user.user_id, &body)
            .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle DELETE /workouts/private/:id - Delete a workout and its entries
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .workouts()
            .delete(id, user.user_id)
            .await?;
        Ok((StatusCode::OK, Json(MessageResponse::new(messages::WORKOUT_DELETED))).into_response())
    }

    /// Handle GET /workouts/public - List public workouts
    async fn handle_list_public(
        State(resources): State<Arc<ServerResources>>,
        QueryParams(filters): QueryParams<FilterParams>,
    ) -> Result<Response, AppError> {
        let workouts = resources.database.workouts().list_public(&filters).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle GET /workouts/public/:id - Get a public workout
    async fn handle_get_public(
        State(resources): State<Arc<ServerResources>>,
        PathParam(id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        let workout = resources.database.workouts().get_public(id).await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }
}
