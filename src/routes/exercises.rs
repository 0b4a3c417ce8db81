// ABOUTME: Exercise route handlers: owner-scoped CRUD and public listings
// ABOUTME: /exercises/private and /exercises/user are equivalent owner-scoped prefixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Exercise routes
//!
//! Owner-scoped routes require a bearer token and only ever touch the caller's rows;
//! another user's exercise is reported as not found. Public routes are open and only
//! return exercises whose owner marked them public.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ironlog_core::models::{ExerciseUpdate, NewExercise};
use tracing::info;

use super::{JsonBody, MessageResponse, PathParam, QueryParams};
use crate::constants::messages;
use crate::database::filters::FilterParams;
use crate::errors::AppError;
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;

/// Exercise routes implementation
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let owned = Router::new()
            .route(
                "/exercises/private",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/exercises/user",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/exercises/private/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/exercises/user/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth));

        let public = Router::new()
            .route("/exercises/public", get(Self::handle_list_public))
            .route("/exercises/public/:id", get(Self::handle_get_public))
            .route(
                "/exercises/users/:user_id/public",
                get(Self::handle_list_user_public),
            );

        owned.merge(public).with_state(resources)
    }

    /// Handle GET /exercises/private - List the caller's exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        QueryParams(filters): QueryParams<FilterParams>,
    ) -> Result<Response, AppError> {
        let exercises = resources
            .database
            .exercises()
            .list_owned(user.user_id, &filters)
            .await?;
        Ok((StatusCode::OK, Json(exercises)).into_response())
    }

    /// Handle POST /exercises/private - Create an exercise
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(body): JsonBody<NewExercise>,
    ) -> Result<Response, AppError> {
        let exercise = resources
            .database
            .exercises()
            .create(user.user_id, &body)
            .await?;
        info!(user_id = user.user_id, exercise_id = exercise.id, "Exercise created");
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }

    /// Handle GET /exercises/private/:id - Get one of the caller's exercises
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        let exercise = resources
            .database
            .exercises()
            .get_owned(id, user.user_id)
            .await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    /// Handle PUT /exercises/private/:id - Merge-update an exercise
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(id): PathParam<i64>,
        JsonBody(body): JsonBody<ExerciseUpdate>,
    ) -> Result<Response, AppError> {
        let exercise = resources
            .database
            .exercises()
            .update(id, user.user_id, &body)
            .await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    /// Handle DELETE /exercises/private/:id - Delete an exercise
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        PathParam(id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .exercises()
            .delete(id, user.user_id)
            .await?;
        info!(user_id = user.user_id, exercise_id = id, "Exercise deleted");
        Ok((StatusCode::OK, Json(MessageResponse::new(messages::EXERCISE_DELETED))).into_response())
    }

    /// Handle GET /exercises/public - List every public exercise
    async fn handle_list_public(
        State(resources): State<Arc<ServerResources>>,
        QueryParams(filters): QueryParams<FilterParams>,
    ) -> Result<Response, AppError> {
        let exercises = resources
            .database
            .exercises()
            .list_public(None, &filters)
            .await?;
        Ok((StatusCode::OK, Json(exercises)).into_response())
    }

    /// Handle GET /exercises/public/:id - Get a public exercise
    async fn handle_get_public(
        State(resources): State<Arc<ServerResources>>,
        PathParam(id): PathParam<i64>,
    ) -> Result<Response, AppError> {
        let exercise = resources.database.exercises().get_public(id).await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    /// Handle GET /exercises/users/:user_id/public - List one user's public exercises
    async fn handle_list_user_public(
        State(resources): State<Arc<ServerResources>>,
        PathParam(user_id): PathParam<i64>,
        QueryParams(filters): QueryParams<FilterParams>,
    ) -> Result<Response, AppError> {
        let exercises = resources
            .database
            .exercises()
            .list_public(Some(user_id), &filters)
            .await?;
        Ok((StatusCode::OK, Json(exercises)).into_response())
    }
}
