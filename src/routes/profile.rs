// ABOUTME: Profile route handlers
// ABOUTME: Reads the caller's profile with derived age and applies merge-updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ironlog_core::models::{ProfileUpdate, UserProfile};
use serde::Serialize;

use super::weight::validate_weight;
use super::JsonBody;
use crate::constants::{limits, messages};
use crate::errors::{AppError, AppResult};
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;

/// `{ "profile": {...} }`
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The caller's profile
    pub profile: UserProfile,
}

fn validate_update(update: &mut ProfileUpdate) -> AppResult<()> {
    if let Some(username) = update.username.as_mut() {
        let trimmed = username.trim();
        if trimmed.chars().count() < limits::MIN_USERNAME_LENGTH {
            return Err(AppError::invalid_input(messages::USERNAME_TOO_SHORT));
        }
        *username = trimmed.to_owned();
    }
    for weight in [update.weight_kg, update.target_weight_kg].into_iter().flatten() {
        validate_weight(weight)?;
    }
    if update.height_cm.is_some_and(|h| !h.is_finite() || h <= 0.0) {
        return Err(AppError::invalid_input("height_cm must be greater than 0"));
    }
    if update.weekly_goal.is_some_and(|g| g < 0) {
        return Err(AppError::invalid_input("weekly_goal must not be negative"));
    }
    Ok(())
}

/// Profile routes implementation
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create the profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/profile", get(Self::handle_get).put(Self::handle_update))
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .with_state(resources)
    }

    /// Handle GET /profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let profile = resources.database.users().get_profile(user.user_id).await?;
        Ok((StatusCode::OK, Json(ProfileResponse { profile })).into_response())
    }

    /// Handle PUT /profile - Merge-update the caller's profile
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(mut body): JsonBody<ProfileUpdate>,
    ) -> Result<Response, AppError> {
        validate_update(&mut body)?;
        let profile = resources
            .database
            .users()
            .update_profile(user.user_id, &body)
            .await?;
        Ok((StatusCode::OK, Json(ProfileResponse { profile })).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_is_valid() {
        validate_update(&mut ProfileUpdate::default()).unwrap();
    }

    #[test]
    fn test_username_is_trimmed_and_checked() {
        let mut update = ProfileUpdate {
            username: Some("  lifter ".to_owned()),
            ..ProfileUpdate::default()
        };
        validate_update(&mut update).unwrap();
        assert_eq!(update.username.as_deref(), Some("lifter"));

        let mut update = ProfileUpdate {
            username: Some(" ab ".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(validate_update(&mut update).is_err());
    }

    #[test]
    fn test_numeric_fields_are_checked() {
        let mut update = ProfileUpdate {
            height_cm: Some(-180.0),
            ..ProfileUpdate::default()
        };
        assert!(validate_update(&mut update).is_err());

        let mut update = ProfileUpdate {
            weekly_goal: Some(-1),
            ..ProfileUpdate::default()
        };
        assert!(validate_update(&mut update).is_err());
    }
}
