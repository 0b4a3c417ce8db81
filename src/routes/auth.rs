// ABOUTME: Registration and login route handlers
// ABOUTME: Validates credentials, hashes passwords with bcrypt, and issues JWT session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Authentication routes
//!
//! `POST /register` and `POST /login` both answer with `{message, token}`. Login
//! failures never reveal whether the email or the password was wrong.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::JsonBody;
use crate::auth::is_valid_email;
use crate::constants::{limits, messages};
use crate::database::NewUser;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Registration request
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    /// Email address
    pub email: Option<String>,
    /// Display name
    pub username: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// Successful register/login reply
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Confirmation message
    pub message: String,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Registration fields after validation
#[derive(Debug, PartialEq, Eq)]
struct ValidRegistration {
    email: String,
    username: String,
    password: String,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Check a registration request and normalize its fields
fn validate_registration(request: &RegisterRequest) -> AppResult<ValidRegistration> {
    let (Some(email), Some(username), Some(password)) = (
        non_blank(request.email.as_ref()),
        non_blank(request.username.as_ref()),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::missing_field(messages::REGISTER_FIELDS_REQUIRED));
    };

    let email = email.to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::invalid_input(messages::INVALID_EMAIL));
    }
    if username.chars().count() < limits::MIN_USERNAME_LENGTH {
        return Err(AppError::invalid_input(messages::USERNAME_TOO_SHORT));
    }
    if password.chars().count() < limits::MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(messages::PASSWORD_TOO_SHORT));
    }

    Ok(ValidRegistration {
        email,
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the register and login routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/register", post(Self::handle_register))
            .route("/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let valid = validate_registration(&request)?;
        let users = resources.database.users();

        if users.exists(&valid.email, &valid.username).await? {
            AppLogger::log_auth_event(&valid.email, "register", false, Some("duplicate"));
            return Err(AppError::already_exists(messages::USER_ALREADY_EXISTS));
        }

        let password_hash = resources.auth_manager.hash_password(&valid.password).await?;
        let user = users
            .create(&NewUser {
                email: valid.email,
                username: valid.username,
                password_hash,
            })
            .await?;

        let token = resources
            .auth_manager
            .generate_token(user.id, &user.email, &user.username)?;

        AppLogger::log_auth_event(&user.email, "register", true, None);
        info!(user_id = user.id, "User registered");

        let response = TokenResponse {
            message: messages::USER_REGISTERED.to_owned(),
            token,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Response, AppError> {
        let (Some(email), Some(password)) = (
            non_blank(request.email.as_ref()),
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::missing_field(messages::LOGIN_FIELDS_REQUIRED));
        };
        let email = email.to_lowercase();

        let Some(user) = resources.database.users().get_by_email(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS));
        };

        if !resources
            .auth_manager
            .verify_password(password, &user.password_hash)
            .await?
        {
            AppLogger::log_auth_event(&email, "login", false, Some("wrong password"));
            return Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS));
        }

        let token = resources
            .auth_manager
            .generate_token(user.id, &user.email, &user.username)?;
        AppLogger::log_auth_event(&email, "login", true, None);

        let response = TokenResponse {
            message: messages::LOGIN_SUCCESSFUL.to_owned(),
            token,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
