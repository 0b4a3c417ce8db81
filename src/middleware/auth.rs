// ABOUTME: Bearer token authentication middleware for protected routes
// ABOUTME: Validates the JWT and attaches the caller identity to request extensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Span;

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Identity of the caller, inserted by [`require_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id from the token subject
    pub user_id: i64,
    /// Email claim
    pub email: String,
    /// Username claim
    pub username: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(resources: &ServerResources, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
    let token = bearer_token(headers).ok_or_else(AppError::auth_required)?;
    let claims = resources.auth_manager.validate_token(token)?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id()?,
        email: claims.email,
        username: claims.username,
    })
}

/// Reject requests without a valid bearer token
///
/// ```rust,no_run
/// use axum::{middleware, routing::get, Router};
/// use ironlog_server::middleware::auth::require_auth;
/// use ironlog_server::resources::ServerResources;
/// use std::sync::Arc;
///
/// # async fn handler() -> &'static str { "" }
/// # fn example(resources: Arc<ServerResources>) {
/// let app: Router = Router::new()
///     .route("/profile", get(handler))
///     .layer(middleware::from_fn_with_state(resources, require_auth));
/// # }
/// ```
pub async fn require_auth(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Response {
    let authenticated = authenticate(&resources, req.headers());
    match authenticated {
        Ok(user) => {
            Span::current().record("user_id", user.user_id);
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            AppLogger::log_security_event("auth_rejected", &e.message, None);
            e.into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(AppError::auth_required)
    }
}
