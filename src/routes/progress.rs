// ABOUTME: Progress summary route handler
// ABOUTME: Parses the window query and delegates to the progress service
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
use chrono::Utc;
use serde::Deserialize;

use super::QueryParams;
use crate::config::ProgressWindow;
use crate::errors::{AppError, AppResult};
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;
use crate::services::progress::{resolve_window, summarize};

/// Query string of `GET /progress/summary`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    /// Lower bound override
    pub start_date: Option<String>,
    /// Upper bound override
    pub end_date: Option<String>,
    /// `all` or `week`
    pub window: Option<String>,
}

impl ProgressQuery {
    fn window_or(&self, default: ProgressWindow) -> AppResult<ProgressWindow> {
        match self.window.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(value) => ProgressWindow::parse(value).ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Invalid window '{value}': expected 'all' or 'week'"
                ))
            }),
        }
    }
}

/// Progress routes implementation
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create the progress route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/progress/summary", get(Self::handle_summary))
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .with_state(resources)
    }

    /// Handle GET /progress/summary
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        QueryParams(query): QueryParams<ProgressQuery>,
    ) -> Result<Response, AppError> {
        let window = query.window_or(resources.config.progress_default_window)?;
        let range = resolve_window(
            window,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            Utc::now(),
        )?;

        let summary = summarize(
            &resources.database.history(),
            &resources.database.weight(),
            user.user_id,
            range,
        )
        .await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults_and_parsing() {
        let query = ProgressQuery::default();
        assert_eq!(query.window_or(ProgressWindow::Week).unwrap(), ProgressWindow::Week);

        let query = ProgressQuery {
            window: Some("all".to_owned()),
            ..ProgressQuery::default()
        };
        assert_eq!(query.window_or(ProgressWindow::Week).unwrap(), ProgressWindow::All);

        let query = ProgressQuery {
            window: Some("month".to_owned()),
            ..ProgressQuery::default()
        };
        assert!(query.window_or(ProgressWindow::All).is_err());
    }
}
