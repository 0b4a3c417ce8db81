// ABOUTME: Global HTTP layer stack: request ids, tracing spans, timeout, body limit, CORS
// ABOUTME: Every request gets an x-request-id that appears in its span and its response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{field, info_span, Span};

use super::cors::setup_cors;
use crate::config::HttpConfig;

/// Header carrying the request correlation id
#[must_use]
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Create the span every request runs in
///
/// `user_id` is filled in by the auth middleware once the caller is known.
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(request_id_header())
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        user_id = field::Empty,
    )
}

/// Wrap a router in the global layers
///
/// Outermost first: request id, trace span, timeout, body limit, CORS.
#[must_use]
pub fn with_http_layers(router: Router, config: &HttpConfig) -> Router {
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        // Re-box the limit layer's body so the timeout layer can build its empty 408 body
        .layer(MapResponseBodyLayer::new(Body::new))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(setup_cors(config));

    router.layer(layers)
}
