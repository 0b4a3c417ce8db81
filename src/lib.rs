// ABOUTME: Main library entry point for the Ironlog fitness tracking API
// ABOUTME: Exposes repositories, services, middleware, and routes used by the server binary and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

#![deny(unsafe_code)]

//! # Ironlog Server
//!
//! A REST backend for tracking exercises, workouts, body weight, and progress, with
//! an LLM-backed trainer endpoint.
//!
//! ## Architecture
//!
//! - **database**: one manager per entity over a shared `SQLite` pool, plus the
//!   whitelisted filter builder and the transaction guard
//! - **services**: progress summaries, favorites CSV export, trainer chat
//! - **middleware**: request tracing, bearer auth, trainer rate limit and validation
//! - **routes**: thin axum handlers grouped per area
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ironlog_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Ironlog configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuing/validation and password hashing
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Repositories over `SQLite`
pub mod database;

/// Unified error handling
pub mod errors;

/// LLM provider abstraction and the OpenAI-compatible client
pub mod llm;

/// Tracing subscriber setup and structured log helpers
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Server assembly and serve loop
pub mod server;

/// Domain services
pub mod services;

/// Core data models
pub mod models;
