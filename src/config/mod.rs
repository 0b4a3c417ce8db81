// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration with typed values and startup validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Configuration module for the Ironlog server
//!
//! - **Environment**: `ServerConfig` loaded from environment variables
//! - **Types**: enums shared by configuration and the services that read it

/// Environment and server configuration
pub mod environment;
/// Configuration type definitions
pub mod types;

pub use environment::{AuthConfig, HttpConfig, ServerConfig, TrainerConfig};
pub use types::{Environment, ProgressWindow};
