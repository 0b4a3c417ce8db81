// ABOUTME: Re-export of the domain models defined in ironlog-core
// ABOUTME: Lets binaries and tests import models from the server crate directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

pub use ironlog_core::models::*;
