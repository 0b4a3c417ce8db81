// ABOUTME: Ironlog API server binary
// ABOUTME: Loads configuration, opens the database, wires resources, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! # Ironlog Server Binary
//!
//! Configuration comes from the environment; `--http-port` and `--database-url`
//! override the corresponding variables.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use ironlog_server::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    llm::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider},
    logging,
    resources::ServerResources,
    server::IronlogServer,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "ironlog-server")]
#[command(about = "Ironlog - fitness tracking REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;

    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours,
    );
    info!("Authentication manager initialized");

    let llm_provider =
        OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from(&config.trainer))?;
    info!(model = %config.trainer.model, "Trainer LLM provider initialized");
    let llm_provider: Arc<dyn LlmProvider> = Arc::new(llm_provider);

    // Reachability is only reported; the server starts either way
    let probe = Arc::clone(&llm_provider);
    tokio::spawn(async move {
        match probe.health_check().await {
            Ok(true) => info!(provider = probe.name(), "Trainer LLM endpoint reachable"),
            Ok(false) => warn!(provider = probe.name(), "Trainer LLM endpoint rejected the health check"),
            Err(e) => warn!(provider = probe.name(), error = %e, "Trainer LLM endpoint unreachable"),
        }
    });

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
        llm_provider,
    ));

    if let Err(e) = IronlogServer::new(resources).run(port).await {
        error!("Server error: {e}");
        return Err(e);
    }
    Ok(())
}
