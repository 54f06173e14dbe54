//! CDN purge web front-end
//!
//! Serves the operator login and the cache purge endpoint on top of
//! `cdn-purge-core`.

mod cli;
mod config;
mod error;
mod logging;
mod routes;
mod state;

#[cfg(test)]
mod test_utils;

use std::io::BufRead;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use cdn_purge_core::crypto::PasswordHash;
use cli::{CommandLine, Commands};
use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    match commands.command.unwrap_or(Commands::Serve) {
        Commands::HashPassword => hash_password(),
        Commands::CheckConfig => {
            let config = AppConfig::load(&commands.config)?;
            let state = AppState::from_config(&config)?;
            check_api_token(&state).await?;
            println!("{} is valid", commands.config.display());
            Ok(())
        }
        Commands::Serve => {
            let config = AppConfig::load(&commands.config)?;
            let _guard = logging::init(&config.log)?;
            serve(config).await
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let workers = config.server.worker_count();
    if let Err(e) = check_api_token(&state).await {
        tracing::warn!("{e:#}");
    }

    tracing::info!(
        "Starting CDN purge front-end on {}:{} ({workers} workers, dispatch mode {:?})",
        config.server.bind,
        config.server.port,
        config.cdn.dispatch_mode
    );
    tracing::debug!("Loaded configuration: {config:?}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .workers(workers)
    .bind((config.server.bind.as_str(), config.server.port))
    .with_context(|| format!("Failed to bind {}:{}", config.server.bind, config.server.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ask the CDN whether the configured API token is accepted.
async fn check_api_token(state: &AppState) -> anyhow::Result<()> {
    let active = state
        .api
        .validate_credentials()
        .await
        .with_context(|| format!("Could not verify the {} API token", state.api.id()))?;
    anyhow::ensure!(active, "The {} API token was rejected", state.api.id());
    tracing::info!("{} API token verified", state.api.id());
    Ok(())
}

fn hash_password() -> anyhow::Result<()> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    anyhow::ensure!(!password.is_empty(), "Empty password");
    println!("{}", PasswordHash::new(password));
    Ok(())
}
