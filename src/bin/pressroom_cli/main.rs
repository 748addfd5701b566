//! pressroom-cli: headless storefront API command-line client
//! Modularized for maintainability; drives the same gateway traits the
//! admin editors use.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod error;
mod handlers;
mod io;
mod print;

use std::fs;
use std::sync::Arc;

use clap::Parser;

use pressroom::config;
use pressroom::infra::http::ApiClient;
use pressroom::infra::telemetry;

use args::{Cli, Commands};
use error::CliError;
use handlers::{navigation, pages, render, search, settings, uploads};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config_file.as_deref(), &cli.overrides)?;
    telemetry::init(&cfg.logging)?;

    let key = resolve_key(&cli, &cfg)?;
    let client = Arc::new(ApiClient::new(&cfg.api.site, key)?);

    match cli.command {
        Commands::Navigation(cmd) => navigation::handle(&client, cmd.action).await?,
        Commands::Pages(cmd) => pages::handle(&client, cmd.action).await?,
        Commands::Settings(cmd) => settings::handle(&client, cmd.action).await?,
        Commands::Search(cmd) => search::handle(&client, &cfg.search, cmd.action).await?,
        Commands::Uploads(cmd) => uploads::handle(&client, cmd.action).await?,
        Commands::Render(cmd) => render::handle(&client, &cfg.render, cmd.action).await?,
    }

    Ok(())
}

/// Key precedence: --key-file, then PRESSROOM_API_KEY, then the config
/// file. All absent is fine; the client simply sends no Authorization.
fn resolve_key(cli: &Cli, cfg: &config::Settings) -> Result<Option<String>, CliError> {
    if let Some(path) = &cli.key_file {
        let key = fs::read_to_string(path)
            .map_err(CliError::KeyFile)?
            .trim()
            .to_string();
        return Ok(Some(key));
    }
    if let Some(key) = &cli.api_key_env {
        return Ok(Some(key.clone()));
    }
    Ok(cfg.api.key.clone())
}
