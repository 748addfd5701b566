#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use serde_json::json;

use pressroom::application::gateway::SettingsApi;
use pressroom::infra::http::ApiClient;

use crate::args::SettingsCmd;
use crate::error::CliError;
use crate::print::print_json;

pub async fn handle(client: &Arc<ApiClient>, cmd: SettingsCmd) -> Result<(), CliError> {
    match cmd {
        SettingsCmd::Get => get(client).await,
    }
}

async fn get(client: &Arc<ApiClient>) -> Result<(), CliError> {
    let settings = client.settings().await?;
    let social: serde_json::Map<String, serde_json::Value> = settings
        .social_links()
        .into_iter()
        .map(|(network, url)| (network.to_string(), json!(url)))
        .collect();

    print_json(&json!({
        "description": settings.description(),
        "contactPhone": settings.contact_phone(),
        "contactEmail": settings.contact_email(),
        "themeColor": settings.theme_color(),
        "social": social,
    }))
}
