#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use pressroom::application::gateway::SearchApi;
use pressroom::application::search::{SearchController, SearchOutcome};
use pressroom::config::SearchSettings;
use pressroom::infra::http::ApiClient;

use crate::args::SearchCmd;
use crate::error::CliError;
use crate::print::print_json;

pub async fn handle(
    client: &Arc<ApiClient>,
    settings: &SearchSettings,
    cmd: SearchCmd,
) -> Result<(), CliError> {
    match cmd {
        SearchCmd::Query { query } => run(client, settings, &query).await,
    }
}

async fn run(
    client: &Arc<ApiClient>,
    settings: &SearchSettings,
    query: &str,
) -> Result<(), CliError> {
    let api: Arc<dyn SearchApi> = client.clone();
    let controller = SearchController::with_options(api, settings.debounce, settings.min_query_len);

    match controller.query(query).await.map_err(CliError::Api)? {
        SearchOutcome::Results(results) => print_json(&results),
        SearchOutcome::Cleared => Err(CliError::InvalidInput(format!(
            "query must be at least {} characters",
            settings.min_query_len
        ))),
        // Single caller, nothing can supersede it.
        SearchOutcome::Superseded => Ok(()),
    }
}
