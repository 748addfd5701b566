#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use askama::Template;

use pressroom::application::gateway::{NavigationApi, PagesApi, SettingsApi};
use pressroom::config::RenderSettings;
use pressroom::domain::navigation::NavScope;
use pressroom::infra::http::ApiClient;
use pressroom::presentation::PageRenderer;
use pressroom::presentation::views::{FooterTemplate, HeaderTemplate, footer_view, header_view};

use crate::args::RenderCmd;
use crate::error::CliError;

pub async fn handle(
    client: &Arc<ApiClient>,
    settings: &RenderSettings,
    cmd: RenderCmd,
) -> Result<(), CliError> {
    match cmd {
        RenderCmd::Page { slug } => page(client, settings, &slug).await,
        RenderCmd::Chrome => chrome(client).await,
    }
}

async fn page(
    client: &Arc<ApiClient>,
    settings: &RenderSettings,
    slug: &str,
) -> Result<(), CliError> {
    let Some(page) = client.find_by_slug(slug).await? else {
        return Err(CliError::InvalidInput(format!("no page with slug `{slug}`")));
    };

    let renderer = PageRenderer::with_max_depth(settings.max_depth.get());
    let html = renderer.render_page(&page)?;
    println!("{html}");
    Ok(())
}

async fn chrome(client: &Arc<ApiClient>) -> Result<(), CliError> {
    let header_tree = client.tree(NavScope::Header).await?;
    let footer_tree = client.tree(NavScope::Footer).await?;
    let site = client.settings().await?;

    let header = HeaderTemplate {
        view: header_view(&header_tree),
    }
    .render()
    .map_err(|e| CliError::InvalidInput(format!("header template: {e}")))?;
    let footer = FooterTemplate {
        view: footer_view(&footer_tree, &site),
    }
    .render()
    .map_err(|e| CliError::InvalidInput(format!("footer template: {e}")))?;

    println!("{header}");
    println!("{footer}");
    Ok(())
}
