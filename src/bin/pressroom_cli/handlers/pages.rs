#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;
use std::sync::Arc;

use pressroom::application::gateway::{PageDraft, PagesApi};
use pressroom::application::page_editor::PageEditor;
use pressroom::domain::pages::Slug;
use pressroom::domain::slug::generate_unique_slug;
use pressroom::infra::http::ApiClient;

use crate::args::PagesCmd;
use crate::error::CliError;
use crate::io::read_blocks;
use crate::print::print_json;

pub async fn handle(client: &Arc<ApiClient>, cmd: PagesCmd) -> Result<(), CliError> {
    match cmd {
        PagesCmd::List => list(client).await,
        PagesCmd::Get { slug } => get(client, &slug).await,
        PagesCmd::Create {
            title,
            slug,
            content_file,
        } => create(client, &title, slug, content_file.as_deref()).await,
        PagesCmd::Update {
            slug,
            title,
            content_file,
        } => update(client, &slug, title, content_file.as_deref()).await,
        PagesCmd::AddBlock { slug, kind } => add_block(client, &slug, &kind).await,
    }
}

async fn list(client: &Arc<ApiClient>) -> Result<(), CliError> {
    let pages = client.list().await?;
    print_json(&pages)
}

async fn get(client: &Arc<ApiClient>, slug: &str) -> Result<(), CliError> {
    match client.find_by_slug(slug).await? {
        Some(page) => print_json(&page),
        None => Err(CliError::InvalidInput(format!("no page with slug `{slug}`"))),
    }
}

async fn create(
    client: &Arc<ApiClient>,
    title: &str,
    slug: Option<String>,
    content_file: Option<&Path>,
) -> Result<(), CliError> {
    let slug = match slug {
        Some(raw) => Slug::new(raw).map_err(|e| CliError::InvalidInput(e.to_string()))?,
        None => {
            let existing: Vec<String> = client
                .list()
                .await?
                .into_iter()
                .map(|page| page.slug.as_str().to_string())
                .collect();
            let raw = generate_unique_slug(title, |candidate| {
                !existing.iter().any(|slug| slug == candidate)
            })
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;
            Slug::new(raw).map_err(|e| CliError::InvalidInput(e.to_string()))?
        }
    };

    let content = match content_file {
        Some(path) => read_blocks(path)?,
        None => Vec::new(),
    };

    let created = client
        .create(PageDraft {
            slug,
            title: title.to_string(),
            content,
        })
        .await?;
    print_json(&created)
}

async fn update(
    client: &Arc<ApiClient>,
    slug: &str,
    title: Option<String>,
    content_file: Option<&Path>,
) -> Result<(), CliError> {
    let Some(mut page) = client.find_by_slug(slug).await? else {
        return Err(CliError::InvalidInput(format!("no page with slug `{slug}`")));
    };

    if let Some(title) = title {
        page.title = title;
    }
    if let Some(path) = content_file {
        page.content = read_blocks(path)?;
    }

    let updated = client.update(&page).await?;
    print_json(&updated)
}

async fn add_block(client: &Arc<ApiClient>, slug: &str, kind: &str) -> Result<(), CliError> {
    let api: Arc<dyn PagesApi> = client.clone();
    let Some(mut editor) = PageEditor::open(api, slug).await? else {
        return Err(CliError::InvalidInput(format!("no page with slug `{slug}`")));
    };

    let block_id = editor.add_block(kind)?.id.clone();
    editor.save().await?;
    println!("added block {block_id}");
    Ok(())
}
