#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use pressroom::application::gateway::{NavigationApi, NavigationDraft};
use pressroom::application::navigation::{DragOutcome, NavigationEditor};
use pressroom::domain::navigation::{NavScope, NavigationItem};
use pressroom::infra::http::ApiClient;

use crate::args::NavCmd;
use crate::error::CliError;
use crate::print::print_json;

pub async fn handle(client: &Arc<ApiClient>, cmd: NavCmd) -> Result<(), CliError> {
    match cmd {
        NavCmd::Tree { scope } => tree(client, scope.into()).await,
        NavCmd::List { scope } => list(client, scope.into()).await,
        NavCmd::Create {
            scope,
            label,
            kind,
            url,
            parent_id,
            position,
            icon,
            image_url,
            description,
            badge,
            inactive,
        } => {
            let scope: NavScope = scope.into();
            let draft = NavigationDraft {
                label,
                url,
                kind: kind.into(),
                parent_id,
                position,
                icon,
                image_url,
                description,
                badge,
                is_active: !inactive,
                scope,
            };
            create(client, scope, draft).await
        }
        NavCmd::Update {
            scope,
            id,
            label,
            kind,
            url,
            parent_id,
            position,
            icon,
            image_url,
            description,
            badge,
            inactive,
        } => {
            let scope: NavScope = scope.into();
            let item = NavigationItem {
                id,
                label,
                url,
                kind: kind.into(),
                parent_id,
                position,
                icon,
                image_url,
                description,
                badge,
                is_active: !inactive,
                scope,
            };
            update(client, scope, item).await
        }
        NavCmd::Move { scope, id, over } => move_item(client, scope.into(), id, over).await,
        NavCmd::Delete { id } => delete(client, id).await,
    }
}

async fn tree(client: &Arc<ApiClient>, scope: NavScope) -> Result<(), CliError> {
    let nodes = client.tree(scope).await?;
    print_json(&nodes)
}

async fn list(client: &Arc<ApiClient>, scope: NavScope) -> Result<(), CliError> {
    let items = client.list_all(scope).await?;
    print_json(&items)
}

async fn create(
    client: &Arc<ApiClient>,
    scope: NavScope,
    draft: NavigationDraft,
) -> Result<(), CliError> {
    let mut editor = editor(client, scope).await?;
    let created = editor.create(draft).await?;
    print_json(&created)
}

async fn update(
    client: &Arc<ApiClient>,
    scope: NavScope,
    item: NavigationItem,
) -> Result<(), CliError> {
    let mut editor = editor(client, scope).await?;
    let updated = editor.update(item).await?;
    print_json(&updated)
}

/// Replays the admin drag gesture: every row expanded so `over` is
/// addressable, then one drag-end.
async fn move_item(
    client: &Arc<ApiClient>,
    scope: NavScope,
    id: i64,
    over: i64,
) -> Result<(), CliError> {
    let mut editor = editor(client, scope).await?;
    let ids: Vec<i64> = editor.items().iter().map(|item| item.id).collect();
    for item_id in ids {
        if !editor.is_expanded(item_id) {
            editor.toggle(item_id);
        }
    }

    match editor.drag_end(id, over).await? {
        DragOutcome::Applied => println!("moved"),
        DragOutcome::Noop => println!("nothing to do"),
    }
    Ok(())
}

async fn delete(client: &Arc<ApiClient>, id: i64) -> Result<(), CliError> {
    client.delete(id).await.map_err(CliError::Api)?;
    println!("deleted");
    Ok(())
}

async fn editor(client: &Arc<ApiClient>, scope: NavScope) -> Result<NavigationEditor, CliError> {
    let api: Arc<dyn NavigationApi> = client.clone();
    let mut editor = NavigationEditor::new(api, scope);
    editor.load().await?;
    Ok(editor)
}
