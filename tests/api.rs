//! End-to-end coverage of the HTTP gateway: a mock storefront backend is
//! served in-process with axum and the real `ApiClient` talks to it over a
//! loopback socket, so the wire shapes, status handling and auth header are
//! exercised exactly as in production.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use pressroom_api_types::{
    NavigationCreateRequest, NavigationItemDto, NavigationTreeNodeDto, PageContentDto, PageDto,
    PageSaveRequest, ReorderRequest, UploadResponse, UploadedFileDto,
};

use pressroom::application::gateway::{
    ApiError, ArtworkFile, NavigationApi, NavigationDraft, PagesApi, SearchApi, SettingsApi,
    UploadsApi,
};
use pressroom::application::navigation::{DragOutcome, NavigationEditor, NavigationEditorError};
use pressroom::application::page_editor::PageEditor;
use pressroom::domain::navigation::{NavItemKind, NavScope};
use pressroom::infra::http::ApiClient;

type SharedState = Arc<Mutex<MockState>>;

/// Backend state behind the mock routes.
#[derive(Default)]
struct MockState {
    nav: Vec<NavigationItemDto>,
    next_nav_id: i64,
    pages: Vec<PageDto>,
    next_page_id: i64,
    settings: BTreeMap<String, String>,
    reject_reorder: bool,
    reorder_bodies: Vec<ReorderRequest>,
    search_queries: Vec<String>,
    uploaded: Vec<(String, String, usize)>,
    auth_headers: Vec<Option<String>>,
}

fn nav_row(
    id: i64,
    label: &str,
    kind: &str,
    parent_id: Option<i64>,
    position: i32,
    scope: &str,
) -> NavigationItemDto {
    NavigationItemDto {
        id,
        label: label.to_string(),
        url: None,
        kind: kind.to_string(),
        parent_id,
        position,
        icon: None,
        image_url: None,
        description: None,
        badge: None,
        is_active: true,
        scope: scope.to_string(),
    }
}

fn header_rows() -> Vec<NavigationItemDto> {
    vec![
        nav_row(1, "Business Cards", "main", None, 0, "header"),
        nav_row(2, "Large Format", "main", None, 1, "header"),
        nav_row(3, "Finishes", "mega-category", Some(1), 0, "header"),
        nav_row(4, "Matte", "mega-item", Some(3), 0, "header"),
        nav_row(5, "Gloss", "mega-item", Some(3), 1, "header"),
    ]
}

fn nest(
    rows: &[NavigationItemDto],
    scope: &str,
    parent: Option<i64>,
) -> Vec<NavigationTreeNodeDto> {
    let mut group: Vec<&NavigationItemDto> = rows
        .iter()
        .filter(|row| row.scope == scope && row.parent_id == parent)
        .collect();
    group.sort_by_key(|row| row.position);
    group
        .into_iter()
        .map(|row| NavigationTreeNodeDto {
            item: row.clone(),
            children: nest(rows, scope, Some(row.id)),
        })
        .collect()
}

#[derive(Deserialize)]
struct ScopeQuery {
    scope: String,
}

async fn nav_tree(
    State(state): State<SharedState>,
    Query(query): Query<ScopeQuery>,
) -> Response {
    let state = state.lock().await;
    axum::Json(nest(&state.nav, &query.scope, None)).into_response()
}

async fn nav_all(State(state): State<SharedState>, Query(query): Query<ScopeQuery>) -> Response {
    let state = state.lock().await;
    let rows: Vec<NavigationItemDto> = state
        .nav
        .iter()
        .filter(|row| row.scope == query.scope)
        .cloned()
        .collect();
    axum::Json(rows).into_response()
}

async fn nav_create(
    State(state): State<SharedState>,
    axum::Json(body): axum::Json<NavigationCreateRequest>,
) -> Response {
    let mut state = state.lock().await;
    state.next_nav_id += 1;
    let created = NavigationItemDto {
        id: state.next_nav_id,
        label: body.label,
        url: body.url,
        kind: body.kind,
        parent_id: body.parent_id,
        position: body.position,
        icon: body.icon,
        image_url: body.image_url,
        description: body.description,
        badge: body.badge,
        is_active: body.is_active,
        scope: body.scope,
    };
    state.nav.push(created.clone());
    (StatusCode::CREATED, axum::Json(created)).into_response()
}

async fn nav_update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<NavigationItemDto>,
) -> Response {
    let mut state = state.lock().await;
    match state.nav.iter_mut().find(|row| row.id == id) {
        Some(row) => {
            *row = body.clone();
            axum::Json(body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn nav_delete(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().await;
    let mut doomed = vec![id];
    let mut index = 0;
    while index < doomed.len() {
        let current = doomed[index];
        for row in &state.nav {
            if row.parent_id == Some(current) && !doomed.contains(&row.id) {
                doomed.push(row.id);
            }
        }
        index += 1;
    }
    state.nav.retain(|row| !doomed.contains(&row.id));
    StatusCode::NO_CONTENT.into_response()
}

async fn nav_reorder(
    State(state): State<SharedState>,
    axum::Json(body): axum::Json<ReorderRequest>,
) -> Response {
    let mut state = state.lock().await;
    state.reorder_bodies.push(body.clone());
    if state.reject_reorder {
        return (StatusCode::INTERNAL_SERVER_ERROR, "reorder rejected").into_response();
    }
    for entry in &body.items {
        if let Some(row) = state.nav.iter_mut().find(|row| row.id == entry.id) {
            row.position = entry.position;
            row.parent_id = entry.parent_id;
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn pages_list(State(state): State<SharedState>) -> Response {
    let state = state.lock().await;
    axum::Json(state.pages.clone()).into_response()
}

async fn pages_get(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    let state = state.lock().await;
    match state.pages.iter().find(|page| page.slug == slug) {
        Some(page) => axum::Json(page.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such page").into_response(),
    }
}

async fn pages_create(
    State(state): State<SharedState>,
    axum::Json(body): axum::Json<PageSaveRequest>,
) -> Response {
    let mut state = state.lock().await;
    state.next_page_id += 1;
    let created = PageDto {
        id: state.next_page_id,
        slug: body.slug,
        title: body.title,
        content: PageContentDto::Blocks(body.content),
        updated_at: None,
    };
    state.pages.push(created.clone());
    (StatusCode::CREATED, axum::Json(created)).into_response()
}

async fn pages_update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    axum::Json(body): axum::Json<PageSaveRequest>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut state = state.lock().await;
    match state.pages.iter_mut().find(|page| page.id == id) {
        Some(page) => {
            page.slug = body.slug;
            page.title = body.title;
            page.content = PageContentDto::Blocks(body.content);
            axum::Json(page.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn settings_get(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.lock().await;
    let auth = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.auth_headers.push(auth);
    axum::Json(state.settings.clone()).into_response()
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search_get(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let mut state = state.lock().await;
    state.search_queries.push(query.q.clone());
    axum::Json(json!({
        "products": [{"id": 1, "name": format!("{} 350gsm", query.q), "slug": "cards"}],
        "services": [{"id": 9, "name": "Design service"}],
    }))
    .into_response()
}

async fn uploads_post(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        assert_eq!(field_name, "files");
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        files.push((name, content_type, bytes.len()));
    }

    let mut state = state.lock().await;
    let response = UploadResponse {
        files: files
            .iter()
            .map(|(name, content_type, _)| UploadedFileDto {
                name: name.clone(),
                url: format!("/uploads/artwork/{name}"),
                content_type: content_type.clone(),
            })
            .collect(),
    };
    state.uploaded.extend(files);
    axum::Json(response).into_response()
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/navigation/tree", get(nav_tree))
        .route("/api/navigation/all", get(nav_all))
        .route("/api/navigation", post(nav_create))
        .route("/api/navigation/{id}", put(nav_update).delete(nav_delete))
        .route("/api/navigation/reorder/bulk", put(nav_reorder))
        .route("/api/pages", get(pages_list).post(pages_create))
        .route("/api/pages/{key}", get(pages_get).put(pages_update))
        .route("/api/settings", get(settings_get))
        .route("/api/search", get(search_get))
        .route("/api/uploads/artwork", post(uploads_post))
        .with_state(state)
}

async fn spawn_backend(state: SharedState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("serve");
    });
    format!("http://{addr}/")
}

async fn client_for(state: SharedState) -> Arc<ApiClient> {
    let base = spawn_backend(state).await;
    Arc::new(ApiClient::new(&base, None).expect("client"))
}

fn seeded(rows: Vec<NavigationItemDto>) -> SharedState {
    let next_nav_id = rows.iter().map(|row| row.id).max().unwrap_or(0);
    Arc::new(Mutex::new(MockState {
        nav: rows,
        next_nav_id,
        ..MockState::default()
    }))
}

#[tokio::test]
async fn tree_endpoint_yields_position_sorted_nesting() {
    let mut rows = header_rows();
    rows.reverse(); // storage order must not matter
    let client = client_for(seeded(rows)).await;

    let tree = client.tree(NavScope::Header).await.expect("tree");
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].item.label, "Business Cards");
    assert_eq!(tree[1].item.label, "Large Format");

    let finishes = &tree[0].children[0];
    assert_eq!(finishes.item.kind, NavItemKind::MegaCategory);
    let leaves: Vec<&str> = finishes
        .children
        .iter()
        .map(|node| node.item.label.as_str())
        .collect();
    assert_eq!(leaves, ["Matte", "Gloss"]);
}

#[tokio::test]
async fn drag_end_confirms_the_renumbering_with_the_backend() {
    let state = seeded(header_rows());
    let client = client_for(state.clone()).await;

    let api: Arc<dyn NavigationApi> = client.clone();
    let mut editor = NavigationEditor::new(api, NavScope::Header);
    editor.load().await.expect("load");

    let outcome = editor.drag_end(1, 2).await.expect("drag");
    assert_eq!(outcome, DragOutcome::Applied);

    let guard = state.lock().await;
    let mut roots: Vec<&NavigationItemDto> = guard
        .nav
        .iter()
        .filter(|row| row.parent_id.is_none())
        .collect();
    roots.sort_by_key(|row| row.position);
    let order: Vec<i64> = roots.iter().map(|row| row.id).collect();
    assert_eq!(order, [2, 1]);

    // One bulk payload, positions renumbered 0..n-1.
    assert_eq!(guard.reorder_bodies.len(), 1);
    let mut positions: Vec<i32> = guard.reorder_bodies[0]
        .items
        .iter()
        .map(|entry| entry.position)
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, [0, 1]);
}

#[tokio::test]
async fn rejected_reorder_takes_the_backend_state_wholesale() {
    let state = seeded(header_rows());
    state.lock().await.reject_reorder = true;
    let client = client_for(state.clone()).await;

    let api: Arc<dyn NavigationApi> = client.clone();
    let mut editor = NavigationEditor::new(api, NavScope::Header);
    editor.load().await.expect("load");

    let err = editor.drag_end(1, 2).await.expect_err("rejected");
    assert!(matches!(err, NavigationEditorError::ReorderRejected { .. }));

    // The optimistic move was rolled back by refetching.
    let mut local: Vec<(i64, i32)> = editor
        .items()
        .iter()
        .filter(|item| item.parent_id.is_none())
        .map(|item| (item.id, item.position))
        .collect();
    local.sort_unstable();
    assert_eq!(local, [(1, 0), (2, 1)]);
}

#[tokio::test]
async fn create_and_cascade_delete_round_trip() {
    let state = seeded(header_rows());
    let client = client_for(state.clone()).await;

    let api: Arc<dyn NavigationApi> = client.clone();
    let mut editor = NavigationEditor::new(api, NavScope::Header);
    editor.load().await.expect("load");

    let created = editor
        .create(NavigationDraft {
            label: "Paper Stocks".to_string(),
            url: None,
            kind: NavItemKind::MegaCategory,
            parent_id: Some(2),
            position: 0,
            icon: None,
            image_url: None,
            description: None,
            badge: None,
            is_active: true,
            scope: NavScope::Header,
        })
        .await
        .expect("create");
    assert_eq!(created.id, 6); // backend-assigned
    assert_eq!(state.lock().await.nav.len(), 6);

    // Deleting "Business Cards" takes its category and both leaves with it.
    editor.delete(1).await.expect("delete");
    let remaining: Vec<i64> = state.lock().await.nav.iter().map(|row| row.id).collect();
    assert_eq!(remaining, [2, 6]);
    assert_eq!(editor.items().len(), 2);
}

#[tokio::test]
async fn missing_page_is_none_not_an_error() {
    let client = client_for(seeded(Vec::new())).await;
    let found = client.find_by_slug("no-such-page").await.expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn legacy_string_content_is_decoded_into_blocks() {
    let state = seeded(Vec::new());
    state.lock().await.pages.push(PageDto {
        id: 1,
        slug: "about".to_string(),
        title: "About".to_string(),
        content: PageContentDto::Raw(
            r#"[{"id":"ab12","type":"text","content":{"body":"Established 1987"}}]"#.to_string(),
        ),
        updated_at: None,
    });
    let client = client_for(state).await;

    let page = client
        .find_by_slug("about")
        .await
        .expect("lookup")
        .expect("page");
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].kind, "text");
    assert_eq!(page.content[0].text("body"), "Established 1987");
}

#[tokio::test]
async fn page_editor_save_replaces_the_stored_sequence() {
    let state = seeded(Vec::new());
    state.lock().await.pages.push(PageDto {
        id: 1,
        slug: "home".to_string(),
        title: "Home".to_string(),
        content: PageContentDto::Blocks(Vec::new()),
        updated_at: None,
    });
    state.lock().await.next_page_id = 1;
    let client = client_for(state.clone()).await;

    let api: Arc<dyn PagesApi> = client.clone();
    let mut editor = PageEditor::open(api, "home")
        .await
        .expect("open")
        .expect("page exists");
    editor.add_block("hero").expect("known kind");
    editor.set_title("Welcome");
    editor.save().await.expect("save");
    assert!(!editor.is_dirty());

    let guard = state.lock().await;
    let stored = &guard.pages[0];
    assert_eq!(stored.title, "Welcome");
    let PageContentDto::Blocks(blocks) = &stored.content else {
        panic!("save must store structured content");
    };
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, "hero");
}

#[tokio::test]
async fn page_editor_creates_new_pages_through_the_backend() {
    let state = seeded(Vec::new());
    let client = client_for(state.clone()).await;

    let api: Arc<dyn PagesApi> = client.clone();
    let mut editor =
        PageEditor::new_draft(api, "Wedding Stationery", &[]).expect("draft");
    assert_eq!(editor.slug().as_str(), "wedding-stationery");
    editor.add_block("cta").expect("known kind");
    editor.save().await.expect("save");

    assert_eq!(editor.page_id(), Some(1));
    let guard = state.lock().await;
    assert_eq!(guard.pages.len(), 1);
    assert_eq!(guard.pages[0].slug, "wedding-stationery");
}

#[tokio::test]
async fn settings_map_is_typed_on_the_way_in() {
    let state = seeded(Vec::new());
    {
        let mut guard = state.lock().await;
        guard
            .settings
            .insert("site.description".to_string(), "Family print shop".to_string());
        guard
            .settings
            .insert("theme.color".to_string(), "#b91c1c".to_string());
        guard.settings.insert(
            "social.instagram".to_string(),
            "https://instagram.com/shop".to_string(),
        );
    }
    let client = client_for(state).await;

    let settings = client.settings().await.expect("settings");
    assert_eq!(settings.description(), "Family print shop");
    assert_eq!(settings.theme_color(), "#b91c1c");
    assert_eq!(
        settings.social_links(),
        vec![("instagram", "https://instagram.com/shop")]
    );
    assert!(settings.contact_phone().is_none());
}

#[tokio::test]
async fn search_passes_the_query_and_decodes_both_buckets() {
    let state = seeded(Vec::new());
    let client = client_for(state.clone()).await;

    let response = client.search("flyers").await.expect("search");
    assert_eq!(response.products.len(), 1);
    assert_eq!(response.products[0].name, "flyers 350gsm");
    assert_eq!(response.services.len(), 1);
    assert_eq!(
        *state.lock().await.search_queries,
        vec!["flyers".to_string()]
    );
}

#[tokio::test]
async fn artwork_upload_sends_every_file_under_one_field() {
    let state = seeded(Vec::new());
    let client = client_for(state.clone()).await;

    let uploaded = client
        .upload_artwork(vec![
            ArtworkFile {
                name: "front.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: vec![0x25, 0x50, 0x44, 0x46],
            },
            ArtworkFile {
                name: "logo.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![0x89, 0x50],
            },
        ])
        .await
        .expect("upload");

    assert_eq!(uploaded.len(), 2);
    assert_eq!(uploaded[0].url, "/uploads/artwork/front.pdf");

    let guard = state.lock().await;
    assert_eq!(
        guard.uploaded,
        vec![
            ("front.pdf".to_string(), "application/pdf".to_string(), 4),
            ("logo.png".to_string(), "image/png".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn bearer_key_is_attached_only_when_configured() {
    let state = seeded(Vec::new());
    let base = spawn_backend(state.clone()).await;

    let anonymous = ApiClient::new(&base, None).expect("client");
    anonymous.settings().await.expect("settings");

    let keyed = ApiClient::new(&base, Some("prk_test_123".to_string())).expect("client");
    keyed.settings().await.expect("settings");

    let guard = state.lock().await;
    assert_eq!(
        guard.auth_headers,
        vec![None, Some("Bearer prk_test_123".to_string())]
    );
}

#[tokio::test]
async fn server_error_surfaces_status_and_body() {
    let client = client_for(seeded(Vec::new())).await;
    // Updating a page that does not exist.
    let ghost = pressroom::domain::pages::Page {
        id: 404,
        slug: pressroom::domain::pages::Slug::new("ghost").expect("slug"),
        title: "Ghost".to_string(),
        content: Vec::new(),
    };
    let err = PagesApi::update(&*client, &ghost)
        .await
        .expect_err("missing page");
    assert!(matches!(err, ApiError::Server { status: 404, .. }));
}
