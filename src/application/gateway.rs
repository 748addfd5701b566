//! Gateway traits describing the storefront HTTP API the editors consume.
//!
//! The concrete implementation lives in `infra::http`; the editors only
//! ever see these traits, which keeps their state machines testable
//! against in-process fakes.

use async_trait::async_trait;
use thiserror::Error;

use pressroom_api_types::{SearchResponse, UploadedFileDto};

use crate::domain::navigation::{NavItemKind, NavNode, NavScope, NavigationItem};
use crate::domain::pages::{Page, Slug};
use crate::domain::settings::SiteSettings;
use crate::domain::blocks::Block;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Fields of a navigation item before the server has assigned an id.
#[derive(Clone, Debug)]
pub struct NavigationDraft {
    pub label: String,
    pub url: Option<String>,
    pub kind: NavItemKind,
    pub parent_id: Option<i64>,
    pub position: i32,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub badge: Option<String>,
    pub is_active: bool,
    pub scope: NavScope,
}

/// One entry of the bulk position/parent update sent after a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionUpdate {
    pub id: i64,
    pub position: i32,
    pub parent_id: Option<i64>,
}

#[async_trait]
pub trait NavigationApi: Send + Sync {
    /// Nested tree for public rendering, pre-sorted by position.
    async fn tree(&self, scope: NavScope) -> Result<Vec<NavNode>, ApiError>;
    /// Flat list for the admin editor, inactive items included.
    async fn list_all(&self, scope: NavScope) -> Result<Vec<NavigationItem>, ApiError>;
    async fn create(&self, draft: NavigationDraft) -> Result<NavigationItem, ApiError>;
    async fn update(&self, item: &NavigationItem) -> Result<NavigationItem, ApiError>;
    /// Deletes cascade to descendants server-side.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
    /// Applies the batch atomically from the caller's perspective.
    async fn reorder_bulk(&self, updates: &[PositionUpdate]) -> Result<(), ApiError>;
}

/// Fields of a page before the server has assigned an id.
#[derive(Clone, Debug)]
pub struct PageDraft {
    pub slug: Slug,
    pub title: String,
    pub content: Vec<Block>,
}

#[async_trait]
pub trait PagesApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Page>, ApiError>;
    /// `None` when the slug does not exist (the public 404 path).
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, ApiError>;
    async fn create(&self, draft: PageDraft) -> Result<Page, ApiError>;
    /// Replaces the whole content sequence.
    async fn update(&self, page: &Page) -> Result<Page, ApiError>;
}

#[async_trait]
pub trait SettingsApi: Send + Sync {
    async fn settings(&self) -> Result<SiteSettings, ApiError>;
}

#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError>;
}

/// An artwork file queued for upload.
#[derive(Clone, Debug)]
pub struct ArtworkFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait UploadsApi: Send + Sync {
    async fn upload_artwork(&self, files: Vec<ArtworkFile>) -> Result<Vec<UploadedFileDto>, ApiError>;
}
