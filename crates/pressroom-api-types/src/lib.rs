//! Shared request and response types for the Pressroom storefront API.
//!
//! These mirror the wire contract exposed by the storefront backend. The
//! admin editors and the `pressroom-cli` binary both speak this shape, so
//! the types live in their own crate to keep the two in lockstep.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Flat key/value map returned by `GET /api/settings`.
pub type SettingsMap = BTreeMap<String, String>;

/// A single navigation entry as stored server-side.
///
/// `parent_id` is the adjacency-list pointer; `position` orders siblings
/// that share the same parent and scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItemDto {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub position: i32,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    pub is_active: bool,
    pub scope: String,
}

/// Nested node returned by `GET /api/navigation/tree`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationTreeNodeDto {
    #[serde(flatten)]
    pub item: NavigationItemDto,
    #[serde(default)]
    pub children: Vec<NavigationTreeNodeDto>,
}

/// Payload for `POST /api/navigation`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCreateRequest {
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub position: i32,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    pub is_active: bool,
    pub scope: String,
}

/// One entry of the bulk reorder payload.
///
/// `parent_id` is always serialized, `null` meaning "move to the root of
/// the scope" rather than "leave unchanged".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntryDto {
    pub id: i64,
    pub position: i32,
    pub parent_id: Option<i64>,
}

/// Body of `PUT /api/navigation/reorder/bulk`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderEntryDto>,
}

/// A typed content block inside a page document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: serde_json::Map<String, serde_json::Value>,
}

/// Page content as it appears on the wire.
///
/// Older rows store the block array JSON-encoded as a string; newer rows
/// return it structured. Callers should go through [`PageContentDto::into_blocks`]
/// rather than matching on the variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageContentDto {
    Blocks(Vec<BlockDto>),
    Raw(String),
}

impl PageContentDto {
    /// Decode into a block list, parsing the string form when necessary.
    pub fn into_blocks(self) -> Result<Vec<BlockDto>, serde_json::Error> {
        match self {
            PageContentDto::Blocks(blocks) => Ok(blocks),
            PageContentDto::Raw(raw) => {
                if raw.trim().is_empty() {
                    return Ok(Vec::new());
                }
                serde_json::from_str(&raw)
            }
        }
    }
}

impl Default for PageContentDto {
    fn default() -> Self {
        PageContentDto::Blocks(Vec::new())
    }
}

/// Page document returned by `GET /api/pages/{slug}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: PageContentDto,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Payload for `POST /api/pages` and `PUT /api/pages/{id}`.
///
/// Saves replace the entire block sequence; there is no patch form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSaveRequest {
    pub slug: String,
    pub title: String,
    pub content: Vec<BlockDto>,
}

/// One catalog hit returned by `GET /api/search`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `GET /api/search?q=...`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<SearchHitDto>,
    #[serde(default)]
    pub services: Vec<SearchHitDto>,
}

/// One stored file returned by the artwork upload endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadedFileDto {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Response of `POST /api/uploads/artwork`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub files: Vec<UploadedFileDto>,
}
