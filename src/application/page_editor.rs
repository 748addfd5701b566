//! Admin page editor state machine.
//!
//! A page under edit is either dirty (unsaved local edits) or persisted;
//! there are no intermediate states and no conflict detection between
//! concurrent admins — the last save wins. A failed save keeps the local
//! edits so the admin can retry.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::application::forms::{self, PathSeg};
use crate::application::gateway::{ApiError, PageDraft, PagesApi};
use crate::domain::DomainError;
use crate::domain::blocks::Block;
use crate::domain::pages::{Page, Slug};
use crate::domain::schema::{default_content, registry};
use crate::domain::slug::{SlugError, generate_unique_slug};

#[derive(Debug, Error)]
pub enum PageEditorError {
    #[error("no block kind `{kind}` is registered")]
    UnknownKind { kind: String },
    #[error("no block `{id}` in this page")]
    BlockNotFound { id: String },
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct PageEditor {
    api: Arc<dyn PagesApi>,
    page_id: Option<i64>,
    slug: Slug,
    title: String,
    blocks: Vec<Block>,
    dirty: bool,
}

impl PageEditor {
    /// Start a new page, deriving a slug from the title that does not
    /// collide with `existing_slugs`.
    pub fn new_draft(
        api: Arc<dyn PagesApi>,
        title: &str,
        existing_slugs: &[String],
    ) -> Result<Self, PageEditorError> {
        let raw = generate_unique_slug(title, |candidate| {
            !existing_slugs.iter().any(|slug| slug == candidate)
        })?;
        let slug = Slug::new(raw)?;
        Ok(Self {
            api,
            page_id: None,
            slug,
            title: title.to_string(),
            blocks: Vec::new(),
            dirty: true,
        })
    }

    /// Open an existing page for editing; `None` when the slug is unknown.
    pub async fn open(api: Arc<dyn PagesApi>, slug: &str) -> Result<Option<Self>, PageEditorError> {
        let Some(page) = api.find_by_slug(slug).await? else {
            return Ok(None);
        };
        Ok(Some(Self {
            api,
            page_id: Some(page.id),
            slug: page.slug,
            title: page.title,
            blocks: page.content,
            dirty: false,
        }))
    }

    pub fn page_id(&self) -> Option<i64> {
        self.page_id
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.dirty = true;
    }

    /// Append a block of `kind` with registry defaults; the id is fresh
    /// and stays stable for the block's lifetime.
    pub fn add_block(&mut self, kind: &str) -> Result<&Block, PageEditorError> {
        let content = default_content(kind).ok_or_else(|| PageEditorError::UnknownKind {
            kind: kind.to_string(),
        })?;
        self.blocks.push(Block::new(kind, content));
        self.dirty = true;
        Ok(self.blocks.last().expect("just pushed"))
    }

    /// Append a block inside one column of a section-layout block.
    pub fn add_block_to_column(
        &mut self,
        layout_id: &str,
        column: usize,
        kind: &str,
    ) -> Result<String, PageEditorError> {
        let content = default_content(kind).ok_or_else(|| PageEditorError::UnknownKind {
            kind: kind.to_string(),
        })?;
        let layout = self.block_mut(layout_id)?;
        let mut columns = layout.columns();
        let slot = columns
            .get_mut(column)
            .ok_or_else(|| DomainError::validation(format!("no column {column} in layout")))?;
        let block = Block::new(kind, content);
        let id = block.id.clone();
        slot.blocks.push(block);
        layout.set_columns(columns);
        self.dirty = true;
        Ok(id)
    }

    /// Write one field of a block (possibly a repeater row field).
    pub fn update_field(
        &mut self,
        block_id: &str,
        path: &[PathSeg],
        value: Value,
    ) -> Result<(), PageEditorError> {
        let block = self.block_mut(block_id)?;
        forms::apply_change(&mut block.content, path, value)?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_repeater_row(
        &mut self,
        block_id: &str,
        field_name: &str,
    ) -> Result<usize, PageEditorError> {
        let kind = self.block_mut(block_id)?.kind.clone();
        let field = registry()
            .get(&kind)
            .and_then(|definition| definition.field(field_name))
            .cloned()
            .ok_or_else(|| {
                DomainError::validation(format!("no field `{field_name}` on `{kind}`"))
            })?;
        let block = self.block_mut(block_id)?;
        let index = forms::repeater_add(&mut block.content, &field)?;
        self.dirty = true;
        Ok(index)
    }

    pub fn remove_repeater_row(
        &mut self,
        block_id: &str,
        field_name: &str,
        index: usize,
    ) -> Result<(), PageEditorError> {
        let block = self.block_mut(block_id)?;
        forms::repeater_remove(&mut block.content, field_name, index)?;
        self.dirty = true;
        Ok(())
    }

    /// Move a block to a new index. Ids are untouched; out-of-range
    /// indices are ignored, matching the drag layer's behavior.
    pub fn move_block(&mut self, from: usize, to: usize) {
        if from == to || from >= self.blocks.len() || to >= self.blocks.len() {
            return;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.dirty = true;
    }

    /// Drop a block by id; removing an id that is not present is a no-op.
    pub fn remove_block(&mut self, block_id: &str) {
        let before = self.blocks.len();
        self.blocks.retain(|block| block.id != block_id);
        if self.blocks.len() != before {
            self.dirty = true;
        }
    }

    /// Persist the whole block sequence. Success clears the dirty flag;
    /// failure leaves every local edit in place for a retry.
    pub async fn save(&mut self) -> Result<(), PageEditorError> {
        let saved = match self.page_id {
            None => {
                self.api
                    .create(PageDraft {
                        slug: self.slug.clone(),
                        title: self.title.clone(),
                        content: self.blocks.clone(),
                    })
                    .await?
            }
            Some(id) => {
                self.api
                    .update(&Page {
                        id,
                        slug: self.slug.clone(),
                        title: self.title.clone(),
                        content: self.blocks.clone(),
                    })
                    .await?
            }
        };
        debug!(page_id = saved.id, slug = %saved.slug, "page saved");
        self.page_id = Some(saved.id);
        self.dirty = false;
        Ok(())
    }

    fn block_mut(&mut self, block_id: &str) -> Result<&mut Block, PageEditorError> {
        self.blocks
            .iter_mut()
            .find(|block| block.id == block_id)
            .ok_or_else(|| PageEditorError::BlockNotFound {
                id: block_id.to_string(),
            })
    }
}
