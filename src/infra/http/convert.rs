//! Wire DTO ↔ domain conversions.
//!
//! The wire carries kind/scope as plain strings; decoding them into the
//! domain enums is the one place a malformed payload can fail, and it
//! surfaces as a decode error rather than a panic.

use pressroom_api_types::{
    BlockDto, NavigationCreateRequest, NavigationItemDto, NavigationTreeNodeDto, PageDto,
    ReorderEntryDto,
};

use crate::application::gateway::{ApiError, NavigationDraft, PositionUpdate};
use crate::domain::blocks::Block;
use crate::domain::navigation::{NavItemKind, NavNode, NavScope, NavigationItem};
use crate::domain::pages::{Page, Slug};

pub(super) fn item_from_dto(dto: NavigationItemDto) -> Result<NavigationItem, ApiError> {
    Ok(NavigationItem {
        id: dto.id,
        label: dto.label,
        url: dto.url,
        kind: NavItemKind::parse(&dto.kind).map_err(ApiError::decode)?,
        parent_id: dto.parent_id,
        position: dto.position,
        icon: dto.icon,
        image_url: dto.image_url,
        description: dto.description,
        badge: dto.badge,
        is_active: dto.is_active,
        scope: NavScope::parse(&dto.scope).map_err(ApiError::decode)?,
    })
}

pub(super) fn node_from_dto(dto: NavigationTreeNodeDto) -> Result<NavNode, ApiError> {
    let children = dto
        .children
        .into_iter()
        .map(node_from_dto)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NavNode {
        item: item_from_dto(dto.item)?,
        children,
    })
}

pub(super) fn dto_from_item(item: &NavigationItem) -> NavigationItemDto {
    NavigationItemDto {
        id: item.id,
        label: item.label.clone(),
        url: item.url.clone(),
        kind: item.kind.as_str().to_string(),
        parent_id: item.parent_id,
        position: item.position,
        icon: item.icon.clone(),
        image_url: item.image_url.clone(),
        description: item.description.clone(),
        badge: item.badge.clone(),
        is_active: item.is_active,
        scope: item.scope.as_str().to_string(),
    }
}

pub(super) fn create_request_from_draft(draft: NavigationDraft) -> NavigationCreateRequest {
    NavigationCreateRequest {
        label: draft.label,
        url: draft.url,
        kind: draft.kind.as_str().to_string(),
        parent_id: draft.parent_id,
        position: draft.position,
        icon: draft.icon,
        image_url: draft.image_url,
        description: draft.description,
        badge: draft.badge,
        is_active: draft.is_active,
        scope: draft.scope.as_str().to_string(),
    }
}

pub(super) fn reorder_entry(update: &PositionUpdate) -> ReorderEntryDto {
    ReorderEntryDto {
        id: update.id,
        position: update.position,
        parent_id: update.parent_id,
    }
}

pub(super) fn block_from_dto(dto: BlockDto) -> Block {
    Block {
        id: dto.id,
        kind: dto.kind,
        content: dto.content,
    }
}

pub(super) fn dto_from_block(block: &Block) -> BlockDto {
    BlockDto {
        id: block.id.clone(),
        kind: block.kind.clone(),
        content: block.content.clone(),
    }
}

pub(super) fn page_from_dto(dto: PageDto) -> Result<Page, ApiError> {
    let slug = Slug::new(dto.slug).map_err(ApiError::decode)?;
    let blocks = dto.content.into_blocks().map_err(ApiError::decode)?;
    Ok(Page {
        id: dto.id,
        slug,
        title: dto.title,
        content: blocks.into_iter().map(block_from_dto).collect(),
    })
}
