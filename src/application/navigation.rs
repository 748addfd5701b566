//! Admin navigation editor: flattened tree view, drag reorder, optimistic
//! mutation with refetch-on-rejection.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::application::gateway::{ApiError, NavigationApi, NavigationDraft, PositionUpdate};
use crate::domain::DomainError;
use crate::domain::navigation::{
    MAX_TREE_DEPTH, NavScope, NavigationItem, descendant_ids, validate_placement,
};

#[derive(Debug, Error)]
pub enum NavigationEditorError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("reorder rejected, authoritative list refetched: {source}")]
    ReorderRejected {
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One row of the admin list: the item plus its indentation level and the
/// expand/collapse affordances the row needs.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatNode {
    pub item: NavigationItem,
    pub level: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Depth-first pre-order projection of the tree for the admin list.
///
/// A node's children follow it immediately, but only when its id is in
/// `expanded`; collapsed subtrees are omitted wholesale. This is a view
/// over the flat rows, it never mutates them.
pub fn flatten(
    items: &[NavigationItem],
    expanded: &HashSet<i64>,
    scope: NavScope,
) -> Vec<FlatNode> {
    let mut out = Vec::new();
    let mut roots: Vec<&NavigationItem> = items
        .iter()
        .filter(|item| item.scope == scope && item.parent_id.is_none())
        .collect();
    roots.sort_by_key(|item| item.position);

    for root in roots {
        push_subtree(root, items, expanded, 0, &mut out);
    }
    out
}

fn push_subtree(
    item: &NavigationItem,
    items: &[NavigationItem],
    expanded: &HashSet<i64>,
    level: usize,
    out: &mut Vec<FlatNode>,
) {
    let mut children: Vec<&NavigationItem> = items
        .iter()
        .filter(|child| child.parent_id == Some(item.id))
        .collect();
    children.sort_by_key(|child| child.position);

    let is_expanded = expanded.contains(&item.id);
    out.push(FlatNode {
        item: item.clone(),
        level,
        has_children: !children.is_empty(),
        expanded: is_expanded,
    });

    if !is_expanded || level + 1 >= MAX_TREE_DEPTH {
        return;
    }
    for child in children {
        push_subtree(child, items, expanded, level + 1, out);
    }
}

/// The renumbered position/parent assignments resulting from one drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReorderPlan {
    pub updates: Vec<PositionUpdate>,
}

/// Compute the effect of dropping `active_id` onto `over_id`.
///
/// The active item joins the sibling group of the item it was dropped on,
/// inserted after the target when the drag moved it to a higher flattened
/// index and before it otherwise. The destination group is renumbered
/// 0..n-1; when the move crosses parents the vacated group is renumbered
/// too, so both stay gap-free. Dropping onto self or onto one of the
/// active item's own descendants would parent the item into its own
/// subtree, so those gestures yield `None`, as do ids absent from the
/// flattened order.
pub fn plan_reorder(
    items: &[NavigationItem],
    flat_order: &[i64],
    active_id: i64,
    over_id: i64,
) -> Option<ReorderPlan> {
    if active_id == over_id || descendant_ids(items, active_id).contains(&over_id) {
        return None;
    }

    let old_index = flat_order.iter().position(|id| *id == active_id)?;
    let new_index = flat_order.iter().position(|id| *id == over_id)?;

    let active = items.iter().find(|item| item.id == active_id)?;
    let over = items.iter().find(|item| item.id == over_id)?;
    if active.scope != over.scope {
        return None;
    }

    let source_parent = active.parent_id;
    let dest_parent = over.parent_id;

    let mut destination: Vec<i64> = sibling_ids(items, active.scope, dest_parent)
        .into_iter()
        .filter(|id| *id != active_id)
        .collect();
    let over_slot = destination.iter().position(|id| *id == over_id)?;
    let insert_at = if new_index > old_index {
        over_slot + 1
    } else {
        over_slot
    };
    destination.insert(insert_at, active_id);

    let mut updates: Vec<PositionUpdate> = destination
        .into_iter()
        .enumerate()
        .map(|(slot, id)| PositionUpdate {
            id,
            position: slot as i32,
            parent_id: dest_parent,
        })
        .collect();

    if source_parent != dest_parent {
        let vacated = sibling_ids(items, active.scope, source_parent)
            .into_iter()
            .filter(|id| *id != active_id)
            .enumerate()
            .map(|(slot, id)| PositionUpdate {
                id,
                position: slot as i32,
                parent_id: source_parent,
            });
        updates.extend(vacated);
    }

    Some(ReorderPlan { updates })
}

fn sibling_ids(items: &[NavigationItem], scope: NavScope, parent_id: Option<i64>) -> Vec<i64> {
    let mut siblings: Vec<&NavigationItem> = items
        .iter()
        .filter(|item| item.scope == scope && item.parent_id == parent_id)
        .collect();
    siblings.sort_by_key(|item| item.position);
    siblings.into_iter().map(|item| item.id).collect()
}

/// Write a plan's assignments into the local row set.
pub fn apply_plan(items: &mut [NavigationItem], plan: &ReorderPlan) {
    for update in &plan.updates {
        if let Some(item) = items.iter_mut().find(|item| item.id == update.id) {
            item.position = update.position;
            item.parent_id = update.parent_id;
        }
    }
}

/// Outcome of a drag-end as seen by the UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    Applied,
    Noop,
}

/// State machine behind the admin drag-and-drop tree for one scope.
///
/// Mutations apply to the local copy first and the server confirms; on
/// rejection the whole list is refetched, taking the server's view
/// wholesale rather than attempting a fine-grained undo.
pub struct NavigationEditor {
    api: Arc<dyn NavigationApi>,
    scope: NavScope,
    items: Vec<NavigationItem>,
    expanded: HashSet<i64>,
}

impl NavigationEditor {
    pub fn new(api: Arc<dyn NavigationApi>, scope: NavScope) -> Self {
        Self {
            api,
            scope,
            items: Vec::new(),
            expanded: HashSet::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), NavigationEditorError> {
        self.items = self.api.list_all(self.scope).await?;
        debug!(scope = %self.scope, count = self.items.len(), "navigation list loaded");
        Ok(())
    }

    pub fn scope(&self) -> NavScope {
        self.scope
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn flat_view(&self) -> Vec<FlatNode> {
        flatten(&self.items, &self.expanded, self.scope)
    }

    /// Apply a drag-end: plan, mutate locally, confirm with the server.
    /// A rejected confirmation refetches the authoritative list before
    /// surfacing the error.
    pub async fn drag_end(
        &mut self,
        active_id: i64,
        over_id: i64,
    ) -> Result<DragOutcome, NavigationEditorError> {
        let flat_order: Vec<i64> = self.flat_view().iter().map(|node| node.item.id).collect();
        let Some(plan) = plan_reorder(&self.items, &flat_order, active_id, over_id) else {
            return Ok(DragOutcome::Noop);
        };

        apply_plan(&mut self.items, &plan);

        if let Err(source) = self.api.reorder_bulk(&plan.updates).await {
            warn!(scope = %self.scope, error = %source, "bulk reorder rejected, refetching");
            self.items = self.api.list_all(self.scope).await?;
            return Err(NavigationEditorError::ReorderRejected { source });
        }
        Ok(DragOutcome::Applied)
    }

    /// Create an item after checking the per-scope parent allow-list.
    pub async fn create(
        &mut self,
        draft: NavigationDraft,
    ) -> Result<NavigationItem, NavigationEditorError> {
        validate_placement(&self.items, self.scope, draft.kind, draft.parent_id)?;
        let item = self.api.create(draft).await?;
        self.items.push(item.clone());
        Ok(item)
    }

    pub async fn update(
        &mut self,
        item: NavigationItem,
    ) -> Result<NavigationItem, NavigationEditorError> {
        validate_placement(&self.items, self.scope, item.kind, item.parent_id)?;
        let updated = self.api.update(&item).await?;
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == updated.id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    /// Delete an item; the server cascades to descendants and the local
    /// copy mirrors that.
    pub async fn delete(&mut self, id: i64) -> Result<(), NavigationEditorError> {
        self.api.delete(id).await?;
        let doomed = descendant_ids(&self.items, id);
        self.items
            .retain(|item| item.id != id && !doomed.contains(&item.id));
        self.expanded
            .retain(|kept| *kept != id && !doomed.contains(kept));
        Ok(())
    }
}
