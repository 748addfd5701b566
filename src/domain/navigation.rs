//! Navigation tree data model.
//!
//! Menu entries are stored as flat rows with a nullable parent pointer and
//! an integer sibling position (adjacency list). Nested views are derived
//! on demand; nothing holds live child pointers.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Hard ceiling on parent/child nesting when assembling trees. Header menus
/// use three levels and footers two; anything deeper than this indicates a
/// malformed parent chain and assembly stops rather than recursing on.
pub const MAX_TREE_DEPTH: usize = 16;

/// Which chrome region a navigation item belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavScope {
    Header,
    Footer,
}

impl NavScope {
    pub fn as_str(self) -> &'static str {
        match self {
            NavScope::Header => "header",
            NavScope::Footer => "footer",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "header" => Ok(NavScope::Header),
            "footer" => Ok(NavScope::Footer),
            other => Err(DomainError::validation(format!(
                "unknown navigation scope `{other}`"
            ))),
        }
    }
}

impl fmt::Display for NavScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a navigation item within its scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavItemKind {
    Utility,
    Main,
    MegaCategory,
    MegaItem,
    Promo,
    FooterColumn,
    FooterLink,
    FooterBrand,
    FooterNewsletter,
}

impl NavItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NavItemKind::Utility => "utility",
            NavItemKind::Main => "main",
            NavItemKind::MegaCategory => "mega-category",
            NavItemKind::MegaItem => "mega-item",
            NavItemKind::Promo => "promo",
            NavItemKind::FooterColumn => "footer-column",
            NavItemKind::FooterLink => "footer-link",
            NavItemKind::FooterBrand => "footer-brand",
            NavItemKind::FooterNewsletter => "footer-newsletter",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "utility" => Ok(NavItemKind::Utility),
            "main" => Ok(NavItemKind::Main),
            "mega-category" => Ok(NavItemKind::MegaCategory),
            "mega-item" => Ok(NavItemKind::MegaItem),
            "promo" => Ok(NavItemKind::Promo),
            "footer-column" => Ok(NavItemKind::FooterColumn),
            "footer-link" => Ok(NavItemKind::FooterLink),
            "footer-brand" => Ok(NavItemKind::FooterBrand),
            "footer-newsletter" => Ok(NavItemKind::FooterNewsletter),
            other => Err(DomainError::validation(format!(
                "unknown navigation item kind `{other}`"
            ))),
        }
    }
}

impl fmt::Display for NavItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row of the navigation table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: NavItemKind,
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
    pub scope: NavScope,
}

/// A navigation item with its ordered children, derived from flat rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    #[serde(flatten)]
    pub item: NavigationItem,
    #[serde(default)]
    pub children: Vec<NavNode>,
}

impl NavNode {
    fn leaf(item: NavigationItem) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }
}

/// Assemble flat rows into the nested tree for one scope.
///
/// Roots are rows with no parent, sorted by position; each level of
/// children is sorted by position among its siblings. Rows past
/// [`MAX_TREE_DEPTH`] are dropped with a warning instead of recursing.
pub fn build_tree(items: &[NavigationItem], scope: NavScope) -> Vec<NavNode> {
    let mut roots: Vec<&NavigationItem> = items
        .iter()
        .filter(|item| item.scope == scope && item.parent_id.is_none())
        .collect();
    roots.sort_by_key(|item| item.position);

    roots
        .into_iter()
        .map(|root| attach_children(root, items, 1))
        .collect()
}

/// Like [`build_tree`] but with inactive items pruned, subtree included.
/// This is the shape the public header/footer renderers consume.
pub fn build_active_tree(items: &[NavigationItem], scope: NavScope) -> Vec<NavNode> {
    let active: Vec<NavigationItem> = items.iter().filter(|i| i.is_active).cloned().collect();
    build_tree(&active, scope)
}

fn attach_children(item: &NavigationItem, items: &[NavigationItem], depth: usize) -> NavNode {
    let mut node = NavNode::leaf(item.clone());
    if depth >= MAX_TREE_DEPTH {
        tracing::warn!(
            item_id = item.id,
            depth,
            "navigation nesting limit reached, dropping deeper rows"
        );
        return node;
    }

    let mut children: Vec<&NavigationItem> = items
        .iter()
        .filter(|child| child.parent_id == Some(item.id))
        .collect();
    children.sort_by_key(|child| child.position);

    node.children = children
        .into_iter()
        .map(|child| attach_children(child, items, depth + 1))
        .collect();
    node
}

/// Total node count of an assembled tree, all levels included.
pub fn node_count(nodes: &[NavNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + node_count(&node.children))
        .sum()
}

/// Ids of every descendant of `id` (not including `id` itself), in no
/// particular order. Used to check the cascade contract after a delete.
pub fn descendant_ids(items: &[NavigationItem], id: i64) -> HashSet<i64> {
    let mut found = HashSet::new();
    let mut frontier = vec![id];
    while let Some(current) = frontier.pop() {
        for item in items {
            if item.parent_id == Some(current) && found.insert(item.id) {
                frontier.push(item.id);
            }
        }
    }
    found
}

/// Which item kinds may be created under the given parent kind (or at the
/// root when `parent` is `None`) for a scope. The admin create form offers
/// exactly these; anything else is rejected before it reaches the server.
pub fn allowed_child_kinds(scope: NavScope, parent: Option<NavItemKind>) -> &'static [NavItemKind] {
    match (scope, parent) {
        (NavScope::Header, None) => &[NavItemKind::Utility, NavItemKind::Main],
        (NavScope::Header, Some(NavItemKind::Main)) => &[NavItemKind::MegaCategory],
        (NavScope::Header, Some(NavItemKind::MegaCategory)) => {
            &[NavItemKind::MegaItem, NavItemKind::Promo]
        }
        (NavScope::Footer, None) => &[
            NavItemKind::FooterColumn,
            NavItemKind::FooterBrand,
            NavItemKind::FooterNewsletter,
        ],
        (NavScope::Footer, Some(NavItemKind::FooterColumn)) => &[NavItemKind::FooterLink],
        _ => &[],
    }
}

/// Validate a (kind, parent) pairing against the allow-list, resolving the
/// parent row from the flat collection.
pub fn validate_placement(
    items: &[NavigationItem],
    scope: NavScope,
    kind: NavItemKind,
    parent_id: Option<i64>,
) -> Result<(), DomainError> {
    let parent_kind = match parent_id {
        None => None,
        Some(pid) => {
            let parent = items
                .iter()
                .find(|item| item.id == pid)
                .ok_or(DomainError::not_found("navigation parent"))?;
            if parent.scope != scope {
                return Err(DomainError::invariant(format!(
                    "parent {pid} belongs to scope `{}`, item targets `{scope}`",
                    parent.scope
                )));
            }
            Some(parent.kind)
        }
    };

    if allowed_child_kinds(scope, parent_kind).contains(&kind) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "`{kind}` is not allowed under {} in the {scope} tree",
            parent_kind.map_or("the root".to_string(), |k| format!("`{k}`")),
        )))
    }
}
