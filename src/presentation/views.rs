//! View structs for the storefront chrome.
//!
//! The header and footer are assembled from the active navigation tree
//! plus site settings, then handed to their templates. View construction
//! is pure so it can be exercised without rendering.

use askama::Template;

use crate::domain::navigation::{NavItemKind, NavNode};
use crate::domain::settings::SiteSettings;

#[derive(Clone)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub icon: Option<String>,
    pub badge: Option<String>,
}

#[derive(Clone)]
pub struct MegaItemView {
    pub label: String,
    pub href: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub badge: Option<String>,
}

#[derive(Clone)]
pub struct PromoView {
    pub label: String,
    pub href: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct MegaCategoryView {
    pub label: String,
    pub href: String,
    pub items: Vec<MegaItemView>,
    pub promos: Vec<PromoView>,
}

#[derive(Clone)]
pub struct MainNavView {
    pub label: String,
    pub href: String,
    pub badge: Option<String>,
    pub categories: Vec<MegaCategoryView>,
}

#[derive(Clone)]
pub struct HeaderView {
    pub utility: Vec<NavLinkView>,
    pub main: Vec<MainNavView>,
}

#[derive(Clone)]
pub struct FooterColumnView {
    pub heading: String,
    pub links: Vec<NavLinkView>,
}

#[derive(Clone)]
pub struct FooterBrandView {
    pub label: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct NewsletterView {
    pub heading: String,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct SocialLinkView {
    pub network: String,
    pub url: String,
}

#[derive(Clone)]
pub struct FooterView {
    pub brand: Option<FooterBrandView>,
    pub columns: Vec<FooterColumnView>,
    pub newsletter: Option<NewsletterView>,
    pub description: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub theme_color: String,
    pub social: Vec<SocialLinkView>,
}

#[derive(Template)]
#[template(path = "header.html")]
pub struct HeaderTemplate {
    pub view: HeaderView,
}

#[derive(Template)]
#[template(path = "footer.html")]
pub struct FooterTemplate {
    pub view: FooterView,
}

fn href(node: &NavNode) -> String {
    node.item.url.clone().unwrap_or_else(|| "#".to_string())
}

fn link_view(node: &NavNode) -> NavLinkView {
    NavLinkView {
        label: node.item.label.clone(),
        href: href(node),
        icon: node.item.icon.clone(),
        badge: node.item.badge.clone(),
    }
}

fn mega_item_view(node: &NavNode) -> MegaItemView {
    MegaItemView {
        label: node.item.label.clone(),
        href: href(node),
        image_url: node.item.image_url.clone(),
        description: node.item.description.clone(),
        badge: node.item.badge.clone(),
    }
}

fn promo_view(node: &NavNode) -> PromoView {
    PromoView {
        label: node.item.label.clone(),
        href: href(node),
        image_url: node.item.image_url.clone(),
        description: node.item.description.clone(),
    }
}

fn mega_category_view(node: &NavNode) -> MegaCategoryView {
    let items = node
        .children
        .iter()
        .filter(|c| c.item.kind == NavItemKind::MegaItem)
        .map(mega_item_view)
        .collect();
    let promos = node
        .children
        .iter()
        .filter(|c| c.item.kind == NavItemKind::Promo)
        .map(promo_view)
        .collect();
    MegaCategoryView {
        label: node.item.label.clone(),
        href: href(node),
        items,
        promos,
    }
}

/// Build the header view from the active header tree. Root rows split into
/// the utility strip and the main mega-menu bar by kind; anything else at
/// the root is ignored.
pub fn header_view(tree: &[NavNode]) -> HeaderView {
    let utility = tree
        .iter()
        .filter(|n| n.item.kind == NavItemKind::Utility)
        .map(link_view)
        .collect();
    let main = tree
        .iter()
        .filter(|n| n.item.kind == NavItemKind::Main)
        .map(|node| MainNavView {
            label: node.item.label.clone(),
            href: href(node),
            badge: node.item.badge.clone(),
            categories: node
                .children
                .iter()
                .filter(|c| c.item.kind == NavItemKind::MegaCategory)
                .map(mega_category_view)
                .collect(),
        })
        .collect();
    HeaderView { utility, main }
}

/// Build the footer view from the active footer tree and site settings.
pub fn footer_view(tree: &[NavNode], settings: &SiteSettings) -> FooterView {
    let brand = tree
        .iter()
        .find(|n| n.item.kind == NavItemKind::FooterBrand)
        .map(|node| FooterBrandView {
            label: node.item.label.clone(),
            image_url: node.item.image_url.clone(),
            description: node.item.description.clone(),
        });

    let columns = tree
        .iter()
        .filter(|n| n.item.kind == NavItemKind::FooterColumn)
        .map(|node| FooterColumnView {
            heading: node.item.label.clone(),
            links: node
                .children
                .iter()
                .filter(|c| c.item.kind == NavItemKind::FooterLink)
                .map(link_view)
                .collect(),
        })
        .collect();

    let newsletter = tree
        .iter()
        .find(|n| n.item.kind == NavItemKind::FooterNewsletter)
        .map(|node| NewsletterView {
            heading: node.item.label.clone(),
            description: node.item.description.clone(),
        });

    let social = settings
        .social_links()
        .into_iter()
        .map(|(network, url)| SocialLinkView {
            network: network.to_string(),
            url: url.to_string(),
        })
        .collect();

    FooterView {
        brand,
        columns,
        newsletter,
        description: settings.description().to_string(),
        contact_phone: settings.contact_phone().map(str::to_string),
        contact_email: settings.contact_email().map(str::to_string),
        theme_color: settings.theme_color().to_string(),
        social,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::fixtures::item;
    use crate::domain::navigation::{NavScope, build_active_tree};

    #[test]
    fn header_splits_utility_from_main() {
        let items = vec![
            item(1, "Track order", NavItemKind::Utility, None, 0, NavScope::Header),
            item(2, "Products", NavItemKind::Main, None, 1, NavScope::Header),
            item(3, "Paper", NavItemKind::MegaCategory, Some(2), 0, NavScope::Header),
            item(4, "Recycled", NavItemKind::MegaItem, Some(3), 0, NavScope::Header),
            item(5, "Summer sale", NavItemKind::Promo, Some(3), 1, NavScope::Header),
        ];

        let view = header_view(&build_active_tree(&items, NavScope::Header));
        assert_eq!(view.utility.len(), 1);
        assert_eq!(view.utility[0].label, "Track order");
        assert_eq!(view.main.len(), 1);

        let category = &view.main[0].categories[0];
        assert_eq!(category.label, "Paper");
        assert_eq!(category.items.len(), 1);
        assert_eq!(category.promos.len(), 1);
        assert_eq!(category.promos[0].label, "Summer sale");
    }

    #[test]
    fn footer_collects_columns_brand_and_newsletter() {
        let items = vec![
            item(10, "Shop", NavItemKind::FooterColumn, None, 0, NavScope::Footer),
            item(11, "Posters", NavItemKind::FooterLink, Some(10), 0, NavScope::Footer),
            item(12, "Pressroom", NavItemKind::FooterBrand, None, 1, NavScope::Footer),
            item(13, "Stay posted", NavItemKind::FooterNewsletter, None, 2, NavScope::Footer),
        ];
        let mut settings = SiteSettings::default();
        settings.set("social.instagram", "https://instagram.com/pressroom");

        let view = footer_view(&build_active_tree(&items, NavScope::Footer), &settings);
        assert_eq!(view.columns.len(), 1);
        assert_eq!(view.columns[0].links[0].label, "Posters");
        assert_eq!(view.brand.as_ref().map(|b| b.label.as_str()), Some("Pressroom"));
        assert_eq!(
            view.newsletter.as_ref().map(|n| n.heading.as_str()),
            Some("Stay posted")
        );
        assert_eq!(view.social.len(), 1);
    }

    #[test]
    fn inactive_rows_never_reach_the_view() {
        let mut items = vec![
            item(1, "Visible", NavItemKind::Main, None, 0, NavScope::Header),
            item(2, "Hidden", NavItemKind::Main, None, 1, NavScope::Header),
        ];
        items[1].is_active = false;

        let view = header_view(&build_active_tree(&items, NavScope::Header));
        assert_eq!(view.main.len(), 1);
        assert_eq!(view.main[0].label, "Visible");
    }

    #[test]
    fn header_template_renders() {
        let items = vec![item(1, "Products", NavItemKind::Main, None, 0, NavScope::Header)];
        let view = header_view(&build_active_tree(&items, NavScope::Header));
        let html = HeaderTemplate { view }.render().expect("render");
        assert!(html.contains("Products"));
    }
}
