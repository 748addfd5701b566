//! Site-wide key/value settings.
//!
//! A flat upsert-by-key store for text the chrome needs outside any page:
//! shop description, contact details, social links, theme color.

use std::collections::BTreeMap;

/// Well-known setting keys. The store accepts arbitrary keys; these are
/// the ones the storefront chrome reads.
pub mod keys {
    pub const SITE_DESCRIPTION: &str = "site.description";
    pub const CONTACT_PHONE: &str = "contact.phone";
    pub const CONTACT_EMAIL: &str = "contact.email";
    pub const THEME_COLOR: &str = "theme.color";
    pub const SOCIAL_PREFIX: &str = "social.";
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteSettings {
    values: BTreeMap<String, String>,
}

impl SiteSettings {
    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn description(&self) -> &str {
        self.get(keys::SITE_DESCRIPTION).unwrap_or("")
    }

    pub fn contact_phone(&self) -> Option<&str> {
        self.get(keys::CONTACT_PHONE)
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.get(keys::CONTACT_EMAIL)
    }

    pub fn theme_color(&self) -> &str {
        self.get(keys::THEME_COLOR).unwrap_or("#1d4ed8")
    }

    /// `(network, url)` pairs for every `social.*` key, in key order.
    pub fn social_links(&self) -> Vec<(&str, &str)> {
        self.values
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(keys::SOCIAL_PREFIX)
                    .map(|network| (network, value.as_str()))
            })
            .collect()
    }
}
