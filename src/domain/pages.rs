use serde::{Deserialize, Serialize};

use super::DomainError;
use super::blocks::Block;

/// URL-safe page identifier: lowercase ASCII letters, digits and hyphens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("slug must not be empty"));
        }
        let valid = raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid || raw.starts_with('-') || raw.ends_with('-') {
            return Err(DomainError::validation(format!(
                "`{raw}` is not a valid slug"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, slugged document whose content is an ordered block sequence.
/// Saves replace the whole sequence; there is no partial update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub slug: Slug,
    pub title: String,
    pub content: Vec<Block>,
}
