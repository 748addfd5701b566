//! Block content model.
//!
//! A page's content is an ordered list of typed blocks. Each block carries
//! a free-form JSON object whose expected shape is described by the schema
//! registry (`domain::schema`); nothing enforces that shape at rest, so
//! accessors here degrade to empty values instead of erroring on stale or
//! missing keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Free-form content payload of a block.
pub type BlockContent = serde_json::Map<String, Value>;

/// Key under which a section-layout block stores its nested columns.
pub const COLUMNS_KEY: &str = "columns";

/// A typed, schema-described unit of page content.
///
/// `id` is a short client-generated token that stays stable across
/// reorders; `kind` is the tag looked up in the schema registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: BlockContent,
}

impl Block {
    pub fn new(kind: impl Into<String>, content: BlockContent) -> Self {
        Self {
            id: generate_block_id(),
            kind: kind.into(),
            content,
        }
    }

    /// String field, empty when absent or of another JSON type.
    pub fn text(&self, key: &str) -> &str {
        self.content.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Boolean field, `false` when absent.
    pub fn flag(&self, key: &str) -> bool {
        self.content
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Numeric field with a caller-supplied fallback.
    pub fn number(&self, key: &str, fallback: f64) -> f64 {
        self.content
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(fallback)
    }

    /// Array field, empty when absent.
    pub fn array(&self, key: &str) -> &[Value] {
        self.content
            .get(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// Nested columns of a section-layout block. Entries that do not parse
    /// as columns are skipped, matching the tolerant read policy above.
    pub fn columns(&self) -> Vec<LayoutColumn> {
        self.array(COLUMNS_KEY)
            .iter()
            .filter_map(|value| serde_json::from_value(value.clone()).ok())
            .collect()
    }

    /// Replace the nested columns of a section-layout block.
    pub fn set_columns(&mut self, columns: Vec<LayoutColumn>) {
        let encoded = columns
            .into_iter()
            .map(|column| serde_json::to_value(column).unwrap_or(Value::Null))
            .collect();
        self.content
            .insert(COLUMNS_KEY.to_string(), Value::Array(encoded));
    }
}

/// One column of a section-layout block, holding its own block sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutColumn {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Short random id for a freshly added block, unique within a page with
/// overwhelming probability and stable for the lifetime of the block.
pub fn generate_block_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..10].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(pairs: &[(&str, Value)]) -> BlockContent {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn accessors_tolerate_missing_and_mistyped_fields() {
        let block = Block::new("hero", content(&[("title", json!(42))]));
        assert_eq!(block.text("title"), "");
        assert_eq!(block.text("subtitle"), "");
        assert!(!block.flag("autoplay"));
        assert_eq!(block.number("interval_ms", 5000.0), 5000.0);
        assert!(block.array("slides").is_empty());
    }

    #[test]
    fn block_ids_are_short_and_distinct() {
        let a = generate_block_id();
        let b = generate_block_id();
        assert_eq!(a.len(), 10);
        assert_ne!(a, b);
    }

    #[test]
    fn columns_round_trip_through_content() {
        let inner = Block::new("text", content(&[("body", json!("inside"))]));
        let mut layout = Block::new("section-layout", BlockContent::new());
        layout.set_columns(vec![
            LayoutColumn {
                blocks: vec![inner.clone()],
            },
            LayoutColumn::default(),
        ]);

        let columns = layout.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].blocks, vec![inner]);
        assert!(columns[1].blocks.is_empty());
    }

    #[test]
    fn malformed_column_entries_are_skipped() {
        let mut layout = Block::new("section-layout", BlockContent::new());
        layout
            .content
            .insert(COLUMNS_KEY.to_string(), json!([{"blocks": []}, "garbage"]));
        assert_eq!(layout.columns().len(), 1);
    }

    #[test]
    fn wire_shape_uses_the_type_tag() {
        let block = Block::new("cta", content(&[("heading", json!("Order now"))]));
        let value = serde_json::to_value(&block).expect("encode");
        assert_eq!(value["type"], "cta");
        assert_eq!(value["content"]["heading"], "Order now");
    }
}
