//! Schema-driven form generation for the block editor.
//!
//! Given a block definition and the block's stored content, `build_form`
//! produces the control tree the admin UI renders: one control per field,
//! grouped into content/style/advanced sections, with repeater fields
//! recursing into one sub-form per array element. Writes go back through
//! `apply_change` using a path of keys and indices, so the same machinery
//! serves plain fields and nested repeater rows.

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::domain::DomainError;
use crate::domain::blocks::BlockContent;
use crate::domain::schema::{
    BlockDefinition, FieldDefinition, FieldGroup, FieldKind, SelectOption,
};

/// Repeaters nested past this depth stop producing rows. The shipped
/// registry never nests repeaters, but nothing forbids a schema that does.
pub const MAX_FORM_DEPTH: usize = 8;

/// Concrete editor control plus its current value.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    Text { value: String },
    Textarea { value: String },
    Image { value: String },
    Color { value: String },
    Select { value: String, options: Vec<SelectOption> },
    Toggle { value: bool },
    Number { value: f64 },
    Repeater { rows: Vec<Vec<FormControl>> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormControl {
    pub name: String,
    pub label: String,
    pub control: ControlKind,
}

/// One tab of the editor form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormSection {
    pub group: FieldGroup,
    pub controls: Vec<FormControl>,
}

/// Build the editor form for a block: stored values where present, schema
/// defaults where absent, unknown stored keys ignored (and preserved in
/// the content untouched).
pub fn build_form(definition: &BlockDefinition, content: &BlockContent) -> Vec<FormSection> {
    let mut sections: Vec<FormSection> = Vec::new();
    for group in [FieldGroup::Content, FieldGroup::Style, FieldGroup::Advanced] {
        let controls: Vec<FormControl> = definition
            .fields
            .iter()
            .filter(|field| field.group == group)
            .map(|field| control_for(field, content.get(field.name.as_str()), 0))
            .collect();
        if !controls.is_empty() {
            sections.push(FormSection { group, controls });
        }
    }
    sections
}

fn control_for(field: &FieldDefinition, stored: Option<&Value>, depth: usize) -> FormControl {
    let value = stored.cloned().unwrap_or_else(|| field.effective_default());
    let control = match field.kind {
        FieldKind::Text => ControlKind::Text {
            value: string_of(&value),
        },
        FieldKind::Textarea => ControlKind::Textarea {
            value: string_of(&value),
        },
        FieldKind::Image => ControlKind::Image {
            value: string_of(&value),
        },
        FieldKind::Color => ControlKind::Color {
            value: string_of(&value),
        },
        FieldKind::Select => ControlKind::Select {
            value: string_of(&value),
            options: field.options.clone(),
        },
        FieldKind::Toggle => ControlKind::Toggle {
            value: value.as_bool().unwrap_or(false),
        },
        FieldKind::Number => ControlKind::Number {
            value: value.as_f64().unwrap_or(0.0),
        },
        FieldKind::Repeater => ControlKind::Repeater {
            rows: repeater_rows(field, &value, depth),
        },
    };

    FormControl {
        name: field.name.clone(),
        label: field.label.clone(),
        control,
    }
}

fn repeater_rows(field: &FieldDefinition, value: &Value, depth: usize) -> Vec<Vec<FormControl>> {
    if depth >= MAX_FORM_DEPTH {
        warn!(field = %field.name, depth, "repeater nesting limit reached, omitting rows");
        return Vec::new();
    }
    let Some(elements) = value.as_array() else {
        return Vec::new();
    };

    elements
        .iter()
        .map(|element| {
            let empty = Map::new();
            let row = element.as_object().unwrap_or(&empty);
            field
                .item_fields
                .iter()
                .map(|item_field| {
                    control_for(item_field, row.get(item_field.name.as_str()), depth + 1)
                })
                .collect()
        })
        .collect()
}

fn string_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// One step of a write path: an object key or a repeater row index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

impl PathSeg {
    pub fn key(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

/// Write `value` into the content map at `path`.
///
/// `[Key("title")]` sets a top-level field; `[Key("slides"), Index(1),
/// Key("caption")]` sets a field of the second repeater row. Intermediate
/// steps must already exist; pointing past the end of an array or at a
/// missing key is a validation error, not a silent create.
pub fn apply_change(
    content: &mut BlockContent,
    path: &[PathSeg],
    value: Value,
) -> Result<(), DomainError> {
    let (first, rest) = path
        .split_first()
        .ok_or_else(|| DomainError::validation("empty field path"))?;
    let PathSeg::Key(name) = first else {
        return Err(DomainError::validation("field path must start with a key"));
    };

    if rest.is_empty() {
        content.insert(name.clone(), value);
        return Ok(());
    }

    let slot = content
        .get_mut(name.as_str())
        .ok_or_else(|| DomainError::validation(format!("no field `{name}` to descend into")))?;
    write_nested(slot, rest, value)
}

fn write_nested(slot: &mut Value, path: &[PathSeg], value: Value) -> Result<(), DomainError> {
    let (first, rest) = path
        .split_first()
        .ok_or_else(|| DomainError::validation("empty field path"))?;

    let next = match first {
        PathSeg::Index(index) => slot
            .as_array_mut()
            .ok_or_else(|| DomainError::validation("indexed into a non-array field"))?
            .get_mut(*index)
            .ok_or_else(|| DomainError::validation(format!("repeater row {index} out of range")))?,
        PathSeg::Key(name) => {
            let object = slot
                .as_object_mut()
                .ok_or_else(|| DomainError::validation("keyed into a non-object value"))?;
            if rest.is_empty() {
                object.insert(name.clone(), value);
                return Ok(());
            }
            object
                .get_mut(name.as_str())
                .ok_or_else(|| DomainError::validation(format!("no field `{name}` to descend into")))?
        }
    };

    if rest.is_empty() {
        *next = value;
        return Ok(());
    }
    write_nested(next, rest, value)
}

/// A fresh repeater row: one key per item field, holding its default.
pub fn default_row(field: &FieldDefinition) -> Value {
    let row: Map<String, Value> = field
        .item_fields
        .iter()
        .map(|item_field| (item_field.name.clone(), item_field.effective_default()))
        .collect();
    Value::Object(row)
}

/// Append a default row to a repeater field, creating the array when the
/// stored content predates the field. Returns the new row's index.
pub fn repeater_add(
    content: &mut BlockContent,
    field: &FieldDefinition,
) -> Result<usize, DomainError> {
    if field.kind != FieldKind::Repeater {
        return Err(DomainError::validation(format!(
            "`{}` is not a repeater field",
            field.name
        )));
    }
    let entry = content
        .entry(field.name.clone())
        .or_insert_with(|| json!([]));
    let rows = entry
        .as_array_mut()
        .ok_or_else(|| DomainError::validation("repeater value is not an array"))?;
    rows.push(default_row(field));
    Ok(rows.len() - 1)
}

/// Remove one row of a repeater field by index.
pub fn repeater_remove(
    content: &mut BlockContent,
    field_name: &str,
    index: usize,
) -> Result<(), DomainError> {
    let rows = content
        .get_mut(field_name)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| DomainError::validation(format!("no repeater field `{field_name}`")))?;
    if index >= rows.len() {
        return Err(DomainError::validation(format!(
            "repeater row {index} out of range"
        )));
    }
    rows.remove(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{default_content, kinds, registry};

    fn definition(kind: &str) -> &'static BlockDefinition {
        registry().get(kind).expect("registered kind")
    }

    #[test]
    fn hero_form_groups_fields_into_tabs() {
        let content = default_content(kinds::HERO).expect("content");
        let sections = build_form(definition(kinds::HERO), &content);

        let groups: Vec<FieldGroup> = sections.iter().map(|s| s.group).collect();
        assert_eq!(groups, [FieldGroup::Content, FieldGroup::Style]);

        let content_names: Vec<&str> = sections[0]
            .controls
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(content_names, ["title", "subtitle", "image", "cta_label", "cta_url"]);
    }

    #[test]
    fn missing_fields_render_with_schema_defaults() {
        // Content saved before `height` existed.
        let mut content = default_content(kinds::HERO).expect("content");
        content.remove("height");
        content.insert("legacy_key".to_string(), json!("kept"));

        let sections = build_form(definition(kinds::HERO), &content);
        let style = sections.iter().find(|s| s.group == FieldGroup::Style).expect("style tab");
        let height = style.controls.iter().find(|c| c.name == "height").expect("height");
        assert_eq!(
            height.control,
            ControlKind::Select {
                value: "medium".to_string(),
                options: definition(kinds::HERO).field("height").expect("field").options.clone(),
            }
        );
        // The unknown stored key is simply not a control; it stays in content.
        assert!(content.contains_key("legacy_key"));
    }

    #[test]
    fn mistyped_stored_values_fall_back_quietly() {
        let mut content = default_content(kinds::SLIDER).expect("content");
        content.insert("autoplay".to_string(), json!("yes"));
        content.insert("interval_ms".to_string(), json!("soon"));

        let sections = build_form(definition(kinds::SLIDER), &content);
        let advanced = sections.iter().find(|s| s.group == FieldGroup::Advanced).expect("tab");
        assert!(advanced.controls.iter().any(|c| c.control == ControlKind::Toggle { value: false }));
        assert!(advanced.controls.iter().any(|c| c.control == ControlKind::Number { value: 0.0 }));
    }

    #[test]
    fn repeater_rows_recurse_into_item_fields() {
        let mut content = default_content(kinds::SLIDER).expect("content");
        let slides = definition(kinds::SLIDER).field("slides").expect("field");
        repeater_add(&mut content, slides).expect("add");
        repeater_add(&mut content, slides).expect("add");
        apply_change(
            &mut content,
            &[PathSeg::key("slides"), PathSeg::Index(1), PathSeg::key("title")],
            json!("Second slide"),
        )
        .expect("write");

        let sections = build_form(definition(kinds::SLIDER), &content);
        let repeater = sections[0]
            .controls
            .iter()
            .find(|c| c.name == "slides")
            .expect("slides control");
        let ControlKind::Repeater { rows } = &repeater.control else {
            panic!("expected repeater control");
        };
        assert_eq!(rows.len(), 2);
        let title = rows[1].iter().find(|c| c.name == "title").expect("title");
        assert_eq!(
            title.control,
            ControlKind::Text {
                value: "Second slide".to_string()
            }
        );
    }

    #[test]
    fn repeater_add_and_remove_manage_the_array() {
        let mut content = BlockContent::new();
        let items = definition(kinds::LIST).field("items").expect("field");

        assert_eq!(repeater_add(&mut content, items).expect("add"), 0);
        assert_eq!(repeater_add(&mut content, items).expect("add"), 1);
        repeater_remove(&mut content, "items", 0).expect("remove");

        let remaining = content["items"].as_array().expect("array");
        assert_eq!(remaining.len(), 1);
        assert!(repeater_remove(&mut content, "items", 5).is_err());
        assert!(repeater_remove(&mut content, "absent", 0).is_err());
    }

    #[test]
    fn apply_change_rejects_broken_paths() {
        let mut content = default_content(kinds::SLIDER).expect("content");
        assert!(apply_change(&mut content, &[], json!("x")).is_err());
        assert!(
            apply_change(
                &mut content,
                &[PathSeg::key("slides"), PathSeg::Index(9), PathSeg::key("title")],
                json!("x"),
            )
            .is_err()
        );
        assert!(
            apply_change(
                &mut content,
                &[PathSeg::key("autoplay"), PathSeg::key("nested")],
                json!("x"),
            )
            .is_err()
        );
    }

    #[test]
    fn repeater_nesting_stops_at_the_depth_limit() {
        // A self-nesting schema no registry entry actually uses.
        let mut leaf = FieldDefinition::new("rows", "Rows", FieldKind::Repeater);
        for _ in 0..(MAX_FORM_DEPTH + 2) {
            leaf = FieldDefinition::new("rows", "Rows", FieldKind::Repeater)
                .item_fields(vec![leaf]);
        }

        // Matching deeply nested content.
        let mut value = json!([{"rows": []}]);
        for _ in 0..(MAX_FORM_DEPTH + 2) {
            value = json!([{ "rows": value }]);
        }

        let control = control_for(&leaf, Some(&value), 0);
        // Walk down; the chain must terminate with an empty rows list
        // instead of recursing unboundedly.
        let mut current = &control;
        let mut depth = 0;
        loop {
            let ControlKind::Repeater { rows } = &current.control else {
                panic!("expected repeater at depth {depth}");
            };
            if rows.is_empty() {
                break;
            }
            current = &rows[0][0];
            depth += 1;
            assert!(depth <= MAX_FORM_DEPTH, "nesting was not cut off");
        }
    }
}
