//! Block schema registry.
//!
//! One fixed table maps each block kind to its editable field list. The
//! admin form generator and the public renderer both key off this table,
//! which is what keeps the two sides in sync: a kind missing from the
//! registry produces no form and no output, never an error.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Value, json};

use super::blocks::{BlockContent, COLUMNS_KEY};

/// Block kind tags. Persisted content refers to these strings, so they are
/// part of the storage contract and must not be renamed casually.
pub mod kinds {
    pub const HERO: &str = "hero";
    pub const TEXT: &str = "text";
    pub const IMAGE: &str = "image";
    pub const SLIDER: &str = "slider";
    pub const PARALLAX: &str = "parallax";
    pub const LIST: &str = "list";
    pub const CTA: &str = "cta";
    pub const SECTION_LAYOUT: &str = "section-layout";
}

/// Editor control used for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Image,
    Color,
    Select,
    Toggle,
    Number,
    Repeater,
}

impl FieldKind {
    /// Default used when a field declares none of its own.
    fn implicit_default(self) -> Value {
        match self {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Image | FieldKind::Color => {
                json!("")
            }
            FieldKind::Select => json!(""),
            FieldKind::Toggle => json!(false),
            FieldKind::Number => json!(0),
            FieldKind::Repeater => json!([]),
        }
    }
}

/// Editor tab a field is shown under. Purely presentational grouping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    #[default]
    Content,
    Style,
    Advanced,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Declarative description of one editable field.
#[derive(Clone, Debug, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub options: Vec<SelectOption>,
    /// Shape of each array element; only meaningful for `Repeater`.
    pub item_fields: Vec<FieldDefinition>,
    pub group: FieldGroup,
}

impl FieldDefinition {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            default: None,
            options: Vec::new(),
            item_fields: Vec::new(),
            group: FieldGroup::Content,
        }
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn group(mut self, group: FieldGroup) -> Self {
        self.group = group;
        self
    }

    pub fn options(mut self, pairs: &[(&str, &str)]) -> Self {
        self.options = pairs
            .iter()
            .map(|(value, label)| SelectOption {
                value: (*value).to_string(),
                label: (*label).to_string(),
            })
            .collect();
        self
    }

    pub fn item_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.item_fields = fields;
        self
    }

    /// The value a fresh block starts with for this field: the declared
    /// default, else the first select option, else the kind's zero value.
    pub fn effective_default(&self) -> Value {
        if let Some(default) = &self.default {
            return default.clone();
        }
        if self.kind == FieldKind::Select {
            if let Some(first) = self.options.first() {
                return json!(first.value);
            }
        }
        self.kind.implicit_default()
    }
}

/// Everything the editor and renderer know about one block kind.
#[derive(Clone, Debug, Serialize)]
pub struct BlockDefinition {
    pub kind: String,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

impl BlockDefinition {
    fn new(kind: &str, label: &str, icon: &str, description: &str) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            fields: Vec::new(),
        }
    }

    fn fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The fixed kind → definition table. Order is the order the admin "add
/// block" palette presents.
pub struct BlockRegistry {
    definitions: Vec<BlockDefinition>,
}

impl BlockRegistry {
    pub fn get(&self, kind: &str) -> Option<&BlockDefinition> {
        self.definitions.iter().find(|def| def.kind == kind)
    }

    pub fn definitions(&self) -> &[BlockDefinition] {
        &self.definitions
    }
}

static REGISTRY: OnceLock<BlockRegistry> = OnceLock::new();

pub fn registry() -> &'static BlockRegistry {
    REGISTRY.get_or_init(build_registry)
}

/// Content object for a freshly added block: one key per declared field,
/// each holding an independent copy of the field default. Returns `None`
/// for kinds the registry does not know.
pub fn default_content(kind: &str) -> Option<BlockContent> {
    let definition = registry().get(kind)?;
    let mut content = BlockContent::new();
    for field in &definition.fields {
        content.insert(field.name.clone(), field.effective_default());
    }
    if kind == kinds::SECTION_LAYOUT {
        let column_count = content
            .get("column_count")
            .and_then(Value::as_str)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(2);
        let columns: Vec<Value> = (0..column_count).map(|_| json!({ "blocks": [] })).collect();
        content.insert(COLUMNS_KEY.to_string(), Value::Array(columns));
    }
    Some(content)
}

fn build_registry() -> BlockRegistry {
    use FieldGroup::{Advanced, Style};
    use FieldKind::{Color, Image, Number, Repeater, Select, Text, Textarea, Toggle};

    let definitions = vec![
        BlockDefinition::new("hero", "Hero banner", "panorama", "Full-width opener with headline and call to action").fields(vec![
            FieldDefinition::new("title", "Title", Text)
                .default_value(json!("Quality printing, fast turnaround")),
            FieldDefinition::new("subtitle", "Subtitle", Textarea),
            FieldDefinition::new("image", "Background image", Image),
            FieldDefinition::new("cta_label", "Button label", Text).default_value(json!("Get a quote")),
            FieldDefinition::new("cta_url", "Button link", Text).default_value(json!("/contact")),
            FieldDefinition::new("overlay_color", "Overlay color", Color)
                .default_value(json!("#0f172a"))
                .group(Style),
            FieldDefinition::new("height", "Height", Select)
                .options(&[("small", "Small"), ("medium", "Medium"), ("full", "Full screen")])
                .default_value(json!("medium"))
                .group(Style),
        ]),
        BlockDefinition::new("text", "Text", "notes", "Heading plus body copy").fields(vec![
            FieldDefinition::new("heading", "Heading", Text),
            FieldDefinition::new("body", "Body", Textarea),
            FieldDefinition::new("align", "Alignment", Select)
                .options(&[("left", "Left"), ("center", "Center"), ("right", "Right")])
                .group(Style),
        ]),
        BlockDefinition::new("image", "Image", "photo", "Single image with caption").fields(vec![
            FieldDefinition::new("url", "Image", Image),
            FieldDefinition::new("alt", "Alt text", Text),
            FieldDefinition::new("caption", "Caption", Text),
            FieldDefinition::new("rounded", "Rounded corners", Toggle)
                .default_value(json!(true))
                .group(Style),
        ]),
        BlockDefinition::new("slider", "Slider", "view_carousel", "Rotating set of slides").fields(vec![
            FieldDefinition::new("slides", "Slides", Repeater).item_fields(vec![
                FieldDefinition::new("image", "Image", Image),
                FieldDefinition::new("title", "Title", Text),
                FieldDefinition::new("caption", "Caption", Text),
            ]),
            FieldDefinition::new("autoplay", "Autoplay", Toggle)
                .default_value(json!(true))
                .group(Advanced),
            FieldDefinition::new("interval_ms", "Interval (ms)", Number)
                .default_value(json!(5000))
                .group(Advanced),
        ]),
        BlockDefinition::new("parallax", "Parallax", "layers", "Background image scrolling at its own speed").fields(vec![
            FieldDefinition::new("image", "Background image", Image),
            FieldDefinition::new("heading", "Heading", Text),
            FieldDefinition::new("speed", "Scroll speed", Number)
                .default_value(json!(0.3))
                .group(Style),
        ]),
        BlockDefinition::new("list", "Feature list", "checklist", "Titled list of structured entries").fields(vec![
            FieldDefinition::new("title", "Title", Text),
            FieldDefinition::new("items", "Items", Repeater).item_fields(vec![
                FieldDefinition::new("icon", "Icon", Text),
                FieldDefinition::new("title", "Title", Text),
                FieldDefinition::new("description", "Description", Textarea),
            ]),
            FieldDefinition::new("style", "Style", Select)
                .options(&[("bullets", "Bullets"), ("checks", "Checkmarks"), ("cards", "Cards")])
                .group(Style),
        ]),
        BlockDefinition::new("cta", "Call to action", "campaign", "Colored band with a single button").fields(vec![
            FieldDefinition::new("heading", "Heading", Text).default_value(json!("Ready to print?")),
            FieldDefinition::new("body", "Body", Textarea),
            FieldDefinition::new("button_label", "Button label", Text)
                .default_value(json!("Start your order")),
            FieldDefinition::new("button_url", "Button link", Text).default_value(json!("/order")),
            FieldDefinition::new("background", "Background color", Color)
                .default_value(json!("#1d4ed8"))
                .group(Style),
        ]),
        BlockDefinition::new(
            kinds::SECTION_LAYOUT,
            "Section layout",
            "view_column",
            "Columns that hold further blocks",
        )
        .fields(vec![
            FieldDefinition::new("column_count", "Columns", Select)
                .options(&[("2", "Two"), ("3", "Three"), ("4", "Four")])
                .default_value(json!("2"))
                .group(Style),
            FieldDefinition::new("gap", "Column gap", Select)
                .options(&[("small", "Small"), ("medium", "Medium"), ("large", "Large")])
                .default_value(json!("medium"))
                .group(Style),
            FieldDefinition::new("background", "Background color", Color).group(Style),
        ]),
    ];

    BlockRegistry { definitions }
}
