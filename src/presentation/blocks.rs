//! Block renderer for the public storefront.
//!
//! Each registered block kind maps to one template. Kinds absent from the
//! schema registry render to nothing, so a page saved by a newer admin
//! build still displays its known blocks on an older storefront.

use askama::Template;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::blocks::Block;
use crate::domain::pages::Page;
use crate::domain::schema::kinds;

/// Nested section-layouts deeper than this render as empty output.
pub const DEFAULT_MAX_DEPTH: usize = 8;

#[derive(Debug, thiserror::Error)]
#[error("failed to render `{kind}` block")]
pub struct RenderError {
    pub kind: String,
    #[source]
    source: askama::Error,
}

impl RenderError {
    fn new(kind: &str, source: askama::Error) -> Self {
        Self {
            kind: kind.to_string(),
            source,
        }
    }
}

/// Renders a page's block list to HTML.
pub struct PageRenderer {
    max_depth: usize,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let body = self.render_blocks(&page.content)?;
        let template = PageTemplate {
            title: page.title.clone(),
            body,
        };
        template
            .render()
            .map_err(|source| RenderError::new("page", source))
    }

    pub fn render_blocks(&self, blocks: &[Block]) -> Result<String, RenderError> {
        self.render_at(blocks, 0)
    }

    fn render_at(&self, blocks: &[Block], depth: usize) -> Result<String, RenderError> {
        let mut out = String::new();
        for block in blocks {
            out.push_str(&self.render_block(block, depth)?);
        }
        Ok(out)
    }

    fn render_block(&self, block: &Block, depth: usize) -> Result<String, RenderError> {
        match block.kind.as_str() {
            kinds::HERO => render(
                &block.kind,
                HeroTemplate {
                    title: block.text("title").to_string(),
                    subtitle: block.text("subtitle").to_string(),
                    image: block.text("image").to_string(),
                    cta_label: block.text("cta_label").to_string(),
                    cta_url: block.text("cta_url").to_string(),
                    overlay_color: block.text("overlay_color").to_string(),
                    height: block.text("height").to_string(),
                },
            ),
            kinds::TEXT => render(
                &block.kind,
                TextTemplate {
                    heading: block.text("heading").to_string(),
                    body: block.text("body").to_string(),
                    align: block.text("align").to_string(),
                },
            ),
            kinds::IMAGE => render(
                &block.kind,
                ImageTemplate {
                    url: block.text("url").to_string(),
                    alt: block.text("alt").to_string(),
                    caption: block.text("caption").to_string(),
                    rounded: block.flag("rounded"),
                },
            ),
            kinds::SLIDER => render(
                &block.kind,
                SliderTemplate {
                    slides: block.array("slides").iter().map(slide_view).collect(),
                    autoplay: block.flag("autoplay"),
                    interval_ms: block.number("interval_ms", 5000.0) as i64,
                },
            ),
            kinds::PARALLAX => render(
                &block.kind,
                ParallaxTemplate {
                    image: block.text("image").to_string(),
                    heading: block.text("heading").to_string(),
                    speed: block.number("speed", 0.3),
                },
            ),
            kinds::LIST => render(
                &block.kind,
                ListTemplate {
                    title: block.text("title").to_string(),
                    style: block.text("style").to_string(),
                    items: block.array("items").iter().map(list_item_view).collect(),
                },
            ),
            kinds::CTA => render(
                &block.kind,
                CtaTemplate {
                    heading: block.text("heading").to_string(),
                    body: block.text("body").to_string(),
                    button_label: block.text("button_label").to_string(),
                    button_url: block.text("button_url").to_string(),
                    background: block.text("background").to_string(),
                },
            ),
            kinds::SECTION_LAYOUT => self.render_section_layout(block, depth),
            other => {
                debug!(kind = other, block_id = %block.id, "skipping block of unknown kind");
                Ok(String::new())
            }
        }
    }

    fn render_section_layout(&self, block: &Block, depth: usize) -> Result<String, RenderError> {
        if depth >= self.max_depth {
            warn!(
                block_id = %block.id,
                depth,
                "layout nesting limit reached, dropping deeper columns"
            );
            return Ok(String::new());
        }

        let mut columns = Vec::new();
        for column in block.columns() {
            columns.push(self.render_at(&column.blocks, depth + 1)?);
        }

        render(
            &block.kind,
            SectionLayoutTemplate {
                gap: block.text("gap").to_string(),
                background: block.text("background").to_string(),
                columns,
            },
        )
    }
}

fn render<T: Template>(kind: &str, template: T) -> Result<String, RenderError> {
    template.render().map_err(|source| RenderError::new(kind, source))
}

fn row_text(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn slide_view(row: &Value) -> SlideView {
    SlideView {
        image: row_text(row, "image"),
        title: row_text(row, "title"),
        caption: row_text(row, "caption"),
    }
}

fn list_item_view(row: &Value) -> ListItemView {
    ListItemView {
        icon: row_text(row, "icon"),
        title: row_text(row, "title"),
        description: row_text(row, "description"),
    }
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate {
    title: String,
    body: String,
}

#[derive(Template)]
#[template(path = "blocks/hero.html")]
struct HeroTemplate {
    title: String,
    subtitle: String,
    image: String,
    cta_label: String,
    cta_url: String,
    overlay_color: String,
    height: String,
}

#[derive(Template)]
#[template(path = "blocks/text.html")]
struct TextTemplate {
    heading: String,
    body: String,
    align: String,
}

#[derive(Template)]
#[template(path = "blocks/image.html")]
struct ImageTemplate {
    url: String,
    alt: String,
    caption: String,
    rounded: bool,
}

#[derive(Clone)]
struct SlideView {
    image: String,
    title: String,
    caption: String,
}

#[derive(Template)]
#[template(path = "blocks/slider.html")]
struct SliderTemplate {
    slides: Vec<SlideView>,
    autoplay: bool,
    interval_ms: i64,
}

#[derive(Template)]
#[template(path = "blocks/parallax.html")]
struct ParallaxTemplate {
    image: String,
    heading: String,
    speed: f64,
}

#[derive(Clone)]
struct ListItemView {
    icon: String,
    title: String,
    description: String,
}

#[derive(Template)]
#[template(path = "blocks/list.html")]
struct ListTemplate {
    title: String,
    style: String,
    items: Vec<ListItemView>,
}

#[derive(Template)]
#[template(path = "blocks/cta.html")]
struct CtaTemplate {
    heading: String,
    body: String,
    button_label: String,
    button_url: String,
    background: String,
}

#[derive(Template)]
#[template(path = "blocks/section_layout.html")]
struct SectionLayoutTemplate {
    gap: String,
    background: String,
    columns: Vec<String>,
}
