//! Command-line surface for `pressroom-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use pressroom::config::CliOverrides;
use pressroom::domain::navigation::{NavItemKind, NavScope};

#[derive(Parser, Debug)]
#[command(name = "pressroom-cli", version, about = "Pressroom storefront API CLI", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "PRESSROOM_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Path to file containing API key (takes precedence over env)
    #[arg(long, env = "PRESSROOM_API_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// API key from env (CLI flag intentionally disabled to avoid shell history leaks)
    #[arg(hide = true, env = "PRESSROOM_API_KEY")]
    pub api_key_env: Option<String>,

    #[command(flatten)]
    pub overrides: CliOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Navigation tree management
    Navigation(NavArgs),
    /// Page management
    Pages(PagesArgs),
    /// Site-wide settings
    Settings(SettingsArgs),
    /// Catalog search
    Search(SearchArgs),
    /// Artwork uploads
    Uploads(UploadsArgs),
    /// Render storefront HTML locally
    Render(RenderArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScopeArg {
    Header,
    Footer,
}

impl From<ScopeArg> for NavScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Header => NavScope::Header,
            ScopeArg::Footer => NavScope::Footer,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
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

impl From<KindArg> for NavItemKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Utility => NavItemKind::Utility,
            KindArg::Main => NavItemKind::Main,
            KindArg::MegaCategory => NavItemKind::MegaCategory,
            KindArg::MegaItem => NavItemKind::MegaItem,
            KindArg::Promo => NavItemKind::Promo,
            KindArg::FooterColumn => NavItemKind::FooterColumn,
            KindArg::FooterLink => NavItemKind::FooterLink,
            KindArg::FooterBrand => NavItemKind::FooterBrand,
            KindArg::FooterNewsletter => NavItemKind::FooterNewsletter,
        }
    }
}

#[derive(Parser, Debug)]
pub struct NavArgs {
    #[command(subcommand)]
    pub action: NavCmd,
}

#[derive(Subcommand, Debug)]
pub enum NavCmd {
    /// Print the nested tree for one scope
    Tree {
        #[arg(long, value_enum, default_value_t = ScopeArg::Header)]
        scope: ScopeArg,
    },
    /// Print the flat item list for one scope, inactive rows included
    List {
        #[arg(long, value_enum, default_value_t = ScopeArg::Header)]
        scope: ScopeArg,
    },
    /// Create a navigation item
    Create {
        #[arg(long, value_enum, default_value_t = ScopeArg::Header)]
        scope: ScopeArg,
        #[arg(long)]
        label: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        parent_id: Option<i64>,
        #[arg(long, default_value_t = 0)]
        position: i32,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        badge: Option<String>,
        /// Create the item hidden from the storefront
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    /// Update all mutable fields of an item
    Update {
        #[arg(long, value_enum, default_value_t = ScopeArg::Header)]
        scope: ScopeArg,
        #[arg(long)]
        id: i64,
        #[arg(long)]
        label: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        parent_id: Option<i64>,
        #[arg(long)]
        position: i32,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        badge: Option<String>,
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    /// Drop one item onto another, replaying the admin drag gesture
    Move {
        #[arg(long, value_enum, default_value_t = ScopeArg::Header)]
        scope: ScopeArg,
        /// Item being dragged
        id: i64,
        /// Item it is dropped onto
        over: i64,
    },
    /// Delete an item; descendants go with it
    Delete { id: i64 },
}

#[derive(Parser, Debug)]
pub struct PagesArgs {
    #[command(subcommand)]
    pub action: PagesCmd,
}

#[derive(Subcommand, Debug)]
pub enum PagesCmd {
    /// List pages
    List,
    /// Get a page by slug
    Get { slug: String },
    /// Create a page; slug is derived from the title when omitted
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: Option<String>,
        /// JSON file holding the block array
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Replace a page's title and content
    Update {
        #[arg(long)]
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Append a fresh block of the given kind to a page
    AddBlock {
        #[arg(long)]
        slug: String,
        #[arg(long)]
        kind: String,
    },
}

#[derive(Parser, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsCmd,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCmd {
    /// Show settings
    Get,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub action: SearchCmd,
}

#[derive(Subcommand, Debug)]
pub enum SearchCmd {
    /// Run a catalog search query
    Query { query: String },
}

#[derive(Parser, Debug)]
pub struct UploadsArgs {
    #[command(subcommand)]
    pub action: UploadsCmd,
}

#[derive(Subcommand, Debug)]
pub enum UploadsCmd {
    /// Upload one or more artwork files
    Artwork {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(subcommand)]
    pub action: RenderCmd,
}

#[derive(Subcommand, Debug)]
pub enum RenderCmd {
    /// Fetch a page and print its rendered HTML
    Page { slug: String },
    /// Fetch navigation and settings, print header and footer HTML
    Chrome,
}
