//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, path::Path, str::FromStr, time::Duration};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "pressroom";
const DEFAULT_SITE_URL: &str = "http://127.0.0.1:3000/";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_SEARCH_MIN_QUERY_LEN: u32 = 2;
const DEFAULT_RENDER_MAX_DEPTH: u32 = 8;

/// Overrides that take the highest precedence, shared by every subcommand.
#[derive(Debug, Args, Default, Clone)]
pub struct CliOverrides {
    /// Override the storefront API base URL.
    #[arg(long = "site", env = "PRESSROOM_SITE_URL", value_name = "URL")]
    pub site: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the search debounce window in milliseconds.
    #[arg(long = "search-debounce-ms", value_name = "MS")]
    pub search_debounce_ms: Option<u64>,

    /// Override the minimum search query length.
    #[arg(long = "search-min-query-len", value_name = "CHARS")]
    pub search_min_query_len: Option<u32>,

    /// Override the maximum nested layout depth the renderer will follow.
    #[arg(long = "render-max-depth", value_name = "COUNT")]
    pub render_max_depth: Option<u32>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub search: SearchSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub site: String,
    pub key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub max_depth: NonZeroUsize,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(config_file: Option<&Path>, overrides: &CliOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("PRESSROOM").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    search: RawSearchSettings,
    render: RawRenderSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(site) = overrides.site.as_ref() {
            self.api.site = Some(site.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(ms) = overrides.search_debounce_ms {
            self.search.debounce_ms = Some(ms);
        }
        if let Some(len) = overrides.search_min_query_len {
            self.search.min_query_len = Some(len);
        }
        if let Some(depth) = overrides.render_max_depth {
            self.render.max_depth = Some(depth);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            search,
            render,
        } = raw;

        let api = build_api_settings(api)?;
        let logging = build_logging_settings(logging)?;
        let search = build_search_settings(search)?;
        let render = build_render_settings(render)?;

        Ok(Self {
            api,
            logging,
            search,
            render,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let site = api
        .site
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

    url::Url::parse(&site)
        .map_err(|err| LoadError::invalid("api.site", format!("invalid URL `{site}`: {err}")))?;

    let key = api.key.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    Ok(ApiSettings { site, key })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_search_settings(search: RawSearchSettings) -> Result<SearchSettings, LoadError> {
    let debounce_ms = search.debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);
    if debounce_ms == 0 {
        return Err(LoadError::invalid(
            "search.debounce_ms",
            "must be greater than zero",
        ));
    }

    let min_query_len = search
        .min_query_len
        .unwrap_or(DEFAULT_SEARCH_MIN_QUERY_LEN);
    if min_query_len == 0 {
        return Err(LoadError::invalid(
            "search.min_query_len",
            "must be greater than zero",
        ));
    }

    Ok(SearchSettings {
        debounce: Duration::from_millis(debounce_ms),
        min_query_len: min_query_len as usize,
    })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let depth = render.max_depth.unwrap_or(DEFAULT_RENDER_MAX_DEPTH);
    let max_depth = NonZeroUsize::new(depth as usize)
        .ok_or_else(|| LoadError::invalid("render.max_depth", "must be greater than zero"))?;

    Ok(RenderSettings { max_depth })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    site: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSearchSettings {
    debounce_ms: Option<u64>,
    min_query_len: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    max_depth: Option<u32>,
}
