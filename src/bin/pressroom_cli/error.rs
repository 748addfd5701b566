#![deny(clippy::all, clippy::pedantic)]

use thiserror::Error;

use pressroom::application::gateway::ApiError;
use pressroom::application::navigation::NavigationEditorError;
use pressroom::application::page_editor::PageEditorError;
use pressroom::config::LoadError;
use pressroom::infra::InfraError;
use pressroom::presentation::RenderError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to read key file: {0}")]
    KeyFile(std::io::Error),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationEditorError),
    #[error(transparent)]
    PageEditor(#[from] PageEditorError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
