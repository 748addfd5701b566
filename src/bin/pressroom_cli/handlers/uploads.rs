#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::sync::Arc;

use pressroom::application::gateway::{ArtworkFile, UploadsApi};
use pressroom::infra::http::ApiClient;

use crate::args::UploadsCmd;
use crate::error::CliError;
use crate::io::{artwork_content_type, read_file};
use crate::print::print_json;

pub async fn handle(client: &Arc<ApiClient>, cmd: UploadsCmd) -> Result<(), CliError> {
    match cmd {
        UploadsCmd::Artwork { files } => artwork(client, files).await,
    }
}

async fn artwork(client: &Arc<ApiClient>, paths: Vec<PathBuf>) -> Result<(), CliError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidInput(format!("{} has no usable file name", path.display()))
            })?;
        files.push(ArtworkFile {
            name,
            content_type: artwork_content_type(path).to_string(),
            bytes: read_file(path)?,
        });
    }

    let uploaded = client.upload_artwork(files).await?;
    print_json(&uploaded)
}
