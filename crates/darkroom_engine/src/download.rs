use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::filename::download_filename;
use crate::persist::AtomicFileWriter;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("could not fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("could not save image: {0}")]
    Save(String),
}

/// Fetch the image behind `url` and save it under `dir` with a deterministic
/// name derived from the prompt and the locator. Pass-through; not part of
/// the submission state machine.
pub async fn download_image(url: &str, dir: &Path, prompt: &str) -> Result<PathBuf, DownloadError> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|err| fetch_error(url, err.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| fetch_error(url, err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(url, status.to_string()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| fetch_error(url, err.to_string()))?;

    let filename = download_filename(prompt, url);
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    writer
        .write(&filename, &bytes)
        .map_err(|err| DownloadError::Save(err.to_string()))
}

fn fetch_error(url: &str, message: String) -> DownloadError {
    DownloadError::Fetch {
        url: url.to_string(),
        message,
    }
}
