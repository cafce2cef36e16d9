use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

/// Transport-ready inline form of one input image:
/// `data:<media-type>;base64,<payload>`. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("could not read {path}: {message}")]
    UnreadableFile { path: String, message: String },
    #[error("not a base64 data URI")]
    InvalidDataUri,
}

/// Encode one local file. The media type comes from the file extension; the
/// selection surface has already restricted inputs to raster image formats.
pub async fn encode_file(path: &Path) -> Result<EncodedImage, EncodeError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| EncodeError::UnreadableFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
    Ok(encode_bytes(&bytes, media_type_for(path)))
}

pub fn encode_bytes(bytes: &[u8], media_type: &str) -> EncodedImage {
    EncodedImage(format!("data:{media_type};base64,{}", BASE64.encode(bytes)))
}

/// Encode a batch concurrently. Results are joined in input order:
/// `encoded[i]` corresponds to `paths[i]` regardless of which read finishes
/// first.
pub async fn encode_batch(paths: &[PathBuf]) -> Result<Vec<EncodedImage>, EncodeError> {
    futures_util::future::try_join_all(paths.iter().map(|path| encode_file(path))).await
}

/// Reverse of `encode_bytes`: recover the media type and raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), EncodeError> {
    let rest = uri.strip_prefix("data:").ok_or(EncodeError::InvalidDataUri)?;
    let (media_type, payload) = rest
        .split_once(";base64,")
        .ok_or(EncodeError::InvalidDataUri)?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|_| EncodeError::InvalidDataUri)?;
    Ok((media_type.to_string(), bytes))
}

pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
