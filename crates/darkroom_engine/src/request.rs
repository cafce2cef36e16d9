use serde::Serialize;
use thiserror::Error;

use crate::encode::EncodedImage;
use crate::types::Mode;

/// Fixed output-format hint sent with generation requests.
pub const OUTPUT_FORMAT: &str = "jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("edit mode requires at least one input image")]
    NoImage,
}

/// Wire payload for one submission. `Edit` always carries a list, even for a
/// single image; the collaborator contract requires an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JobRequest {
    Edit {
        prompt: String,
        image_input: Vec<String>,
    },
    Generate {
        prompt: String,
        output_format: &'static str,
    },
}

impl JobRequest {
    /// Assemble a request from already-encoded images. Validation order:
    /// prompt first, then images; the first failure wins.
    pub fn build(
        mode: Mode,
        prompt: &str,
        images: Vec<EncodedImage>,
    ) -> Result<Self, ValidationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        match mode {
            Mode::Edit => {
                if images.is_empty() {
                    return Err(ValidationError::NoImage);
                }
                Ok(JobRequest::Edit {
                    prompt: prompt.to_string(),
                    image_input: images.into_iter().map(EncodedImage::into_string).collect(),
                })
            }
            Mode::Generate => Ok(JobRequest::Generate {
                prompt: prompt.to_string(),
                output_format: OUTPUT_FORMAT,
            }),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            JobRequest::Edit { .. } => Mode::Edit,
            JobRequest::Generate { .. } => Mode::Generate,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            JobRequest::Edit { prompt, .. } | JobRequest::Generate { prompt, .. } => prompt,
        }
    }

    pub fn image_count(&self) -> Option<usize> {
        match self {
            JobRequest::Edit { image_input, .. } => Some(image_input.len()),
            JobRequest::Generate { .. } => None,
        }
    }
}
