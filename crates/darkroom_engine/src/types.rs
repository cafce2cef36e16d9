use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::download::DownloadError;
use crate::{CollaboratorError, EncodeError, ValidationError};

/// Submission token assigned by the caller; echoed back on settlement so a
/// stale result cannot be confused with the current job's.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Generate,
}

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub image_ref: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobSettled {
        generation: Generation,
        result: Result<JobOutcome, SubmitError>,
    },
    DownloadFinished {
        image_ref: String,
        result: Result<PathBuf, DownloadError>,
    },
}

/// Everything that can sink a submission, in pipeline order: reading the
/// input files, building the request, or the collaborator call itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
