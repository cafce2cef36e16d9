use chrono::{DateTime, Utc};

use crate::{JobResult, Mode, Notice};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: Mode,
    pub prompt: String,
    pub selected_count: usize,
    pub submitting: bool,
    pub progress: u8,
    /// Most-recent-first.
    pub results: Vec<ResultRowView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub image_ref: String,
    pub prompt: String,
    pub mode: Mode,
    pub image_count: Option<usize>,
    pub completed_at: DateTime<Utc>,
}

impl From<&JobResult> for ResultRowView {
    fn from(result: &JobResult) -> Self {
        Self {
            image_ref: result.image_ref.clone(),
            prompt: result.prompt.clone(),
            mode: result.mode,
            image_count: result.image_count,
            completed_at: result.completed_at,
        }
    }
}
