use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Successful engine settlement payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub image_ref: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the prompt text box.
    PromptChanged(String),
    /// User switched between Edit and Generate.
    ModeSelected(crate::Mode),
    /// User dropped or picked input files; replaces the current selection.
    FilesSelected(Vec<PathBuf>),
    /// User clicked Submit.
    SubmitClicked,
    /// Synthetic progress tick from the app's ticker thread.
    ProgressTick { generation: crate::Generation },
    /// Delayed progress reset after a settlement.
    ProgressResetDue { generation: crate::Generation },
    /// Engine settled the in-flight job. The error side carries the
    /// human-readable failure message.
    JobSettled {
        generation: crate::Generation,
        outcome: Result<CompletedJob, String>,
    },
    /// User asked to save a history entry to disk.
    DownloadClicked { index: usize },
    /// User asked to copy a history entry's image reference.
    CopyClicked { index: usize },
    /// User clicked Clear on the results panel.
    ClearHistoryClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
