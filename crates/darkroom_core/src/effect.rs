use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the single in-flight job: encode `files`, build the request and
    /// invoke the collaborator.
    StartJob {
        generation: crate::Generation,
        mode: crate::Mode,
        prompt: String,
        files: Vec<PathBuf>,
    },
    /// Send `Msg::ProgressResetDue` for this generation after a fixed delay.
    ScheduleProgressReset { generation: crate::Generation },
    /// Fetch the image behind `image_ref` and save it to disk.
    Download { image_ref: String, prompt: String },
    /// Write `image_ref` to the system clipboard.
    CopyReference { image_ref: String },
}
