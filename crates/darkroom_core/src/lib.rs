//! Darkroom core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{CompletedJob, Msg};
pub use state::{
    AppState, Generation, JobResult, Mode, Notice, Severity, SubmissionState, PROGRESS_CAP,
    PROGRESS_DONE, PROGRESS_INCREMENT,
};
pub use update::{update, validate_submission, ValidationError};
pub use view_model::{AppViewModel, ResultRowView};
