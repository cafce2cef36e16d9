use std::fmt;

use crate::{AppState, Effect, Mode, Msg, Notice};

/// Why a submit attempt was rejected before any effect was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyPrompt,
    NoImage,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPrompt => write!(f, "Please enter a prompt"),
            ValidationError::NoImage => write!(f, "Please add at least one image to edit"),
        }
    }
}

/// Submit guard, evaluated in order: prompt first, then images.
pub fn validate_submission(
    mode: Mode,
    prompt: &str,
    selected_count: usize,
) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    if mode == Mode::Edit && selected_count == 0 {
        return Err(ValidationError::NoImage);
    }
    Ok(())
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PromptChanged(text) => {
            state.set_prompt(text);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            state.set_files(files);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Single-flight guard lives here, not in the display layer: a
            // second submit while a job runs never reaches the collaborator.
            if state.is_submitting() {
                state.set_notice(Notice::error("A job is already running"));
                return (state, Vec::new());
            }
            match validate_submission(
                state.mode(),
                state.prompt(),
                state.selected_files().len(),
            ) {
                Err(err) => {
                    state.set_notice(Notice::error(err.to_string()));
                    Vec::new()
                }
                Ok(()) => {
                    let (generation, mode, prompt, files) = state.begin_submission();
                    vec![Effect::StartJob {
                        generation,
                        mode,
                        prompt,
                        files,
                    }]
                }
            }
        }
        Msg::ProgressTick { generation } => {
            state.apply_tick(generation);
            Vec::new()
        }
        Msg::JobSettled {
            generation,
            outcome,
        } => {
            // A settlement for a superseded submission must not touch the
            // current job's slot.
            if !state.is_current_submission(generation) {
                return (state, Vec::new());
            }
            match outcome {
                Ok(done) => state.settle_success(done),
                Err(message) => state.settle_failure(message),
            }
            vec![Effect::ScheduleProgressReset { generation }]
        }
        Msg::ProgressResetDue { generation } => {
            state.apply_progress_reset(generation);
            Vec::new()
        }
        Msg::DownloadClicked { index } => match state.history_entry(index) {
            Some(result) => vec![Effect::Download {
                image_ref: result.image_ref.clone(),
                prompt: result.prompt.clone(),
            }],
            None => Vec::new(),
        },
        Msg::CopyClicked { index } => match state.history_entry(index) {
            Some(result) => vec![Effect::CopyReference {
                image_ref: result.image_ref.clone(),
            }],
            None => Vec::new(),
        },
        Msg::ClearHistoryClicked => {
            state.clear_history();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
