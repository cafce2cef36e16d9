use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::msg::CompletedJob;
use crate::view_model::{AppViewModel, ResultRowView};

/// Monotonic token identifying one submission. Timer ticks, reset signals and
/// engine settlements carry the generation they belong to; anything stale is
/// ignored.
pub type Generation = u64;

/// How much a synthetic progress tick adds.
pub const PROGRESS_INCREMENT: u8 = 10;
/// The simulator holds here; 100 is reserved for true completion.
pub const PROGRESS_CAP: u8 = 90;
/// Set only when the collaborator actually finished.
pub const PROGRESS_DONE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    Generate,
}

/// One completed, successful submission, stored in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub image_ref: String,
    pub prompt: String,
    pub completed_at: DateTime<Utc>,
    pub mode: Mode,
    /// Number of input images, `Edit` mode only.
    pub image_count: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// User-facing message raised by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// At most one job is in flight. The pending prompt/mode/count are captured
/// at submit time so edits made while the job runs cannot leak into the
/// committed result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting {
        generation: Generation,
        prompt: String,
        mode: Mode,
        image_count: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    mode: Mode,
    prompt: String,
    selected_files: Vec<PathBuf>,
    submission: SubmissionState,
    progress: u8,
    generation: Generation,
    history: Vec<JobResult>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.mode,
            prompt: self.prompt.clone(),
            selected_count: self.selected_files.len(),
            submitting: self.is_submitting(),
            progress: self.progress,
            results: self.history.iter().map(ResultRowView::from).collect(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn selected_files(&self) -> &[PathBuf] {
        &self.selected_files
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitting { .. })
    }

    pub fn history(&self) -> &[JobResult] {
        &self.history
    }

    pub fn history_entry(&self, index: usize) -> Option<&JobResult> {
        self.history.get(index)
    }

    pub(crate) fn set_prompt(&mut self, text: String) {
        self.prompt = text;
        self.mark_dirty();
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.mark_dirty();
    }

    /// A new selection replaces the previous one, as on the drop surface.
    pub(crate) fn set_files(&mut self, files: Vec<PathBuf>) {
        self.selected_files = files;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    /// Enter `Submitting`, capturing the trimmed prompt and the active mode.
    /// Returns what the effect runner needs to start the job.
    pub(crate) fn begin_submission(&mut self) -> (Generation, Mode, String, Vec<PathBuf>) {
        self.generation += 1;
        let generation = self.generation;
        let prompt = self.prompt.trim().to_string();
        let mode = self.mode;
        let files = match mode {
            Mode::Edit => self.selected_files.clone(),
            Mode::Generate => Vec::new(),
        };
        let image_count = match mode {
            Mode::Edit => Some(files.len()),
            Mode::Generate => None,
        };
        self.submission = SubmissionState::Submitting {
            generation,
            prompt: prompt.clone(),
            mode,
            image_count,
        };
        self.progress = 0;
        self.mark_dirty();
        (generation, mode, prompt, files)
    }

    pub(crate) fn is_current_submission(&self, generation: Generation) -> bool {
        matches!(
            self.submission,
            SubmissionState::Submitting { generation: current, .. } if current == generation
        )
    }

    /// Synthetic progress tick: +10, capped at 90. Stale generations and
    /// ticks arriving outside `Submitting` are ignored.
    pub(crate) fn apply_tick(&mut self, generation: Generation) {
        if !self.is_current_submission(generation) {
            return;
        }
        if self.progress < PROGRESS_CAP {
            self.progress = (self.progress + PROGRESS_INCREMENT).min(PROGRESS_CAP);
            self.mark_dirty();
        }
    }

    /// Commit a successful job: progress jumps to 100 and the result is
    /// prepended to history.
    pub(crate) fn settle_success(&mut self, done: CompletedJob) {
        let submission = std::mem::take(&mut self.submission);
        let SubmissionState::Submitting {
            prompt,
            mode,
            image_count,
            ..
        } = submission
        else {
            return;
        };
        self.progress = PROGRESS_DONE;
        self.history.insert(
            0,
            JobResult {
                image_ref: done.image_ref,
                prompt,
                completed_at: done.completed_at,
                mode,
                image_count,
            },
        );
        self.notice = Some(Notice::success(match mode {
            Mode::Edit => "Image edited successfully!",
            Mode::Generate => "Image generated successfully!",
        }));
        self.mark_dirty();
    }

    /// A failed job leaves history untouched and never passes through 100.
    pub(crate) fn settle_failure(&mut self, message: String) {
        self.submission = SubmissionState::Idle;
        self.notice = Some(Notice::error(format!("Error: {message}")));
        self.mark_dirty();
    }

    /// Delayed reset after a settlement; ignored if a newer submission has
    /// already started.
    pub(crate) fn apply_progress_reset(&mut self, generation: Generation) {
        if generation != self.generation || self.is_submitting() {
            return;
        }
        if self.progress != 0 {
            self.progress = 0;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
        self.notice = Some(Notice::info("Results cleared"));
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
