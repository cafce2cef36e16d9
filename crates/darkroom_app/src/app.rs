use std::sync::mpsc;
use std::time::Duration;

use darkroom_core::{update, AppState, Mode, Msg, Notice, Severity};
use darkroom_engine::CollaboratorSettings;
use thiserror::Error;

use crate::cli::{self, Args};
use crate::effects::EffectRunner;
use crate::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Selection(#[from] cli::SelectionError),
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("job failed: {0}")]
    JobFailed(String),
    #[error("message channel closed unexpectedly")]
    ChannelClosed,
}

/// Drive one submission through the core loop: dispatch the user's intents,
/// pump messages until the job settles, the progress reset has run and any
/// download finished, then print the history.
pub fn run(args: Args) -> Result<(), AppError> {
    let mode = Mode::from(args.mode);
    if mode == Mode::Edit {
        cli::validate_selection(&args.image)?;
    }

    let settings = CollaboratorSettings {
        base_url: args.base_url.clone(),
        ..CollaboratorSettings::default()
    };
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(settings, args.output_dir.clone(), msg_tx);

    let mut app = App {
        state: AppState::new(),
        runner,
        last_notice: None,
        failure: None,
    };

    app.dispatch(Msg::ModeSelected(mode));
    app.dispatch(Msg::PromptChanged(args.prompt.clone()));
    if mode == Mode::Edit {
        app.dispatch(Msg::FilesSelected(args.image.clone()));
    }
    app.dispatch(Msg::SubmitClicked);
    if !app.state.is_submitting() {
        let reason = app
            .failure
            .take()
            .unwrap_or_else(|| "submission did not start".to_string());
        return Err(AppError::Rejected(reason));
    }

    let mut settled = false;
    loop {
        match msg_rx.recv_timeout(POLL_INTERVAL) {
            Ok(msg) => {
                let is_settlement = matches!(&msg, Msg::JobSettled { .. });
                let succeeded = matches!(
                    &msg,
                    Msg::JobSettled {
                        outcome: Ok(_),
                        ..
                    }
                );
                app.dispatch(msg);
                if is_settlement {
                    settled = true;
                    if succeeded {
                        if !args.no_download {
                            app.dispatch(Msg::DownloadClicked { index: 0 });
                        }
                        if args.copy {
                            app.dispatch(Msg::CopyClicked { index: 0 });
                        }
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return Err(AppError::ChannelClosed),
        }

        let view = app.state.view();
        if settled && !view.submitting && view.progress == 0 && app.runner.pending_downloads() == 0
        {
            break;
        }
    }

    for (index, row) in app.state.view().results.iter().enumerate() {
        println!("{}", render::format_result_row(index, row));
    }

    match app.failure.take() {
        Some(message) => Err(AppError::JobFailed(message)),
        None => Ok(()),
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
    last_notice: Option<Notice>,
    failure: Option<String>,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            log::info!("{}", render::status_line(&view));
            if view.notice != self.last_notice {
                if let Some(notice) = &view.notice {
                    self.report(notice);
                }
                self.last_notice = view.notice.clone();
            }
        }
        self.state = state;
        self.runner.run(effects);
    }

    fn report(&mut self, notice: &Notice) {
        match notice.severity {
            Severity::Info | Severity::Success => log::info!("{}", notice.text),
            Severity::Error => {
                log::error!("{}", notice.text);
                self.failure = Some(notice.text.clone());
            }
        }
    }
}
