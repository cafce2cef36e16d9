use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use darkroom_core::{CompletedJob, Effect, Generation, Msg};
use darkroom_engine::{CollaboratorSettings, EngineEvent, EngineHandle};

/// Period of the synthetic progress ticker.
const TICK_PERIOD: Duration = Duration::from_secs(1);
/// Delay before the progress value rearms to 0 after a settlement.
const RESET_DELAY: Duration = Duration::from_secs(2);

struct TickerHandle {
    stop: Arc<AtomicBool>,
}

impl TickerHandle {
    fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Bridges core effects to the engine and feeds engine events back into the
/// message loop.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    msg_tx: mpsc::Sender<Msg>,
    ticker: Arc<Mutex<Option<TickerHandle>>>,
    pending_downloads: Arc<AtomicUsize>,
}

impl EffectRunner {
    pub fn new(
        settings: CollaboratorSettings,
        output_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let runner = Self {
            engine: Arc::new(EngineHandle::new(settings, output_dir)),
            msg_tx,
            ticker: Arc::new(Mutex::new(None)),
            pending_downloads: Arc::new(AtomicUsize::new(0)),
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn pending_downloads(&self) -> usize {
        self.pending_downloads.load(Ordering::Relaxed)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob {
                    generation,
                    mode,
                    prompt,
                    files,
                } => {
                    log::info!(
                        "StartJob generation={} mode={:?} files={}",
                        generation,
                        mode,
                        files.len()
                    );
                    self.start_ticker(generation);
                    self.engine.submit(generation, map_mode(mode), prompt, files);
                }
                Effect::ScheduleProgressReset { generation } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(RESET_DELAY);
                        let _ = msg_tx.send(Msg::ProgressResetDue { generation });
                    });
                }
                Effect::Download { image_ref, prompt } => {
                    self.pending_downloads.fetch_add(1, Ordering::Relaxed);
                    self.engine.download(image_ref, prompt);
                }
                Effect::CopyReference { image_ref } => copy_to_clipboard(&image_ref),
            }
        }
    }

    /// Replace any live ticker with a fresh one for this generation. The old
    /// thread is cancelled rather than abandoned; the generation token on
    /// each tick is the second line of defence against a late tick.
    fn start_ticker(&self, generation: Generation) {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = TickerHandle { stop: stop.clone() };
        if let Ok(mut slot) = self.ticker.lock() {
            if let Some(previous) = slot.replace(handle) {
                previous.cancel();
            }
        }

        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            thread::sleep(TICK_PERIOD);
            if stop.load(Ordering::Relaxed) {
                break;
            }
            if msg_tx.send(Msg::ProgressTick { generation }).is_err() {
                break;
            }
        });
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        let ticker = self.ticker.clone();
        let pending_downloads = self.pending_downloads.clone();

        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                match event {
                    EngineEvent::JobSettled { generation, result } => {
                        // The simulator stops before the settlement is applied.
                        if let Ok(mut slot) = ticker.lock() {
                            if let Some(handle) = slot.take() {
                                handle.cancel();
                            }
                        }
                        let outcome = match result {
                            Ok(outcome) => Ok(CompletedJob {
                                image_ref: outcome.image_ref,
                                completed_at: outcome.completed_at,
                            }),
                            Err(err) => Err(err.to_string()),
                        };
                        if msg_tx
                            .send(Msg::JobSettled {
                                generation,
                                outcome,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                    EngineEvent::DownloadFinished { .. } => {
                        // Outcome is logged by the engine.
                        pending_downloads.fetch_sub(1, Ordering::Relaxed);
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_mode(mode: darkroom_core::Mode) -> darkroom_engine::Mode {
    match mode {
        darkroom_core::Mode::Edit => darkroom_engine::Mode::Edit,
        darkroom_core::Mode::Generate => darkroom_engine::Mode::Generate,
    }
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => log::info!("Copied result reference to clipboard"),
            Err(err) => log::warn!("Clipboard copy failed: {err}"),
        },
        Err(err) => log::warn!("Clipboard unavailable: {err}"),
    }
}
