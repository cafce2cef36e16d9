use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use chrono::Utc;

use crate::client::{Collaborator, CollaboratorSettings, HttpCollaborator};
use crate::download::download_image;
use crate::encode::encode_batch;
use crate::request::JobRequest;
use crate::{EngineEvent, Generation, JobOutcome, Mode, SubmitError};

enum EngineCommand {
    Submit {
        generation: Generation,
        mode: Mode,
        prompt: String,
        files: Vec<PathBuf>,
    },
    Download {
        image_ref: String,
        prompt: String,
    },
}

/// Owns a background tokio runtime on a dedicated thread; commands go in and
/// events come back over plain mpsc channels so the caller never blocks.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: CollaboratorSettings, output_dir: PathBuf) -> Self {
        Self::with_collaborator(Arc::new(HttpCollaborator::new(settings)), output_dir)
    }

    /// Seam for tests and alternative transports.
    pub fn with_collaborator(collaborator: Arc<dyn Collaborator>, output_dir: PathBuf) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let collaborator = collaborator.clone();
                let event_tx = event_tx.clone();
                let output_dir = output_dir.clone();
                runtime.spawn(async move {
                    handle_command(collaborator.as_ref(), command, &output_dir, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn submit(
        &self,
        generation: Generation,
        mode: Mode,
        prompt: impl Into<String>,
        files: Vec<PathBuf>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            generation,
            mode,
            prompt: prompt.into(),
            files,
        });
    }

    pub fn download(&self, image_ref: impl Into<String>, prompt: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            image_ref: image_ref.into(),
            prompt: prompt.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|event_rx| event_rx.try_recv().ok())
    }
}

async fn handle_command(
    collaborator: &dyn Collaborator,
    command: EngineCommand,
    output_dir: &std::path::Path,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            generation,
            mode,
            prompt,
            files,
        } => {
            log::info!(
                "submit generation={} mode={:?} files={}",
                generation,
                mode,
                files.len()
            );
            let result = run_submission(collaborator, mode, &prompt, &files).await;
            if let Err(err) = &result {
                log::warn!("submission {generation} failed: {err}");
            }
            let _ = event_tx.send(EngineEvent::JobSettled { generation, result });
        }
        EngineCommand::Download { image_ref, prompt } => {
            let result = download_image(&image_ref, output_dir, &prompt).await;
            match &result {
                Ok(path) => log::info!("saved {} to {}", image_ref, path.display()),
                Err(err) => log::warn!("download of {image_ref} failed: {err}"),
            }
            let _ = event_tx.send(EngineEvent::DownloadFinished { image_ref, result });
        }
    }
}

/// Encode the batch, build the request, invoke the collaborator. An encode
/// or validation failure settles the job without the collaborator ever being
/// called.
pub async fn run_submission(
    collaborator: &dyn Collaborator,
    mode: Mode,
    prompt: &str,
    files: &[PathBuf],
) -> Result<JobOutcome, SubmitError> {
    let images = encode_batch(files).await?;
    let request = JobRequest::build(mode, prompt, images)?;
    let image_ref = collaborator.run(&request).await?;
    Ok(JobOutcome {
        image_ref,
        completed_at: Utc::now(),
    })
}
