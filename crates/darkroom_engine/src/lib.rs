//! Darkroom engine: IO pipeline and effect execution.
mod client;
mod download;
mod encode;
mod engine;
mod filename;
mod persist;
mod request;
mod types;

pub use client::{Collaborator, CollaboratorError, CollaboratorSettings, HttpCollaborator};
pub use download::{download_image, DownloadError};
pub use encode::{
    decode_data_uri, encode_batch, encode_bytes, encode_file, media_type_for, EncodeError,
    EncodedImage,
};
pub use engine::{run_submission, EngineHandle};
pub use filename::download_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use request::{JobRequest, ValidationError, OUTPUT_FORMAT};
pub use types::{EngineEvent, Generation, JobOutcome, Mode, SubmitError};
