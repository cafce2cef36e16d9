use std::path::PathBuf;

use argh::FromArgs;
use thiserror::Error;

/// Acceptance constraints of the selection surface. The core pipeline does
/// not re-check these; they are enforced here, before anything is encoded.
pub const MAX_FILES: usize = 5;
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Submit an image edit or generation job to a darkroom inference service.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// operation mode: edit or generate
    #[argh(option, default = "ModeArg::Edit")]
    pub mode: ModeArg,
    /// instruction (edit) or description (generate) prompt
    #[argh(option)]
    pub prompt: String,
    /// input image file, repeatable, edit mode only (max 5)
    #[argh(option, short = 'i')]
    pub image: Vec<PathBuf>,
    /// base URL of the inference service
    #[argh(option, default = "String::from(\"http://localhost:3000\")")]
    pub base_url: String,
    /// directory where results are saved
    #[argh(option, default = "PathBuf::from(\"output\")")]
    pub output_dir: PathBuf,
    /// copy the result reference to the clipboard
    #[argh(switch)]
    pub copy: bool,
    /// do not download the result image
    #[argh(switch)]
    pub no_download: bool,
    /// also write logs to ./darkroom.log
    #[argh(switch)]
    pub log_file: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Edit,
    Generate,
}

impl argh::FromArgValue for ModeArg {
    fn from_arg_value(value: &str) -> Result<Self, String> {
        match value {
            "edit" => Ok(ModeArg::Edit),
            "generate" => Ok(ModeArg::Generate),
            other => Err(format!("unknown mode '{other}', expected edit or generate")),
        }
    }
}

impl From<ModeArg> for darkroom_core::Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Edit => darkroom_core::Mode::Edit,
            ModeArg::Generate => darkroom_core::Mode::Generate,
        }
    }
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("too many input images: {0} (max {MAX_FILES})")]
    TooMany(usize),
    #[error("{path} exceeds the {MAX_FILE_BYTES} byte limit")]
    TooLarge { path: String },
    #[error("{path} is not an accepted image format")]
    UnsupportedType { path: String },
    #[error("could not inspect {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Drop-surface constraints: at most 5 files, 10 MiB each, common raster
/// formats only.
pub fn validate_selection(files: &[PathBuf]) -> Result<(), SelectionError> {
    if files.len() > MAX_FILES {
        return Err(SelectionError::TooMany(files.len()));
    }
    for path in files {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let accepted = ext
            .as_deref()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext));
        if !accepted {
            return Err(SelectionError::UnsupportedType {
                path: path.display().to_string(),
            });
        }
        let meta = std::fs::metadata(path).map_err(|err| SelectionError::Unreadable {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        if meta.len() > MAX_FILE_BYTES {
            return Err(SelectionError::TooLarge {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}
