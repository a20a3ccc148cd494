//! # File I/O
//!
//! Reading structure files and writing results.
//!
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent partial files

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use slope_core::{AnalysisError, Structure};
use thiserror::Error;

/// Errors surfaced by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    /// File system operation failed
    #[error("Failed to {operation} '{}': {message}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        message: String,
    },

    /// Input file is not a valid structure description
    #[error("Invalid structure file '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Output could not be serialized
    #[error("Failed to serialize results: {0}")]
    Serialize(String),

    /// The analysis itself failed
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl CliError {
    fn io(operation: &'static str, path: &Path, error: std::io::Error) -> Self {
        CliError::Io {
            operation,
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Io { .. } => 74,
            CliError::Parse { .. } => 65,
            CliError::Serialize(_) => 70,
            CliError::Analysis(AnalysisError::Configuration { .. }) => 65,
            CliError::Analysis(_) => 1,
        }
    }
}

/// Load a structure description from a JSON file
pub fn load_structure(path: &Path) -> Result<Structure, CliError> {
    let contents = fs::read_to_string(path).map_err(|e| CliError::io("read", path, e))?;
    serde_json::from_str(&contents).map_err(|e| CliError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Pretty-printed JSON for any result type
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Serialize(e.to_string()))
}

/// Write `contents` to `path` atomically
///
/// 1. Write to a temporary file (`<path>.tmp`)
/// 2. Sync to disk
/// 3. Rename over the final path
pub fn save_atomic(contents: &str, path: &Path) -> Result<(), CliError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file =
        File::create(&tmp_path).map_err(|e| CliError::io("create temp file", &tmp_path, e))?;
    tmp_file
        .write_all(contents.as_bytes())
        .map_err(|e| CliError::io("write temp file", &tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| CliError::io("sync temp file", &tmp_path, e))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CliError::io("rename to final", path, e)
    })
}
