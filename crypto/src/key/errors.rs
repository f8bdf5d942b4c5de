use std::path::PathBuf;

use thiserror::Error;

/// Error type for key loading.
#[derive(Debug, Clone, Error)]
pub enum KeyError {
    #[error("Failed to read key file {}: {reason}", .path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("Failed to parse {kind} key: {reason}")]
    Parse { kind: &'static str, reason: String },
}
