use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BimTextError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] fst::Error),

    #[error("No preview row at index {0}")]
    RowOutOfRange(usize),

    #[error("Write rejected for {target}: {reason}")]
    WriteRejected { target: String, reason: String },

    #[error("Element not found: {0}")]
    MissingElement(String),
}

pub type Result<T> = std::result::Result<T, BimTextError>;
