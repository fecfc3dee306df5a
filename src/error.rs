use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MergeError>;

#[derive(Debug, Error)]
pub enum MergeError {
    /// Extension and MIME type both fail the spreadsheet check.
    #[error("unsupported file type: {name} (only .xlsx / .xls)")]
    UnsupportedFileType { name: String },

    /// Same name and byte size as an entry that is already pending.
    #[error("file {name} ({byte_size} bytes) is already added")]
    DuplicateFile { name: String, byte_size: u64 },

    #[error("failed to read file {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode spreadsheet: {0}")]
    Decode(String),

    #[error("failed to encode spreadsheet: {0}")]
    Encode(String),

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("another operation is still in progress")]
    Busy,

    #[error("a main file and at least one merge file are required")]
    NotReady,
}
