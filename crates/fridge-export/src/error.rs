//! # Export Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Export Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Filesystem    │  │    Encoding     │  │      Content            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  WriteFailed    │  │  Decode         │  │  EmptyPayload           │ │
//! │  │  ReadFailed     │  │                 │  │  InvalidProduct         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Failures while writing or reading export files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("Failed to write {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },

    /// The source file could not be read.
    #[error("Failed to read {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    /// The bytes are not a valid message.
    #[error("Decoding failed: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A file held zero bytes.
    #[error("{} is empty", .path.display())]
    EmptyPayload { path: PathBuf },

    /// A decoded product breaks the data model (empty name, negative quantity).
    #[error("Invalid product {id} in export: {reason}")]
    InvalidProduct { id: i64, reason: String },
}

impl ExportError {
    pub(crate) fn write(path: &Path, err: impl ToString) -> Self {
        ExportError::WriteFailed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn read(path: &Path, err: impl ToString) -> Self {
        ExportError::ReadFailed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
