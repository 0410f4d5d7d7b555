//! Error types for document normalization.
//!
//! Parsers return the specific variants below; the pipeline wraps every parser
//! failure in [`Error::Extraction`] so callers can see which format handler
//! was responsible. [`Error::kind`] recovers the classification that the batch
//! driver records in its failure manifest.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and normalizing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Extension is not in the recognized set
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// Container could not be opened (malformed PDF, DOCX or workbook)
    #[error("Corrupt {format} document: {reason}")]
    CorruptDocument {
        /// Format name (e.g. "PDF", "DOCX")
        format: &'static str,
        /// Underlying failure
        reason: String,
    },

    /// Out-of-process converter failed
    #[error("External tool '{tool}' failed: {reason}")]
    ExternalToolFailure {
        /// Program that was invoked
        tool: String,
        /// Exit status, timeout or spawn failure description
        reason: String,
    },

    /// No supported text encoding decoded the input
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    /// A format parser failed; carries the responsible extension
    #[error("Extraction failed (.{extension}): {source}")]
    Extraction {
        /// Lowercase extension without the leading dot
        extension: String,
        /// Parser error
        #[source]
        source: Box<Error>,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a parser failure with the extension of the document being parsed.
    pub fn in_format(self, extension: &str) -> Self {
        match self {
            // Already attributed; keep the innermost extension.
            err @ Error::Extraction { .. } => err,
            other => Error::Extraction {
                extension: extension.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Classify this error for failure manifests.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::FileNotFound(_) => FailureKind::FileNotFound,
            Error::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            Error::CorruptDocument { .. } => FailureKind::CorruptDocument,
            Error::ExternalToolFailure { .. } => FailureKind::ExternalToolFailure,
            Error::EncodingFailure(_) => FailureKind::EncodingFailure,
            Error::Extraction { source, .. } => source.kind(),
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => FailureKind::FileNotFound,
            Error::Io(_) => FailureKind::IoError,
            Error::Config(_) | Error::Json(_) => FailureKind::Other,
        }
    }
}

/// Outcome classification recorded per failed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Input path missing
    FileNotFound,
    /// Extension not recognized
    UnsupportedFormat,
    /// Container failed to open
    CorruptDocument,
    /// Legacy DOC converter failed
    ExternalToolFailure,
    /// Plain text could not be decoded
    EncodingFailure,
    /// Parsed successfully but normalized content is blank
    EmptyContent,
    /// Other IO failure
    IoError,
    /// Anything else
    Other,
}

impl FailureKind {
    /// Stable name used in manifests and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::FileNotFound => "FileNotFound",
            FailureKind::UnsupportedFormat => "UnsupportedFormat",
            FailureKind::CorruptDocument => "CorruptDocument",
            FailureKind::ExternalToolFailure => "ExternalToolFailure",
            FailureKind::EncodingFailure => "EncodingFailure",
            FailureKind::EmptyContent => "EmptyContent",
            FailureKind::IoError => "IoError",
            FailureKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
