//! Document data model.
//!
//! A [`SourceDocument`] goes into a format parser, which produces a
//! [`ParsedDocument`] (raw segments in reading order plus an optional title
//! candidate). The pipeline turns that into an [`Extraction`]: either a
//! [`NormalizedDocument`] or the empty outcome.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An input file: its path and its bytes.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl SourceDocument {
    /// Read a document from disk.
    ///
    /// Returns [`Error::FileNotFound`] when `path` does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Build a document from bytes already in memory. `path` still decides
    /// the format and is handed to parsers that need a file on disk.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// Filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Final path component, lossily converted.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Lowercase extension without the dot, or an empty string.
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }
}

/// Lowercase extension of `path` without the dot.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Output of one format parser call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Raw text fragments in reading order
    pub segments: Vec<String>,
    /// Title proposed by the format heuristic or document metadata
    pub title_candidate: Option<String>,
}

impl ParsedDocument {
    /// Create a parsed document.
    pub fn new(segments: Vec<String>, title_candidate: Option<String>) -> Self {
        Self {
            segments,
            title_candidate,
        }
    }

    /// Title candidate, or an empty string when there is none.
    pub fn title(&self) -> &str {
        self.title_candidate.as_deref().unwrap_or("")
    }
}

/// The normalized record handed to the store.
///
/// `content` is never blank; `title` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Resolved title
    pub title: String,
    /// Merged, noise-free body text
    pub content: String,
    /// Title tokens
    pub seg_title: Vec<String>,
    /// Body tokens
    pub seg_content: Vec<String>,
}

/// Result of running the pipeline on one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The document produced non-blank content.
    Normalized(NormalizedDocument),
    /// Parsing succeeded but the normalized content is blank.
    Empty,
}

impl Extraction {
    /// The normalized record, if any.
    pub fn into_document(self) -> Option<NormalizedDocument> {
        match self {
            Extraction::Normalized(doc) => Some(doc),
            Extraction::Empty => None,
        }
    }

    /// Whether this is the empty outcome.
    pub fn is_empty(&self) -> bool {
        matches!(self, Extraction::Empty)
    }
}
