//! Format parsers.
//!
//! Every supported format implements [`FormatParser`]: it turns a
//! [`SourceDocument`] into ordered raw segments plus an optional title
//! candidate. The [`FormatRegistry`] maps lowercase extensions to parser
//! instances, so adding a format means registering one more entry.
//!
//! # Supported Formats
//!
//! | Format      | Extensions     | Parser                 |
//! |-------------|----------------|------------------------|
//! | PDF         | `pdf`          | [`PdfParser`]          |
//! | Word (OOXML)| `docx`         | [`DocxParser`]         |
//! | Word (97)   | `doc`          | [`LegacyDocParser`]    |
//! | Spreadsheet | `xlsx`, `xls`  | [`SpreadsheetParser`]  |
//! | Plain text  | `txt`          | [`PlainTextParser`]    |

mod doc;
mod docx;
pub mod pdf;
mod plain_text;
mod spreadsheet;

pub use doc::LegacyDocParser;
pub use docx::DocxParser;
pub use pdf::PdfParser;
pub use plain_text::PlainTextParser;
pub use spreadsheet::SpreadsheetParser;

use crate::config::ExtractionConfig;
use crate::document::{ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Converts one document format into raw segments and a title candidate.
pub trait FormatParser: Send + Sync {
    /// Parse `source`.
    ///
    /// Segments are in reading order. Failures use the specific
    /// [`Error`] variants; the registry attaches the extension.
    fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument>;

    /// Return the name of this parser for debugging.
    fn name(&self) -> &'static str;
}

/// The document formats recognized out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing
    Docx,
    /// Word 97-2003 binary
    LegacyDoc,
    /// Excel workbooks
    Spreadsheet,
    /// Plain text in one of several encodings
    PlainText,
}

impl DocumentFormat {
    /// All formats, in registration order.
    pub const ALL: [DocumentFormat; 5] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::LegacyDoc,
        DocumentFormat::Spreadsheet,
        DocumentFormat::PlainText,
    ];

    /// Extensions (lowercase, without dot) handled by this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Pdf => &["pdf"],
            DocumentFormat::Docx => &["docx"],
            DocumentFormat::LegacyDoc => &["doc"],
            DocumentFormat::Spreadsheet => &["xlsx", "xls"],
            DocumentFormat::PlainText => &["txt"],
        }
    }

    /// Look up the format for a lowercase extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&extension))
    }

    /// Default parser for this format.
    pub fn default_parser(&self, config: &ExtractionConfig) -> Arc<dyn FormatParser> {
        match self {
            DocumentFormat::Pdf => Arc::new(PdfParser::new(config.pdf)),
            DocumentFormat::Docx => Arc::new(DocxParser::new(config.docx_title_scan_limit)),
            DocumentFormat::LegacyDoc => Arc::new(LegacyDocParser::new(config.legacy_doc.clone())),
            DocumentFormat::Spreadsheet => Arc::new(SpreadsheetParser::new()),
            DocumentFormat::PlainText => Arc::new(PlainTextParser::new()),
        }
    }
}

/// Extension → parser table.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    parsers: HashMap<String, Arc<dyn FormatParser>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every [`DocumentFormat`] registered.
    pub fn with_defaults(config: &ExtractionConfig) -> Self {
        let mut registry = Self::new();
        for format in DocumentFormat::ALL {
            let parser = format.default_parser(config);
            for extension in format.extensions() {
                registry.register(extension, parser.clone());
            }
        }
        registry
    }

    /// Register (or replace) the parser for `extension`.
    pub fn register(&mut self, extension: &str, parser: Arc<dyn FormatParser>) {
        let key = extension.trim_start_matches('.').to_lowercase();
        self.parsers.insert(key, parser);
    }

    /// Parser for a lowercase extension.
    pub fn get(&self, extension: &str) -> Option<&Arc<dyn FormatParser>> {
        self.parsers.get(extension)
    }

    /// Whether `extension` has a parser.
    pub fn supports(&self, extension: &str) -> bool {
        self.parsers.contains_key(extension)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Dispatch `source` to the parser registered for its extension.
    ///
    /// Unknown extensions fail with [`Error::UnsupportedFormat`]; parser
    /// failures come back wrapped in [`Error::Extraction`].
    pub fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument> {
        let extension = source.extension();
        let parser = self
            .get(&extension)
            .ok_or_else(|| Error::UnsupportedFormat(extension.clone()))?;

        log::debug!("Parsing {} with {} parser", source.path().display(), parser.name());
        parser.parse(source).map_err(|e| e.in_format(&extension))
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}
