// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # docnorm
//!
//! Document normalization for indexing: turn PDF, DOCX, legacy DOC,
//! spreadsheet and plain text files into one canonical record of title,
//! body text and part-of-speech filtered tokens.
//!
//! ## Core Features
//!
//! - **Format parsers**: per-extension parsers behind one trait, producing
//!   raw segments in reading order plus a title candidate
//! - **Segment merging**: CJK-aware joins, hyphenated line-wrap repair
//! - **Noise cleaning**: fill-in blanks, leader dots, full-width parentheses
//! - **Title resolution**: meaningful filenames beat in-document headings
//! - **Tokenization**: jieba tagging with stopword and tag-class filters
//! - **Batch driver**: manifest in, success and failure manifests out
//!
//! ## Quick Start
//!
//! ```ignore
//! use docnorm::{ExtractionConfig, ExtractionPipeline, Extraction};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = ExtractionPipeline::new(ExtractionConfig::default())?;
//!
//! match pipeline.run_path("reports/2024年度财务报告.pdf")? {
//!     Extraction::Normalized(doc) => println!("{}: {} tokens", doc.title, doc.seg_content.len()),
//!     Extraction::Empty => println!("no text"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Data model
pub mod document;

// Text normalization
pub mod text;

// Tokenization
pub mod tokenizer;

// Title resolution
pub mod title;

// Format parsers
pub mod formats;

// Orchestration
pub mod pipeline;

// Manifest-driven batch processing
pub mod batch;

// Re-exports
pub use batch::{BatchDriver, BatchReport, FailureRecord, InputRecord, StoreRecord};
pub use config::{ExtractionConfig, LegacyDocConfig, PdfHeuristics};
pub use document::{Extraction, NormalizedDocument, ParsedDocument, SourceDocument};
pub use error::{Error, FailureKind, Result};
pub use formats::{DocumentFormat, FormatParser, FormatRegistry};
pub use pipeline::ExtractionPipeline;
pub use tokenizer::{JiebaTagger, PosTagger, StopwordSet, Tokenizer};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats for sorting without panicking on NaN.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so they sort last.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
