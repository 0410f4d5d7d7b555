//! Extraction pipeline.
//!
//! ```text
//! SourceDocument ─► FormatRegistry ─► ParsedDocument
//!                                       │ segments         │ title candidate
//!                                       ▼                  ▼
//!                                 merge_segments      remove_noise
//!                                       ▼                  │
//!                                  remove_noise            │
//!                                       │    filename ─► resolve_title
//!                                       ▼                  ▼
//!                                    content             title
//!                                       └──── Tokenizer ───┘
//!                                               ▼
//!                                   Extraction::{Normalized, Empty}
//! ```
//!
//! The pipeline holds only immutable state, so one instance can be shared
//! across threads and used for any number of documents.

use crate::config::ExtractionConfig;
use crate::document::{extension_of, Extraction, NormalizedDocument, ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use crate::formats::FormatRegistry;
use crate::text::{merge_segments, remove_noise};
use crate::title::{clean_filename_as_title, resolve_title, FilenameScorer};
use crate::tokenizer::{JiebaTagger, PosTagger, StopwordSet, Tokenizer};
use std::path::Path;
use std::sync::Arc;

/// Document normalization pipeline.
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    config: ExtractionConfig,
    registry: FormatRegistry,
    tokenizer: Tokenizer,
    filename_scorer: FilenameScorer,
}

impl ExtractionPipeline {
    /// Build a pipeline backed by the jieba tagger.
    ///
    /// Fails with [`Error::Config`] when the configuration does not validate.
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        Self::with_tagger(config, Arc::new(JiebaTagger::new()))
    }

    /// Build a pipeline around a custom tagger.
    pub fn with_tagger(config: ExtractionConfig, tagger: Arc<dyn PosTagger>) -> Result<Self> {
        config.validate()?;
        let stopwords = StopwordSet::load(config.stopwords_path.as_deref());
        let tokenizer = Tokenizer::new(stopwords, tagger.clone());
        let filename_scorer = FilenameScorer::new(tagger, config.meaningful_ratio);
        let registry = FormatRegistry::with_defaults(&config);

        Ok(Self {
            config,
            registry,
            tokenizer,
            filename_scorer,
        })
    }

    /// Replace the format registry.
    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Format registry in use.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Tokenizer in use.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Whether the pipeline has a parser for `path`'s extension.
    pub fn supports(&self, path: &Path) -> bool {
        self.registry.supports(&extension_of(path))
    }

    /// Read and normalize the file at `path`.
    ///
    /// Existence is checked first, then the extension, and only then are the
    /// bytes read.
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        if !self.supports(path) {
            return Err(Error::UnsupportedFormat(extension_of(path)));
        }
        let source = SourceDocument::open(path)?;
        self.run(&source)
    }

    /// Normalize one document.
    ///
    /// Returns [`Extraction::Empty`] when parsing succeeds but the cleaned
    /// content is blank. Parser failures are returned as
    /// [`Error::Extraction`] carrying the extension.
    pub fn run(&self, source: &SourceDocument) -> Result<Extraction> {
        let parsed = self.registry.parse(source)?;
        let file_name = source.file_name();
        Ok(self.normalize(&file_name, parsed))
    }

    /// Turn parser output into the normalized record.
    pub fn normalize(&self, file_name: &str, parsed: ParsedDocument) -> Extraction {
        let content = remove_noise(&merge_segments(&parsed.segments));
        let candidate = remove_noise(parsed.title());

        let filename_title = clean_filename_as_title(file_name);
        let meaningful = self.filename_scorer.is_meaningful(file_name);
        let title = resolve_title(&filename_title, meaningful, &candidate);

        if content.trim().is_empty() {
            log::debug!("{}: content is blank after cleaning", file_name);
            return Extraction::Empty;
        }

        let seg_title = self.tokenizer.tokenize(&title);
        let seg_content = self.tokenizer.tokenize(&content);

        Extraction::Normalized(NormalizedDocument {
            title,
            content,
            seg_title,
            seg_content,
        })
    }
}
