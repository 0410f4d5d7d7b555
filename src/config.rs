//! Configuration for document extraction.
//!
//! Defaults reproduce the extraction heuristics exactly; every knob can be
//! overridden through the `with_*` builders or loaded from a JSON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extraction configuration shared by the pipeline and its parsers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// External stopword list (one term per line), merged with the defaults.
    pub stopwords_path: Option<PathBuf>,

    /// Legacy `.doc` converter settings.
    pub legacy_doc: LegacyDocConfig,

    /// PDF layout heuristics.
    pub pdf: PdfHeuristics,

    /// Number of leading DOCX paragraphs scanned for a title.
    pub docx_title_scan_limit: usize,

    /// Minimum semantic ratio for a filename to be used as the title.
    pub meaningful_ratio: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            stopwords_path: None,
            legacy_doc: LegacyDocConfig::default(),
            pdf: PdfHeuristics::default(),
            docx_title_scan_limit: 8,
            meaningful_ratio: 0.4,
        }
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Use an external stopword list.
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = Some(path.into());
        self
    }

    /// Override the legacy DOC converter settings.
    pub fn with_legacy_doc(mut self, legacy_doc: LegacyDocConfig) -> Self {
        self.legacy_doc = legacy_doc;
        self
    }

    /// Override the PDF heuristics.
    pub fn with_pdf(mut self, pdf: PdfHeuristics) -> Self {
        self.pdf = pdf;
        self
    }

    /// Set how many DOCX paragraphs are scanned for a title.
    pub fn with_docx_title_scan_limit(mut self, limit: usize) -> Self {
        self.docx_title_scan_limit = limit;
        self
    }

    /// Set the meaningful-filename threshold.
    pub fn with_meaningful_ratio(mut self, ratio: f32) -> Self {
        self.meaningful_ratio = ratio;
        self
    }

    /// Check the configuration for values the heuristics cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.legacy_doc.timeout_secs == 0 {
            return Err(Error::Config("legacy_doc.timeout_secs must be positive".to_string()));
        }
        if self.legacy_doc.program.trim().is_empty() {
            return Err(Error::Config("legacy_doc.program is empty".to_string()));
        }
        if self.docx_title_scan_limit == 0 {
            return Err(Error::Config("docx_title_scan_limit must be positive".to_string()));
        }
        let ratios = [
            ("pdf.margin_ratio", self.pdf.margin_ratio),
            ("pdf.title_zone_ratio", self.pdf.title_zone_ratio),
            ("pdf.title_size_ratio", self.pdf.title_size_ratio),
            ("meaningful_ratio", self.meaningful_ratio),
        ];
        for (name, value) in ratios {
            if !(value > 0.0 && value < 1.0) {
                return Err(Error::Config(format!("{} must be in (0, 1), got {}", name, value)));
            }
        }
        if self.pdf.margin_ratio >= 0.5 {
            return Err(Error::Config(format!(
                "pdf.margin_ratio {} would suppress the whole page",
                self.pdf.margin_ratio
            )));
        }
        Ok(())
    }
}

/// Settings for the out-of-process legacy DOC converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyDocConfig {
    /// Converter executable
    pub program: String,
    /// Arguments placed before the input path
    pub args: Vec<String>,
    /// Wall-clock limit for one conversion
    pub timeout_secs: u64,
}

impl Default for LegacyDocConfig {
    fn default() -> Self {
        Self {
            program: "antiword".to_string(),
            args: vec!["-w".to_string(), "0".to_string()],
            timeout_secs: 60,
        }
    }
}

impl LegacyDocConfig {
    /// Conversion timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Page-geometry thresholds for PDF extraction, as fractions of page height
/// (or of the maximum font size for `title_size_ratio`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfHeuristics {
    /// Header and footer bands suppressed from the body
    pub margin_ratio: f32,
    /// Upper zone of the first page searched for title lines
    pub title_zone_ratio: f32,
    /// Minimum title font size relative to the page maximum
    pub title_size_ratio: f32,
}

impl Default for PdfHeuristics {
    fn default() -> Self {
        Self {
            margin_ratio: 0.08,
            title_zone_ratio: 0.35,
            title_size_ratio: 0.8,
        }
    }
}
