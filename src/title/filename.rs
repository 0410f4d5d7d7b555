//! Filename meaningfulness scoring.
//!
//! Scanner and camera output (`IMG_0012`, `2023-05-01`, `scan_003`) is useless
//! as a title, while names like `2024年度财务报告` or `quarterly-budget-review`
//! are often better than anything recoverable from the document body. The
//! scorer segments the cleaned name and measures how much of it is made of
//! "semantic" words.

use crate::text::contains_cjk;
use crate::tokenizer::PosTagger;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

lazy_static! {
    static ref RE_SEPARATORS: Regex = Regex::new(r"[-_.]").unwrap();
    static ref RE_DIGITS_ONLY: Regex = Regex::new(r"^\d+$").unwrap();
    static ref RE_DATE_LIKE: Regex = Regex::new(r"^[\d\s/-]+$").unwrap();
    static ref RE_SYMBOLS_ONLY: Regex = Regex::new(r"^[\W_]+$").unwrap();
}

/// Generic words that say nothing about the content.
const GENERIC_WORDS: &[&str] = &["scan", "img", "doc", "file", "temp", "untitled", "screenshot"];

/// Latin words of this length or shorter never count as semantic.
const MAX_NON_SEMANTIC_LATIN: usize = 2;

/// Strip the extension and turn `-`, `_`, `.` into spaces.
///
/// ```
/// use docnorm::title::clean_filename_as_title;
///
/// assert_eq!(clean_filename_as_title("annual_report-2024.final.pdf"), "annual report 2024 final");
/// ```
pub fn clean_filename_as_title(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    RE_SEPARATORS.replace_all(&stem, " ").trim().to_string()
}

/// Decides whether a filename is good enough to serve as a title.
#[derive(Clone)]
pub struct FilenameScorer {
    segmenter: Arc<dyn PosTagger>,
    threshold: f32,
}

impl FilenameScorer {
    /// Create a scorer using `segmenter` for word splitting.
    pub fn new(segmenter: Arc<dyn PosTagger>, threshold: f32) -> Self {
        Self {
            segmenter,
            threshold,
        }
    }

    /// Fraction of the cleaned name (spaces excluded) covered by semantic
    /// words, or `None` when the name is rejected before segmentation.
    pub fn semantic_ratio(&self, filename: &str) -> Option<f32> {
        let clean = clean_filename_as_title(filename);
        if clean.chars().count() < 2 {
            return None;
        }

        let compact = clean.replace(' ', "");
        if compact.is_empty()
            || RE_DIGITS_ONLY.is_match(&compact)
            || RE_DATE_LIKE.is_match(&clean)
            || RE_SYMBOLS_ONLY.is_match(&compact)
        {
            return None;
        }

        let total = compact.chars().count();
        let semantic: usize = self
            .segmenter
            .segment(&clean)
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(semantic_length)
            .sum();

        Some(semantic as f32 / total as f32)
    }

    /// Whether the filename is meaningful (ratio at or above the threshold).
    pub fn is_meaningful(&self, filename: &str) -> bool {
        match self.semantic_ratio(filename) {
            Some(ratio) => {
                log::debug!("Filename '{}' semantic ratio {:.2}", filename, ratio);
                ratio >= self.threshold
            },
            None => false,
        }
    }
}

impl std::fmt::Debug for FilenameScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilenameScorer")
            .field("segmenter", &self.segmenter.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

/// Characters of `word` that count as semantic.
fn semantic_length(word: &str) -> usize {
    let len = word.chars().count();
    if contains_cjk(word) {
        return len;
    }
    let alphabetic = word.chars().all(char::is_alphabetic);
    if alphabetic && len > MAX_NON_SEMANTIC_LATIN && !is_generic(word) {
        len
    } else {
        0
    }
}

fn is_generic(word: &str) -> bool {
    let lower = word.to_lowercase();
    GENERIC_WORDS.contains(&lower.as_str())
}
