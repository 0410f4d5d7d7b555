//! Stopword set.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Built-in stopwords: high-frequency Chinese function words, a few generic
/// nouns that carry no topical signal, and whitespace characters that the
/// segmenter can emit as standalone tokens.
const DEFAULT_STOPWORDS: &[&str] = &[
    "的", "了", "和", "是", "就", "都", "而", "及", "与", "着", "或",
    "一个", "没有", "我们", "你们", "他们", "它", "它们",
    "在", "从", "对", "对于", "把", "被", "让", "向", "往",
    "虽然", "但是", "因为", "所以", "如果", "那么", "以及",
    "什么", "怎么", "哪里", "哪个", "这里", "那里",
    "建议", "意见", "办法", "情况",
    "\n", "\t", " ", "\u{3000}", "\u{a0}",
];

/// Read-only set of filtered terms.
///
/// Built once from [`DEFAULT_STOPWORDS`] plus an optional external list and
/// never mutated afterwards, so one instance can be shared across worker
/// threads without locking.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl StopwordSet {
    /// Build a set from arbitrary words (no defaults).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Defaults plus the terms of an external list, when one is given.
    ///
    /// A missing file is skipped; an unreadable file is logged and skipped.
    /// Neither prevents the defaults from being used.
    pub fn load(external: Option<&Path>) -> Self {
        let mut set = Self::default();
        if let Some(path) = external {
            if !path.exists() {
                log::debug!("Stopword file {} not found, using defaults", path.display());
                return set;
            }
            match set.read_file(path) {
                Ok(added) => log::info!("Loaded {} stopwords from {}", added, path.display()),
                Err(e) => log::warn!("Failed to load stopword file {}: {}", path.display(), e),
            }
        }
        set
    }

    /// Read one term per line (trimmed) and return how many lines were read.
    fn read_file(&mut self, path: &Path) -> Result<usize> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| Error::EncodingFailure(format!("stopword file is not UTF-8: {}", e)))?;
        let mut count = 0;
        for line in content.lines() {
            self.words.insert(line.trim().to_string());
            count += 1;
        }
        Ok(count)
    }

    /// Whether `word` is filtered.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set holds no terms.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
