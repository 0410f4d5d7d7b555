//! Word segmentation and part-of-speech tagging.
//!
//! The tokenizer only defines the filtering contract; the linguistic analysis
//! itself is pluggable through [`PosTagger`]. [`JiebaTagger`] is the default
//! implementation and uses the ICTCLAS-style tag set (`n`, `v`, `m`, `eng`,
//! `x`, ...).

use jieba_rs::Jieba;

/// One segmented word with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    /// Surface form
    pub word: String,
    /// Part-of-speech tag
    pub tag: String,
}

impl TaggedWord {
    /// Create a tagged word.
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Joint word segmentation + part-of-speech tagging capability.
pub trait PosTagger: Send + Sync {
    /// Segment `text` and tag every word, preserving order.
    fn tag(&self, text: &str) -> Vec<TaggedWord>;

    /// Segment `text` without tags.
    fn segment(&self, text: &str) -> Vec<String> {
        self.tag(text).into_iter().map(|t| t.word).collect()
    }

    /// Return the name of this tagger for debugging.
    fn name(&self) -> &'static str;
}

/// [`PosTagger`] backed by the jieba dictionary and HMM.
pub struct JiebaTagger {
    jieba: Jieba,
}

impl JiebaTagger {
    /// Load the bundled dictionary. This takes a noticeable moment; build one
    /// instance and share it.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JiebaTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiebaTagger").finish_non_exhaustive()
    }
}

impl PosTagger for JiebaTagger {
    fn tag(&self, text: &str) -> Vec<TaggedWord> {
        self.jieba
            .tag(text, true)
            .into_iter()
            .map(|t| TaggedWord::new(t.word, t.tag))
            .collect()
    }

    fn segment(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn name(&self) -> &'static str {
        "jieba"
    }
}
