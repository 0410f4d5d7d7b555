//! Part-of-speech aware tokenization.
//!
//! ```text
//! text ─► collapse whitespace ─► PosTagger ─► (word, tag)* ─► filter ─► tokens
//! ```
//!
//! A word survives the filter when, after trimming, it is at least two
//! characters long, is not a stopword, and its tag does not start with one of
//! [`EXCLUDED_TAG_PREFIXES`]. Order and duplicates are preserved: the output
//! is a token stream, not a vocabulary.

mod stopwords;
mod tagger;

pub use stopwords::StopwordSet;
pub use tagger::{JiebaTagger, PosTagger, TaggedWord};

use crate::text::collapse_whitespace;
use std::sync::Arc;

/// Tag prefixes whose words are dropped: numeral, quantifier, unknown/symbol,
/// punctuation, preposition, conjunction, auxiliary, pronoun, time.
pub const EXCLUDED_TAG_PREFIXES: &[char] = &['m', 'q', 'x', 'w', 'p', 'c', 'u', 'r', 't'];

/// Minimum token length in characters.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Tokenizer over a shared tagger and an immutable stopword set.
///
/// Cloning is cheap; clones share the tagger and stopwords.
#[derive(Clone)]
pub struct Tokenizer {
    stopwords: Arc<StopwordSet>,
    tagger: Arc<dyn PosTagger>,
}

impl Tokenizer {
    /// Create a tokenizer from a stopword set and a tagger.
    pub fn new(stopwords: StopwordSet, tagger: Arc<dyn PosTagger>) -> Self {
        Self {
            stopwords: Arc::new(stopwords),
            tagger,
        }
    }

    /// Create a tokenizer backed by [`JiebaTagger`].
    pub fn with_jieba(stopwords: StopwordSet) -> Self {
        Self::new(stopwords, Arc::new(JiebaTagger::new()))
    }

    /// The stopword set in use.
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// The tagger in use.
    pub fn tagger(&self) -> &Arc<dyn PosTagger> {
        &self.tagger
    }

    /// Tokenize `text` into filtered words, in original order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let text = collapse_whitespace(text);
        self.tagger
            .tag(&text)
            .into_iter()
            .filter_map(|tagged| {
                let word = tagged.word.trim();
                if self.keep(word, &tagged.tag) {
                    Some(word.to_string())
                } else {
                    None
                }
            })
            .collect()
    }

    fn keep(&self, word: &str, tag: &str) -> bool {
        if word.chars().count() < MIN_TOKEN_CHARS {
            return false;
        }
        if self.stopwords.contains(word) {
            return false;
        }
        !tag.starts_with(EXCLUDED_TAG_PREFIXES)
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stopwords", &self.stopwords.len())
            .field("tagger", &self.tagger.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on spaces; tag is everything after a '/' in the word.
    struct SlashTagger;

    impl PosTagger for SlashTagger {
        fn tag(&self, text: &str) -> Vec<TaggedWord> {
            text.split(' ')
                .map(|piece| match piece.split_once('/') {
                    Some((word, tag)) => TaggedWord::new(word, tag),
                    None => TaggedWord::new(piece, "n"),
                })
                .collect()
        }

        fn name(&self) -> &'static str {
            "slash"
        }
    }

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(StopwordSet::default(), Arc::new(SlashTagger))
    }

    #[test]
    fn test_filters_short_words() {
        assert_eq!(tokenizer().tokenize("a/n 报告/n 书/n"), vec!["报告"]);
    }

    #[test]
    fn test_filters_stopwords() {
        assert_eq!(tokenizer().tokenize("我们/n 研究/vn"), vec!["研究"]);
    }

    #[test]
    fn test_filters_excluded_tags() {
        let tokens = tokenizer().tokenize(
            "2024/m 个人/q ##/x ，，/w 关于/p 并且/c 之类/u 自己/r 今天/t 系统/n",
        );
        assert_eq!(tokens, vec!["系统"]);
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        assert_eq!(
            tokenizer().tokenize("数据/n 分析/vn 数据/n"),
            vec!["数据", "分析", "数据"]
        );
    }

    #[test]
    fn test_tag_prefix_not_substring() {
        // "eng" and "vn" contain excluded letters but do not start with them
        assert_eq!(tokenizer().tokenize("Rust/eng 运行/vn"), vec!["Rust", "运行"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenizer().tokenize("").is_empty());
        assert!(tokenizer().tokenize(" \t\n ").is_empty());
    }

    #[test]
    fn test_whitespace_collapsed_before_tagging() {
        assert_eq!(tokenizer().tokenize("数据/n\n\n\t分析/vn"), vec!["数据", "分析"]);
    }

    #[test]
    fn test_debug_does_not_dump_set() {
        let debug = format!("{:?}", tokenizer());
        assert!(debug.contains("slash"));
    }
}
