//! Title resolution.
//!
//! A meaningful filename wins over anything found inside the document;
//! otherwise the parser's in-document candidate is used when it has more than
//! one character; otherwise the title is empty.

mod filename;

pub use filename::{clean_filename_as_title, FilenameScorer};

/// Pick the final title.
///
/// * `filename_title` - cleaned filename (see [`clean_filename_as_title`])
/// * `filename_is_meaningful` - verdict of [`FilenameScorer::is_meaningful`]
/// * `candidate` - noise-cleaned in-document title candidate
pub fn resolve_title(filename_title: &str, filename_is_meaningful: bool, candidate: &str) -> String {
    if filename_is_meaningful {
        return filename_title.to_string();
    }
    if candidate.trim().chars().count() > 1 {
        return candidate.to_string();
    }
    String::new()
}
