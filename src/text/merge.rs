//! Segment merging.
//!
//! Parsers emit text in fragments (PDF blocks, paragraphs, table rows,
//! spreadsheet rows, lines). Merging walks them in reading order and decides
//! the separator for each join from the last emitted character and the first
//! character of the incoming fragment:
//!
//! | previous | next              | join                                |
//! |----------|-------------------|-------------------------------------|
//! | `-`      | lowercase a-z     | drop the hyphen, no separator       |
//! | ideograph| ideograph         | no separator                        |
//! | anything | anything          | one space                           |
//!
//! Blank fragments are skipped and leave the "previous" state untouched.

use super::cjk::is_cjk_char;
use super::noise::collapse_whitespace;

/// Merge raw text segments into one continuous string.
///
/// # Examples
///
/// ```
/// use docnorm::text::merge_segments;
///
/// assert_eq!(merge_segments(&["abc-", "def"]), "abcdef");
/// assert_eq!(merge_segments(&["你好", "世界"]), "你好世界");
/// assert_eq!(merge_segments(&["Hello", "World"]), "Hello World");
/// assert_eq!(merge_segments::<&str>(&[]), "");
/// ```
pub fn merge_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut buffer = String::new();
    let mut last_char: Option<char> = None;

    for segment in segments {
        let clean = collapse_whitespace(segment.as_ref().trim());
        let Some(first_char) = clean.chars().next() else {
            continue;
        };

        match last_char {
            None => buffer.push_str(&clean),
            Some('-') if first_char.is_ascii_lowercase() => {
                // Line-wrapped word: "inter-" + "national"
                let kept = buffer.trim_end_matches('-').len();
                buffer.truncate(kept);
                buffer.push_str(&clean);
            },
            Some(prev) if is_cjk_char(prev) && is_cjk_char(first_char) => {
                buffer.push_str(&clean);
            },
            Some(_) => {
                buffer.push(' ');
                buffer.push_str(&clean);
            },
        }

        last_char = clean.chars().next_back();
    }

    buffer
}
