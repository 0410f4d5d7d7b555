//! Formatting-artifact removal.
//!
//! Fill-in blanks (`______`), leader dots (`.......`) and full-width
//! parentheses are common in form-like office documents; none of them carry
//! meaning for indexing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Two or more underscores
    static ref RE_UNDERSCORES: Regex = Regex::new(r"_{2,}").unwrap();

    /// Three or more periods (leader dots)
    static ref RE_LEADER_DOTS: Regex = Regex::new(r"\.{3,}").unwrap();

    /// Any run of Unicode whitespace
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse every whitespace run to a single ASCII space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Strip formatting noise from merged text.
///
/// Steps, in order: underscore runs and leader dots become a space, full-width
/// parentheses become ASCII, whitespace runs collapse, and the ends are
/// trimmed. The result is a fixed point: `remove_noise(remove_noise(x)) ==
/// remove_noise(x)`.
pub fn remove_noise(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = RE_UNDERSCORES.replace_all(text, " ");
    let text = RE_LEADER_DOTS.replace_all(&text, " ");
    let text = text.replace('（', "(").replace('）', ")");
    let text = RE_WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
