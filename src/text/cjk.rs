//! CJK ideograph detection.
//!
//! Only the Han ideograph blocks count here. Kana, Hangul and CJK punctuation
//! are deliberately outside the set: two adjacent segments are glued without a
//! space only when both sides are ideographs.

/// Check if a character is a CJK unified ideograph.
///
/// Covers CJK Unified Ideographs (U+4E00..U+9FFF), Extension A
/// (U+3400..U+4DBF) and Extension B on the supplementary plane
/// (U+20000..U+2A6DF).
#[inline]
pub fn is_cjk_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF     // CJK Unified Ideographs
        | 0x3400..=0x4DBF   // CJK Unified Ideographs Extension A
        | 0x20000..=0x2A6DF // CJK Unified Ideographs Extension B
    )
}

/// Check if any character of `text` is a CJK ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}
