//! Plain text parsing with encoding detection.
//!
//! Candidate encodings are tried in a fixed order and the first strict
//! (replacement-free) decode wins. Latin-1 accepts every byte sequence, so
//! in practice the cascade only fails on empty input.

use crate::document::{ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use crate::formats::FormatParser;
use encoding_rs::{Encoding, GB18030, GBK, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;

/// A text encoding the cascade can try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with an optional BOM
    Utf8,
    /// GB18030
    Gb18030,
    /// GBK
    Gbk,
    /// UTF-16; byte order from the BOM, little endian without one
    Utf16,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    /// Cascade order.
    pub const CASCADE: [TextEncoding; 5] = [
        TextEncoding::Utf8,
        TextEncoding::Gb18030,
        TextEncoding::Gbk,
        TextEncoding::Utf16,
        TextEncoding::Latin1,
    ];

    /// Decode `bytes` strictly, or `None` if they are not valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                strict(UTF_8, bytes)
            },
            TextEncoding::Gb18030 => strict(GB18030, bytes),
            TextEncoding::Gbk => strict(GBK, bytes),
            TextEncoding::Utf16 => {
                if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
                    strict(UTF_16LE, rest)
                } else if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
                    strict(UTF_16BE, rest)
                } else {
                    strict(UTF_16LE, bytes)
                }
            },
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Gb18030 => "GB18030",
            TextEncoding::Gbk => "GBK",
            TextEncoding::Utf16 => "UTF-16",
            TextEncoding::Latin1 => "ISO-8859-1",
        }
    }
}

fn strict<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Decode with the first encoding of the cascade that accepts `bytes`.
pub fn decode_text(bytes: &[u8]) -> Option<(TextEncoding, Cow<'_, str>)> {
    TextEncoding::CASCADE
        .iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (*encoding, text)))
}

/// Characters that end a line on their own; `\r\n` counts as one break.
const LINE_TERMINATORS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split into lines on `\r\n` and every char of [`LINE_TERMINATORS`]
/// (vertical tab, form feed, file/group/record separators, NEL and the
/// Unicode line and paragraph separators included). A trailing terminator
/// does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalized.split(LINE_TERMINATORS).map(str::to_string).collect();
    if normalized.ends_with(LINE_TERMINATORS) {
        lines.pop();
    }
    lines
}

/// Plain text parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    /// Create a new plain text parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse raw text bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedDocument> {
        let (encoding, text) = decode_text(bytes)
            .ok_or_else(|| Error::EncodingFailure("no candidate encoding accepted the input".to_string()))?;
        if text.is_empty() {
            return Err(Error::EncodingFailure("file is empty".to_string()));
        }
        log::debug!("Decoded text as {}", encoding.name());

        let segments = split_lines(&text);
        let title = segments
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
            .map(str::to_string);

        Ok(ParsedDocument::new(segments, title))
    }
}

impl FormatParser for PlainTextParser {
    fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument> {
        self.parse_bytes(source.bytes())
    }

    fn name(&self) -> &'static str {
        "plain-text"
    }
}
