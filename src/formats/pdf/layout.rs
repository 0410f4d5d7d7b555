//! Page layout model for PDF body and title heuristics.
//!
//! All coordinates here are top-left based: `top` grows downward from the
//! top edge of the page. The adapter in the parent module converts from PDF
//! user space before anything in this file sees a span.
//!
//! ```text
//! spans ──(baseline band, sort by x)──► lines ──(vertical gap, overlap)──► blocks
//! ```

use crate::config::PdfHeuristics;
use crate::text::collapse_whitespace;
use crate::utils::safe_float_cmp;

/// Two lines belong to the same block when the gap between them is at most
/// this multiple of the lower line's font size.
const BLOCK_GAP_FACTOR: f32 = 0.6;

/// Spans whose baselines differ by less than this fraction of the font size
/// share a line.
const BASELINE_TOLERANCE: f32 = 0.5;

/// Horizontal gap (as a fraction of font size) that turns into a space when
/// joining spans of one line.
const WORD_GAP_FACTOR: f32 = 0.15;

/// A run of text at a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSpan {
    /// Text as extracted
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Top edge, measured from the top of the page
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Rendered font size in points
    pub font_size: f32,
}

impl PositionedSpan {
    /// Create a span.
    pub fn new(text: impl Into<String>, x: f32, top: f32, width: f32, height: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            top,
            width,
            height,
            font_size,
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn effective_size(&self) -> f32 {
        if self.font_size > 0.0 {
            self.font_size
        } else {
            self.height
        }
    }
}

/// Spans sharing a baseline, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Joined span text
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub top: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Largest font size among the line's spans
    pub font_size: f32,
}

/// Vertically adjacent lines with horizontal overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Block lines joined with `\n`
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub top: f32,
    /// Bottom edge
    pub bottom: f32,
}

/// Text content of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Page height in points
    pub height: f32,
    /// Spans on the page, in any order
    pub spans: Vec<PositionedSpan>,
}

impl PageLayout {
    /// Create a page layout.
    pub fn new(height: f32, spans: Vec<PositionedSpan>) -> Self {
        Self { height, spans }
    }

    /// Lines of this page, top to bottom.
    pub fn lines(&self) -> Vec<TextLine> {
        group_lines(&self.spans)
    }

    /// Blocks of this page, sorted by (top, left).
    pub fn blocks(&self) -> Vec<TextBlock> {
        group_blocks(&self.lines())
    }

    /// Body segments of this page with header and footer bands removed.
    ///
    /// A block is dropped when it lies entirely above `margin_ratio * height`
    /// or entirely below `(1 - margin_ratio) * height`. Line breaks inside a
    /// block become single spaces.
    pub fn body_segments(&self, heuristics: &PdfHeuristics) -> Vec<String> {
        let header_limit = self.height * heuristics.margin_ratio;
        let footer_limit = self.height * (1.0 - heuristics.margin_ratio);

        self.blocks()
            .into_iter()
            .filter(|b| !(b.bottom < header_limit || b.top > footer_limit))
            .map(|b| collapse_whitespace(b.text.trim()))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Title guess from font sizes and positions.
    ///
    /// Keeps lines whose size is at least `title_size_ratio` of the page's
    /// largest size and whose top lies within the first `title_zone_ratio`
    /// of the page, joined top to bottom. Falls back to the single largest
    /// line when none qualify.
    pub fn title_candidate(&self, heuristics: &PdfHeuristics) -> Option<String> {
        let lines: Vec<TextLine> = self
            .lines()
            .into_iter()
            .filter(|l| !l.text.trim().is_empty() && l.font_size > 0.0)
            .collect();

        let max_size = lines.iter().map(|l| l.font_size).fold(0.0f32, f32::max);
        if max_size <= 0.0 {
            return None;
        }

        let zone = self.height * heuristics.title_zone_ratio;
        let min_size = max_size * heuristics.title_size_ratio;

        let mut kept: Vec<&TextLine> = lines
            .iter()
            .filter(|l| l.top < zone && l.font_size >= min_size)
            .collect();
        kept.sort_by(|a, b| safe_float_cmp(a.top, b.top));

        if !kept.is_empty() {
            let parts: Vec<&str> = kept.iter().map(|l| l.text.trim()).collect();
            return Some(parts.join(" "));
        }

        // First line wins among equal sizes
        let mut largest = &lines[0];
        for line in &lines[1..] {
            if line.font_size > largest.font_size {
                largest = line;
            }
        }
        Some(largest.text.trim().to_string())
    }
}

/// Group spans into lines by baseline and order each line left to right.
pub fn group_lines(spans: &[PositionedSpan]) -> Vec<TextLine> {
    let mut spans: Vec<&PositionedSpan> = spans.iter().filter(|s| !s.text.trim().is_empty()).collect();
    if spans.is_empty() {
        return Vec::new();
    }
    spans.sort_by(|a, b| safe_float_cmp(a.bottom(), b.bottom()).then(safe_float_cmp(a.x, b.x)));

    let mut groups: Vec<Vec<&PositionedSpan>> = Vec::new();
    for span in spans {
        if let Some(current) = groups.last_mut() {
            let anchor = current[0];
            let tolerance = BASELINE_TOLERANCE * anchor.effective_size().max(span.effective_size());
            if (span.bottom() - anchor.bottom()).abs() <= tolerance {
                current.push(span);
                continue;
            }
        }
        groups.push(vec![span]);
    }

    groups
        .into_iter()
        .map(|mut group| {
            group.sort_by(|a, b| safe_float_cmp(a.x, b.x));
            build_line(&group)
        })
        .collect()
}

fn build_line(spans: &[&PositionedSpan]) -> TextLine {
    let mut text = String::new();
    let mut prev_right: Option<f32> = None;
    let mut font_size = 0.0f32;
    let mut top = f32::MAX;
    let mut bottom = f32::MIN;

    for span in spans {
        if let Some(right) = prev_right {
            let gap = span.x - right;
            let needs_space = gap > WORD_GAP_FACTOR * span.effective_size()
                && !text.ends_with(char::is_whitespace)
                && !span.text.starts_with(char::is_whitespace);
            if needs_space {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
        prev_right = Some(span.right());
        font_size = font_size.max(span.font_size);
        top = top.min(span.top);
        bottom = bottom.max(span.bottom());
    }

    TextLine {
        text,
        x0: spans.first().map(|s| s.x).unwrap_or(0.0),
        x1: spans.iter().map(|s| s.right()).fold(f32::MIN, f32::max),
        top,
        bottom,
        font_size,
    }
}

/// Group lines into blocks and sort the blocks by (top, left).
pub fn group_blocks(lines: &[TextLine]) -> Vec<TextBlock> {
    let mut ordered: Vec<&TextLine> = lines.iter().collect();
    ordered.sort_by(|a, b| safe_float_cmp(a.top, b.top).then(safe_float_cmp(a.x0, b.x0)));

    let mut blocks: Vec<TextBlock> = Vec::new();
    for line in ordered {
        let max_gap = BLOCK_GAP_FACTOR * line.font_size.max(1.0);
        let target = blocks.iter_mut().rev().find(|b| {
            let gap = line.top - b.bottom;
            let overlaps = line.x0 < b.x1 && line.x1 > b.x0;
            overlaps && gap <= max_gap && line.top >= b.top
        });

        match target {
            Some(block) => {
                block.text.push('\n');
                block.text.push_str(&line.text);
                block.x0 = block.x0.min(line.x0);
                block.x1 = block.x1.max(line.x1);
                block.bottom = block.bottom.max(line.bottom);
            },
            None => blocks.push(TextBlock {
                text: line.text.clone(),
                x0: line.x0,
                x1: line.x1,
                top: line.top,
                bottom: line.bottom,
            }),
        }
    }

    blocks.sort_by(|a, b| safe_float_cmp(a.top, b.top).then(safe_float_cmp(a.x0, b.x0)));
    blocks
}
