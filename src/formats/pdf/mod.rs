//! PDF parsing on top of `pdf_oxide`.
//!
//! `pdf_oxide` supplies spans in PDF user space (origin bottom-left). This
//! module converts them into [`layout::PageLayout`]s with a top-left origin
//! and runs the body and title heuristics there. Title lookup degrades in
//! stages: first-page layout, then the `/Info /Title` entry.

pub mod layout;

use crate::config::PdfHeuristics;
use crate::document::{ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use crate::formats::FormatParser;
use layout::{PageLayout, PositionedSpan};
use pdf_oxide::object::Object;
use pdf_oxide::PdfDocument;
use std::collections::HashMap;
use std::io::Write;

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: MediaBox = MediaBox {
    bottom: 0.0,
    top: 792.0,
};

/// Page tree nesting beyond this depth is treated as malformed.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Vertical extent of a page's MediaBox.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MediaBox {
    bottom: f32,
    top: f32,
}

impl MediaBox {
    fn from_array(values: &[Object]) -> Option<Self> {
        if values.len() != 4 {
            return None;
        }
        let y0 = number(&values[1])?;
        let y1 = number(&values[3])?;
        let (bottom, top) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if top - bottom <= 0.0 {
            return None;
        }
        Some(Self { bottom, top })
    }

    fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// PDF parser.
#[derive(Debug, Clone, Default)]
pub struct PdfParser {
    heuristics: PdfHeuristics,
}

impl PdfParser {
    /// Create a parser with the given heuristics.
    pub fn new(heuristics: PdfHeuristics) -> Self {
        Self { heuristics }
    }

    fn load_pages(&self, doc: &mut PdfDocument) -> Result<Vec<Option<PageLayout>>> {
        let page_count = doc.page_count().map_err(corrupt)?;
        let boxes = match media_boxes(doc) {
            Ok(boxes) => boxes,
            Err(e) => {
                log::debug!("Could not read page MediaBoxes, assuming Letter: {}", e);
                Vec::new()
            },
        };

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let media_box = boxes.get(index).copied().unwrap_or(DEFAULT_MEDIA_BOX);
            match doc.extract_spans(index) {
                Ok(spans) => {
                    let spans = spans
                        .into_iter()
                        .map(|s| {
                            // y is the bottom edge in user space
                            let top = media_box.top - (s.bbox.y + s.bbox.height);
                            PositionedSpan::new(s.text, s.bbox.x, top, s.bbox.width, s.bbox.height, s.font_size)
                        })
                        .collect();
                    pages.push(Some(PageLayout::new(media_box.height(), spans)));
                },
                Err(e) => {
                    log::warn!("Failed to extract text from page {}: {}", index + 1, e);
                    pages.push(None);
                },
            }
        }
        Ok(pages)
    }

    fn title_candidate(&self, doc: &mut PdfDocument, first_page: Option<&PageLayout>) -> Option<String> {
        if let Some(title) = first_page.and_then(|page| page.title_candidate(&self.heuristics)) {
            if !title.trim().is_empty() {
                return Some(title);
            }
        }
        log::debug!("No layout title on first page, trying document info");

        match info_title(doc) {
            Ok(title) => title.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                log::debug!("Document info title unavailable: {}", e);
                None
            },
        }
    }
}

impl FormatParser for PdfParser {
    fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument> {
        // pdf_oxide opens from a path; in-memory documents go through a temp file
        let spilled;
        let path = if source.path().exists() {
            source.path()
        } else {
            let mut file = tempfile::Builder::new().suffix(".pdf").tempfile()?;
            file.write_all(source.bytes())?;
            file.flush()?;
            spilled = file;
            spilled.path()
        };

        let mut doc = PdfDocument::open(path).map_err(corrupt)?;
        let pages = self.load_pages(&mut doc)?;

        let title = self.title_candidate(&mut doc, pages.first().and_then(Option::as_ref));
        let segments = pages
            .iter()
            .flatten()
            .flat_map(|page| page.body_segments(&self.heuristics))
            .collect();

        Ok(ParsedDocument::new(segments, title))
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

fn corrupt(err: pdf_oxide::Error) -> Error {
    Error::CorruptDocument {
        format: "PDF",
        reason: err.to_string(),
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn resolve_dict(doc: &mut PdfDocument, obj: &Object) -> pdf_oxide::Result<Option<HashMap<String, Object>>> {
    let resolved = doc.resolve_object(obj)?;
    Ok(resolved.as_dict().cloned())
}

/// MediaBox of every page in page-tree order. MediaBox is inheritable, so
/// the walk carries the nearest ancestor's value down.
fn media_boxes(doc: &mut PdfDocument) -> pdf_oxide::Result<Vec<MediaBox>> {
    let catalog = doc.catalog()?;
    let mut boxes = Vec::new();
    if let Some(pages) = catalog.as_dict().and_then(|d| d.get("Pages")).cloned() {
        walk_page_tree(doc, &pages, DEFAULT_MEDIA_BOX, 0, &mut boxes)?;
    }
    Ok(boxes)
}

fn walk_page_tree(
    doc: &mut PdfDocument,
    node: &Object,
    inherited: MediaBox,
    depth: usize,
    boxes: &mut Vec<MediaBox>,
) -> pdf_oxide::Result<()> {
    if depth > MAX_PAGE_TREE_DEPTH {
        return Ok(());
    }
    let Some(dict) = resolve_dict(doc, node)? else {
        return Ok(());
    };

    let media_box = match dict.get("MediaBox") {
        Some(obj) => {
            let resolved = doc.resolve_object(obj)?;
            resolved
                .as_array()
                .and_then(|values| MediaBox::from_array(values))
                .unwrap_or(inherited)
        },
        None => inherited,
    };

    match dict.get("Kids").map(|kids| doc.resolve_object(kids)).transpose()? {
        Some(Object::Array(kids)) => {
            for kid in &kids {
                walk_page_tree(doc, kid, media_box, depth + 1, boxes)?;
            }
        },
        _ => boxes.push(media_box),
    }
    Ok(())
}

/// `/Title` from the trailer's `/Info` dictionary.
fn info_title(doc: &mut PdfDocument) -> pdf_oxide::Result<Option<String>> {
    let info = match doc.trailer().as_dict().and_then(|d| d.get("Info")).cloned() {
        Some(info) => info,
        None => return Ok(None),
    };
    let Some(dict) = resolve_dict(doc, &info)? else {
        return Ok(None);
    };
    let Some(title) = dict.get("Title") else {
        return Ok(None);
    };
    let title = doc.resolve_object(title)?;
    Ok(title.as_string().map(decode_text_string))
}

/// Decode a PDF text string: UTF-16BE when it starts with a BOM, otherwise
/// PDFDocEncoding (read as Latin-1).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let (text, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(rest);
        return text.trim_end_matches('\0').to_string();
    }
    encoding_rs::mem::decode_latin1(bytes).into_owned()
}
