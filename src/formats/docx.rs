//! DOCX parsing.
//!
//! DOCX files are ZIP archives containing XML files in Open XML format.
//! Body text lives in `word/document.xml`, style names in
//! `word/styles.xml` and the declared title in `docProps/core.xml`.
//!
//! Segments are the non-blank body paragraphs followed by the rows of the
//! top-level tables. The title candidate comes from scoring the leading
//! paragraphs by style, run size and alignment.

use crate::document::{ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use crate::formats::FormatParser;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

/// Points assumed for runs without an explicit size on heading/title styles.
const HEADING_DEFAULT_POINTS: f32 = 16.0;

/// Points assumed for runs without an explicit size elsewhere.
const BODY_DEFAULT_POINTS: f32 = 10.5;

/// Run size at or above which a paragraph gets the large-font bonus.
const LARGE_FONT_POINTS: f32 = 15.0;

/// Score a paragraph must exceed to be part of the title.
const TITLE_SCORE_THRESHOLD: u32 = 40;

/// One body paragraph with the properties the title scorer needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocxParagraph {
    /// Concatenated run text; `w:tab` is `\t`, `w:br` is `\n`
    pub text: String,
    /// Lowercased style name
    pub style: String,
    /// Largest explicit run size in points
    pub max_run_points: Option<f32>,
    /// Alignment is `center`
    pub centered: bool,
}

impl DocxParagraph {
    /// Title score of this paragraph.
    pub fn title_score(&self) -> u32 {
        let mut score = 0;
        if self.style.contains("title") {
            score += 100;
        } else if self.style.contains("heading 1") {
            score += 50;
        }

        let points = match self.max_run_points {
            Some(points) if points > 0.0 => points,
            _ if score >= 50 => HEADING_DEFAULT_POINTS,
            _ => BODY_DEFAULT_POINTS,
        };
        if points >= LARGE_FONT_POINTS {
            score += 40;
        }
        if self.centered {
            score += 20;
        }
        score
    }
}

/// Pick title paragraphs from the first `scan_limit` paragraphs.
///
/// Blank paragraphs are skipped but still use up the scan window. Scanning
/// stops at the first non-qualifying paragraph after an accepted one.
pub fn title_from_paragraphs(paragraphs: &[DocxParagraph], scan_limit: usize) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for paragraph in paragraphs.iter().take(scan_limit) {
        let text = paragraph.text.trim();
        if text.is_empty() {
            continue;
        }
        if paragraph.title_score() > TITLE_SCORE_THRESHOLD {
            parts.push(text);
        } else if !parts.is_empty() {
            break;
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Word (OOXML) parser.
#[derive(Debug, Clone)]
pub struct DocxParser {
    title_scan_limit: usize,
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new(8)
    }
}

impl DocxParser {
    /// Create a parser scanning `title_scan_limit` paragraphs for a title.
    pub fn new(title_scan_limit: usize) -> Self {
        Self { title_scan_limit }
    }

    /// Parse DOCX bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedDocument> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| corrupt(format!("Failed to open DOCX archive: {}", e)))?;

        let document_xml = read_entry(&mut archive, "word/document.xml")?
            .ok_or_else(|| corrupt("Missing word/document.xml".to_string()))?;
        let body = parse_body(&document_xml)?;

        let styles = match read_entry(&mut archive, "word/styles.xml") {
            Ok(Some(xml)) => parse_styles(&xml),
            Ok(None) => StyleTable::default(),
            Err(e) => {
                log::debug!("Ignoring unreadable styles.xml: {}", e);
                StyleTable::default()
            },
        };

        let paragraphs: Vec<DocxParagraph> = body
            .paragraphs
            .into_iter()
            .map(|raw| DocxParagraph {
                style: styles.name_of(raw.style_id.as_deref()),
                text: raw.text,
                max_run_points: raw.max_run_points,
                centered: raw.centered,
            })
            .collect();

        let mut title = title_from_paragraphs(&paragraphs, self.title_scan_limit);
        if title.is_none() {
            title = read_entry(&mut archive, "docProps/core.xml")
                .ok()
                .flatten()
                .and_then(|xml| parse_core_title(&xml))
                .filter(|t| !t.trim().is_empty());
        }

        let mut segments: Vec<String> = paragraphs
            .into_iter()
            .filter(|p| !p.text.trim().is_empty())
            .map(|p| p.text)
            .collect();
        segments.extend(body.rows);

        Ok(ParsedDocument::new(segments, title))
    }
}

impl FormatParser for DocxParser {
    fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument> {
        self.parse_bytes(source.bytes())
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

fn corrupt(reason: String) -> Error {
    Error::CorruptDocument { format: "DOCX", reason }
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| corrupt(format!("Failed to read {}: {}", name, e)))?;
            Ok(Some(content))
        },
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(corrupt(format!("Failed to read {}: {}", name, e))),
    }
}

/// Helper to get an attribute value from an XML element.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// styleId → lowercase display name.
#[derive(Debug, Default)]
struct StyleTable {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleTable {
    fn name_of(&self, style_id: Option<&str>) -> String {
        let id = style_id.or(self.default_paragraph.as_deref());
        match id {
            Some(id) => self
                .names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_lowercase()),
            None => "normal".to_string(),
        }
    }
}

fn parse_styles(xml: &str) -> StyleTable {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut table = StyleTable::default();
    let mut buf = Vec::new();
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"style" => {
                    current_id = get_attribute(e, "styleId");
                    let is_paragraph = get_attribute(e, "type").as_deref() == Some("paragraph");
                    let is_default = matches!(get_attribute(e, "default").as_deref(), Some("1") | Some("true"));
                    if is_paragraph && is_default {
                        table.default_paragraph = current_id.clone();
                    }
                },
                b"name" => {
                    if let (Some(id), Some(name)) = (&current_id, get_attribute(e, "val")) {
                        table.names.insert(id.clone(), name.to_lowercase());
                    }
                },
                _ => {},
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => {
                current_id = None;
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::debug!("styles.xml parse error: {}", e);
                break;
            },
            _ => {},
        }
        buf.clear();
    }

    table
}

fn parse_core_title(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut in_title = false;
    let mut title = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"title" => in_title = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"title" => in_title = false,
            Ok(Event::Text(e)) if in_title => {
                title = Some(e.unescape().unwrap_or_default().to_string());
            },
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {},
        }
        buf.clear();
    }

    title
}

#[derive(Debug, Default)]
struct RawParagraph {
    text: String,
    style_id: Option<String>,
    max_run_points: Option<f32>,
    centered: bool,
}

#[derive(Debug, Default)]
struct Body {
    paragraphs: Vec<RawParagraph>,
    rows: Vec<String>,
}

/// Walks `word/document.xml`, separating body paragraphs from table rows.
#[derive(Debug, Default)]
struct BodyCollector {
    body: Body,
    current: Option<RawParagraph>,
    table_depth: usize,
    row_cells: Vec<String>,
    cell_text: String,
    in_run: bool,
    in_text: bool,
    in_paragraph_props: bool,
}

impl BodyCollector {
    fn start(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"p" => self.current = Some(RawParagraph::default()),
            b"pPr" => self.in_paragraph_props = true,
            b"r" => self.in_run = true,
            b"t" => self.in_text = self.in_run,
            b"tbl" => self.table_depth += 1,
            b"tr" if self.table_depth == 1 => self.row_cells.clear(),
            b"tc" if self.table_depth == 1 => self.cell_text.clear(),
            _ => self.property(e),
        }
    }

    fn empty(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"p" => {
                self.current = Some(RawParagraph::default());
                self.finish_paragraph();
            },
            b"tc" if self.table_depth == 1 => self.row_cells.push(String::new()),
            _ => self.property(e),
        }
    }

    fn end(&mut self, local_name: &[u8]) {
        match local_name {
            b"p" => self.finish_paragraph(),
            b"pPr" => self.in_paragraph_props = false,
            b"r" => self.in_run = false,
            b"t" => self.in_text = false,
            b"tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            b"tc" if self.table_depth == 1 => {
                let cell = std::mem::take(&mut self.cell_text);
                self.row_cells.push(cell.trim().to_string());
            },
            b"tr" if self.table_depth == 1 => {
                let cells: Vec<&str> = self
                    .row_cells
                    .iter()
                    .map(String::as_str)
                    .filter(|c| !c.is_empty())
                    .collect();
                if !cells.is_empty() {
                    self.body.rows.push(cells.join(" "));
                }
                self.row_cells.clear();
            },
            _ => {},
        }
    }

    /// Elements that carry formatting or inline content.
    fn property(&mut self, e: &BytesStart) {
        let Some(paragraph) = self.current.as_mut() else {
            return;
        };
        match e.local_name().as_ref() {
            b"pStyle" if self.in_paragraph_props => {
                paragraph.style_id = get_attribute(e, "val");
            },
            b"jc" if self.in_paragraph_props => {
                paragraph.centered = get_attribute(e, "val").as_deref() == Some("center");
            },
            b"sz" if self.in_run => {
                let points = get_attribute(e, "val")
                    .and_then(|v| v.parse::<i32>().ok())
                    .map(|half_points| half_points as f32 / 2.0);
                if let Some(points) = points {
                    let max = paragraph.max_run_points.unwrap_or(0.0).max(points);
                    paragraph.max_run_points = Some(max);
                }
            },
            b"tab" if self.in_run => paragraph.text.push('\t'),
            b"br" | b"cr" if self.in_run => paragraph.text.push('\n'),
            _ => {},
        }
    }

    fn text(&mut self, text: &str) {
        if !self.in_text {
            return;
        }
        if let Some(paragraph) = self.current.as_mut() {
            paragraph.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(paragraph) = self.current.take() else {
            return;
        };
        self.in_run = false;
        self.in_text = false;
        self.in_paragraph_props = false;

        if self.table_depth == 0 {
            self.body.paragraphs.push(paragraph);
        } else if self.table_depth == 1 && !paragraph.text.is_empty() {
            // Nested table text is not part of the outer cell
            if !self.cell_text.is_empty() {
                self.cell_text.push('\n');
            }
            self.cell_text.push_str(&paragraph.text);
        }
    }
}

fn parse_body(xml: &str) -> Result<Body> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut collector = BodyCollector::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => collector.start(e),
            Ok(Event::Empty(ref e)) => collector.empty(e),
            Ok(Event::End(ref e)) => collector.end(e.local_name().as_ref()),
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| corrupt(format!("XML parse error: {}", err)))?;
                collector.text(&text);
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(corrupt(format!("XML parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(collector.body)
}
