//! Spreadsheet parsing (`.xlsx`, `.xls`).
//!
//! Uses the calamine crate, which detects the workbook flavour from the
//! bytes. Each non-blank row becomes one segment; workbooks with several
//! sheets get a `Sheet: <name>` marker before each sheet's rows.

use crate::document::{ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use crate::formats::FormatParser;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

/// Spreadsheet parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetParser;

impl SpreadsheetParser {
    /// Create a new spreadsheet parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse workbook bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedDocument> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| Error::CorruptDocument {
            format: "Spreadsheet",
            reason: format!("Failed to open workbook: {}", e),
        })?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let multi_sheet = sheet_names.len() > 1;

        let mut segments = Vec::new();
        let mut title = None;

        for (index, name) in sheet_names.iter().enumerate() {
            let range = match workbook.worksheet_range(name) {
                Ok(range) => range,
                Err(e) => {
                    return Err(Error::CorruptDocument {
                        format: "Spreadsheet",
                        reason: format!("Failed to read sheet '{}': {}", name, e),
                    })
                },
            };

            if index == 0 {
                title = title_row(&range);
            }
            if multi_sheet {
                segments.push(format!("Sheet: {}", name));
            }
            segments.extend(range.rows().filter_map(row_text));
        }

        Ok(ParsedDocument::new(segments, title))
    }
}

impl FormatParser for SpreadsheetParser {
    fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument> {
        self.parse_bytes(source.bytes())
    }

    fn name(&self) -> &'static str {
        "spreadsheet"
    }
}

/// The first row, when it reduces to exactly one cell.
fn title_row(range: &Range<Data>) -> Option<String> {
    let first = range.rows().next()?;
    let mut cells = kept_cells(first);
    if cells.len() == 1 {
        cells.pop()
    } else {
        None
    }
}

/// Trimmed cells with blanks and `nan` placeholders removed.
fn kept_cells(row: &[Data]) -> Vec<String> {
    row.iter()
        .map(cell_to_string)
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("nan"))
        .collect()
}

fn row_text(row: &[Data]) -> Option<String> {
    let cells = kept_cells(row);
    if cells.is_empty() {
        None
    } else {
        Some(cells.join(" "))
    }
}

/// Convert a cell value to a string.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        },
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}
