//! Format parsers on generated documents, through the default registry.

mod common;

use common::{build_docx, build_pdf, build_workbook, build_xlsx, Para};
use docnorm::{Error, ExtractionConfig, FailureKind, FormatRegistry, SourceDocument};

fn registry() -> FormatRegistry {
    FormatRegistry::with_defaults(&ExtractionConfig::default())
}

fn parse(name: &str, bytes: Vec<u8>) -> docnorm::Result<docnorm::ParsedDocument> {
    registry().parse(&SourceDocument::from_bytes(name, bytes))
}

// ============================================================================
// DOCX
// ============================================================================

#[test]
fn test_docx_title_paragraph_and_body_order() {
    let bytes = build_docx(
        &[
            Para {
                half_points: Some(36),
                centered: true,
                ..Para::styled("Annual Budget", "Title")
            },
            Para::styled("Prepared by finance", "Normal"),
            Para::plain("   "),
            Para::plain("Second paragraph"),
        ],
        &[&["Item", "Cost"], &["Paper", " 12 "]],
        None,
    );

    let parsed = parse("IMG_0001.docx", bytes).unwrap();
    assert_eq!(parsed.title_candidate.as_deref(), Some("Annual Budget"));
    assert_eq!(
        parsed.segments,
        vec![
            "Annual Budget",
            "Prepared by finance",
            "Second paragraph",
            "Item Cost",
            "Paper 12",
        ]
    );
}

#[test]
fn test_docx_heading_sequence_joined() {
    let bytes = build_docx(
        &[
            Para {
                centered: true,
                ..Para::styled("Part One", "Heading1")
            },
            Para {
                centered: true,
                ..Para::styled("Overview", "Heading1")
            },
            Para::plain("Body"),
        ],
        &[],
        None,
    );

    let parsed = parse("x.docx", bytes).unwrap();
    assert_eq!(parsed.title_candidate.as_deref(), Some("Part One Overview"));
}

#[test]
fn test_docx_falls_back_to_declared_title() {
    let bytes = build_docx(&[Para::plain("just text")], &[], Some("Declared Title"));
    let parsed = parse("x.docx", bytes).unwrap();
    assert_eq!(parsed.title_candidate.as_deref(), Some("Declared Title"));
    assert_eq!(parsed.segments, vec!["just text"]);
}

#[test]
fn test_docx_without_title_signals() {
    let bytes = build_docx(&[Para::plain("just text")], &[], None);
    let parsed = parse("x.docx", bytes).unwrap();
    assert_eq!(parsed.title_candidate, None);
}

#[test]
fn test_docx_garbage_is_corrupt() {
    let err = parse("broken.docx", b"not a zip archive".to_vec()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CorruptDocument);
    match err {
        Error::Extraction { extension, .. } => assert_eq!(extension, "docx"),
        other => panic!("expected wrapped error, got {:?}", other),
    }
}

// ============================================================================
// Spreadsheet
// ============================================================================

#[test]
fn test_xlsx_title_row_and_rows() {
    let bytes = build_xlsx(&[&["Budget 2024"], &["Item", "Cost"], &["Paper", "12"], &["Ink", "3.5"]]);
    let parsed = parse("book.xlsx", bytes).unwrap();

    assert_eq!(parsed.title_candidate.as_deref(), Some("Budget 2024"));
    assert_eq!(parsed.segments, vec!["Budget 2024", "Item Cost", "Paper 12", "Ink 3.5"]);
}

#[test]
fn test_xlsx_wide_first_row_is_not_a_title() {
    let bytes = build_xlsx(&[&["Item", "Cost"], &["Paper", "12"]]);
    let parsed = parse("book.xlsx", bytes).unwrap();
    assert_eq!(parsed.title_candidate, None);
    assert_eq!(parsed.segments, vec!["Item Cost", "Paper 12"]);
}

#[test]
fn test_xlsx_multiple_sheets_get_markers() {
    let bytes = build_workbook(&[
        ("A", &[&["Title A"], &["x", "1"]]),
        ("B", &[&["Only B"], &["y", "2"]]),
    ]);
    let parsed = parse("book.xlsx", bytes).unwrap();

    assert_eq!(parsed.title_candidate.as_deref(), Some("Title A"));
    assert_eq!(parsed.segments, vec!["Sheet: A", "Title A", "x 1", "Sheet: B", "Only B", "y 2"]);
}

#[test]
fn test_xlsx_title_only_from_first_sheet() {
    let bytes = build_workbook(&[("Costs", &[&["Item", "Cost"]]), ("Notes", &[&["Summary"]])]);
    let parsed = parse("book.xlsx", bytes).unwrap();

    assert_eq!(parsed.title_candidate, None);
    assert_eq!(parsed.segments, vec!["Sheet: Costs", "Item Cost", "Sheet: Notes", "Summary"]);
}

#[test]
fn test_xls_garbage_is_corrupt() {
    let err = parse("book.xls", b"\x00\x01\x02 not a workbook".to_vec()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CorruptDocument);
}

// ============================================================================
// Plain text
// ============================================================================

#[test]
fn test_txt_gbk_bytes() {
    let (bytes, _, _) = encoding_rs::GBK.encode("年度报告\r\n第一行\r\n");
    let parsed = parse("notes.txt", bytes.into_owned()).unwrap();
    assert_eq!(parsed.title_candidate.as_deref(), Some("年度报告"));
    assert_eq!(parsed.segments, vec!["年度报告", "第一行"]);
}

#[test]
fn test_txt_utf8_bom_and_blank_first_line() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("\n  Heading \nbody".as_bytes());
    let parsed = parse("notes.TXT", bytes).unwrap();
    assert_eq!(parsed.title_candidate.as_deref(), Some("Heading"));
    assert_eq!(parsed.segments, vec!["", "  Heading ", "body"]);
}

#[test]
fn test_txt_empty_is_encoding_failure() {
    let err = parse("empty.txt", Vec::new()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::EncodingFailure);
}

// ============================================================================
// PDF
// ============================================================================

fn parse_pdf_file(bytes: Vec<u8>) -> docnorm::Result<docnorm::ParsedDocument> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, bytes).unwrap();
    registry().parse(&SourceDocument::open(&path).unwrap())
}

#[test]
fn test_pdf_title_from_large_text_near_top() {
    let content = "BT /F1 10 Tf 72 770 Td (Running Header) Tj ET\n\
                   BT /F1 24 Tf 72 690 Td (Annual Report) Tj ET\n\
                   BT /F1 12 Tf 72 400 Td (Body text here) Tj ET";
    let parsed = parse_pdf_file(build_pdf(content, None)).unwrap();

    assert_eq!(parsed.title_candidate.as_deref(), Some("Annual Report"));
    let body = parsed.segments.join(" ");
    assert!(body.contains("Body text here"), "body was {:?}", parsed.segments);
    assert!(!body.contains("Running Header"), "body was {:?}", parsed.segments);
}

#[test]
fn test_pdf_without_text_uses_info_title() {
    let parsed = parse_pdf_file(build_pdf("", Some("Declared Title"))).unwrap();
    assert!(parsed.segments.is_empty());
    assert_eq!(parsed.title_candidate.as_deref(), Some("Declared Title"));
}

#[test]
fn test_pdf_garbage_is_corrupt() {
    let err = parse_pdf_file(b"plain words, no PDF header".to_vec()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CorruptDocument);
}

#[test]
fn test_pdf_from_in_memory_bytes() {
    let bytes = build_pdf("BT /F1 12 Tf 72 400 Td (Body text here) Tj ET", None);
    let source = SourceDocument::from_bytes("/nonexistent/dir/report.pdf", bytes);
    let parsed = registry().parse(&source).unwrap();

    let body = parsed.segments.join(" ");
    assert!(body.contains("Body text here"), "body was {:?}", parsed.segments);
}
