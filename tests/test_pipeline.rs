//! End-to-end runs of the extraction pipeline over files on disk.

mod common;

use common::{build_docx, Para, SpaceTagger};
use docnorm::{Error, Extraction, ExtractionConfig, ExtractionPipeline, FailureKind};
use std::path::Path;
use std::sync::Arc;

fn pipeline() -> ExtractionPipeline {
    ExtractionPipeline::with_tagger(ExtractionConfig::default(), Arc::new(SpaceTagger)).unwrap()
}

fn write(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_docx_with_scanner_filename_uses_heading() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = build_docx(
        &[
            Para {
                half_points: Some(40),
                centered: true,
                ..Para::styled("Budget （Draft）", "Title")
            },
            Para::plain("Travel costs ______ rose."),
            Para::plain("Printing costs fell......"),
        ],
        &[],
        None,
    );
    let path = write(dir.path(), "IMG_0007.docx", &bytes);

    let doc = pipeline().run_path(&path).unwrap().into_document().unwrap();
    assert_eq!(doc.title, "Budget (Draft)");
    assert_eq!(
        doc.content,
        "Budget (Draft) Travel costs rose. Printing costs fell"
    );
    assert_eq!(doc.seg_title, vec!["Budget", "(Draft)"]);
    assert_eq!(doc.seg_content.first().map(String::as_str), Some("Budget"));
}

#[test]
fn test_descriptive_filename_becomes_title() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "travel_policy_update.txt", "First line\nsecond line".as_bytes());

    let doc = pipeline().run_path(&path).unwrap().into_document().unwrap();
    assert_eq!(doc.title, "travel policy update");
    assert_eq!(doc.content, "First line second line");
    assert_eq!(doc.seg_title, vec!["travel", "policy", "update"]);
    assert_eq!(doc.seg_content, vec!["First", "line", "second", "line"]);
}

#[test]
fn test_whitespace_only_text_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "blank.txt", b"   \n\t  \n");
    assert_eq!(pipeline().run_path(&path).unwrap(), Extraction::Empty);
}

#[test]
fn test_missing_file_checked_before_extension() {
    let dir = tempfile::tempdir().unwrap();
    let err = pipeline().run_path(dir.path().join("gone.pptx")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "slides.pptx", b"PK");
    let err = pipeline().run_path(&path).unwrap_err();
    assert_eq!(err.kind(), FailureKind::UnsupportedFormat);
    assert!(!pipeline().supports(&path));
}

#[test]
fn test_parser_failure_carries_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.DOCX", b"definitely not a zip");
    let err = pipeline().run_path(&path).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CorruptDocument);
    assert!(err.to_string().contains(".docx"), "{}", err);
}

#[test]
fn test_jieba_pipeline_on_chinese_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "0001.txt", "年度财务报告\n我们的收入增长".as_bytes());

    let pipeline = ExtractionPipeline::new(ExtractionConfig::default()).unwrap();
    let doc = pipeline.run_path(&path).unwrap().into_document().unwrap();
    assert_eq!(doc.title, "年度财务报告");
    assert_eq!(doc.content, "年度财务报告我们的收入增长");
    assert!(!doc.seg_content.is_empty());
    assert!(!doc.seg_content.iter().any(|t| t == "我们"));
}
