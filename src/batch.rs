//! Batch extraction over a JSON manifest.
//!
//! The input manifest is a JSON array of `{ "url": ..., "path": ... }`
//! records (extra fields are carried through to the failure manifest).
//! Each record is processed independently: one document's failure is
//! recorded and the batch moves on.
//!
//! Outputs:
//!
//! - `extract_data.json` - one [`StoreRecord`] per successful document
//! - `fail.json` - one [`FailureRecord`] per failed or empty document,
//!   written only when there is at least one failure

use crate::document::{extension_of, Extraction, NormalizedDocument};
use crate::error::{Error, FailureKind, Result};
use crate::pipeline::ExtractionPipeline;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// File name of the success output.
pub const SUCCESS_FILE: &str = "extract_data.json";

/// File name of the failure manifest.
pub const FAILURE_FILE: &str = "fail.json";

/// Reason recorded for documents whose content is blank.
pub const EMPTY_CONTENT_REASON: &str = "Extraction returned empty content";

/// Number of content tokens echoed in per-document success logs.
const LOG_TOKEN_SAMPLE: usize = 20;

/// Number of title characters echoed in per-document success logs.
const LOG_TITLE_SAMPLE: usize = 10;

/// One entry of the input manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Source URL, used as the deduplication key when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Path relative to the raw-data root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Any other fields, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InputRecord {
    /// Create a record with just a URL and a path.
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            path: Some(path.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// `url`, else `path`; empty strings do not count.
    pub fn dedup_key(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.path.as_deref().filter(|p| !p.is_empty()))
    }
}

/// Normalized document plus its URL, as handed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Resolved title
    pub title: String,
    /// Normalized body text
    pub content: String,
    /// Title tokens
    pub seg_title: Vec<String>,
    /// Body tokens
    pub seg_content: Vec<String>,
    /// Source URL
    pub url: Option<String>,
}

impl StoreRecord {
    /// Attach a URL to a normalized document.
    pub fn new(url: Option<String>, document: NormalizedDocument) -> Self {
        Self {
            title: document.title,
            content: document.content,
            seg_title: document.seg_title,
            seg_content: document.seg_content,
            url,
        }
    }

    /// Title tokens joined with single spaces.
    pub fn seg_title_joined(&self) -> String {
        self.seg_title.join(" ")
    }

    /// Content tokens joined with single spaces.
    pub fn seg_content_joined(&self) -> String {
        self.seg_content.join(" ")
    }
}

/// An input record that did not produce a store record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The original manifest entry
    #[serde(flatten)]
    pub record: InputRecord,
    /// Human-readable cause
    pub error_reason: String,
    /// Classification
    pub failure_type: FailureKind,
}

/// Result of processing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Document normalized
    Success(StoreRecord),
    /// Document failed or was empty
    Failure(FailureRecord),
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Records before deduplication
    pub raw_count: usize,
    /// Records after deduplication
    pub unique_count: usize,
    /// Successful documents, in input order
    pub successes: Vec<StoreRecord>,
    /// Failed documents, in input order
    pub failures: Vec<FailureRecord>,
}

impl BatchReport {
    /// Failure counts keyed by failure type name, sorted by name.
    pub fn failure_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.failure_type.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Write the success file and, when needed, the failure manifest into
    /// `dir`.
    pub fn write_outputs(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let success_path = dir.join(SUCCESS_FILE);
        write_pretty_json(&success_path, &self.successes)?;
        log::info!(
            "[Success] Successful: {} (saved to {})",
            self.successes.len(),
            success_path.display()
        );

        if !self.failures.is_empty() {
            let failure_path = dir.join(FAILURE_FILE);
            write_pretty_json(&failure_path, &self.failures)?;
            log::info!(
                "[INFO] Failures: {} (saved to {})",
                self.failures.len(),
                failure_path.display()
            );
        }
        Ok(())
    }

    /// Log totals and per-type failure counts.
    pub fn log_summary(&self) {
        log::info!("[INFO] --------------------------------------------------");
        log::info!("[INFO] Total processed: {}", self.unique_count);
        log::info!("[INFO] Successful: {}", self.successes.len());
        log::info!("[INFO] Failed: {}", self.failures.len());
        for (kind, count) in self.failure_counts() {
            log::info!("[INFO]   - {}: {}", kind, count);
        }
    }
}

/// Serialize with four-space indentation, keeping non-ASCII text as is.
fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    std::fs::write(path, out)?;
    Ok(())
}

/// Read a manifest file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<InputRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Keep the first record per [`InputRecord::dedup_key`]; records without a
/// key are dropped.
pub fn dedupe(records: Vec<InputRecord>) -> Vec<InputRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| match record.dedup_key() {
            Some(key) => seen.insert(key.to_string()),
            None => false,
        })
        .collect()
}

/// Runs the pipeline over manifest records.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    pipeline: ExtractionPipeline,
    raw_root: PathBuf,
    limit: usize,
}

impl BatchDriver {
    /// Create a driver resolving record paths under `raw_root`.
    pub fn new(pipeline: ExtractionPipeline, raw_root: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            raw_root: raw_root.into(),
            limit: 0,
        }
    }

    /// Only process the first `limit` records (applied before
    /// deduplication). Zero means all.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Pipeline in use.
    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }

    /// Absolute location of a record's file.
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.raw_root.join(relative.trim_start_matches('/'))
    }

    /// Process every record and collect the outcomes.
    pub fn run(&self, mut records: Vec<InputRecord>) -> BatchReport {
        if self.limit > 0 {
            records.truncate(self.limit);
        }
        let raw_count = records.len();
        let records = dedupe(records);
        log::info!(
            "[INFO] Deduplication complete. Raw: {} -> Unique: {}",
            raw_count,
            records.len()
        );

        let mut report = BatchReport {
            raw_count,
            unique_count: records.len(),
            ..BatchReport::default()
        };
        for record in records {
            match self.process(record) {
                RecordOutcome::Success(store) => report.successes.push(store),
                RecordOutcome::Failure(failure) => report.failures.push(failure),
            }
        }
        report
    }

    /// Process a single record.
    pub fn process(&self, record: InputRecord) -> RecordOutcome {
        let Some(relative) = record.path.clone().filter(|p| !p.is_empty()) else {
            log::error!("[FAIL] Record {:?} has no path", record.url);
            return failure(record, "Record has no path".to_string(), FailureKind::FileNotFound);
        };
        let path = self.resolve_path(&relative);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| relative.clone());

        let extension = extension_of(&path);
        if !self.pipeline.supports(&path) {
            let reason = format!("Skipped extension: .{}", extension);
            log::error!("[FAIL] Error processing {}: {}", file_name, reason);
            return failure(record, reason, FailureKind::UnsupportedFormat);
        }

        match self.pipeline.run_path(&path) {
            Ok(Extraction::Normalized(document)) => {
                let store = StoreRecord::new(record.url, document);
                log_success(&file_name, &store);
                RecordOutcome::Success(store)
            },
            Ok(Extraction::Empty) => {
                log::info!("[FAIL] Skipped (Empty): {}", file_name);
                failure(record, EMPTY_CONTENT_REASON.to_string(), FailureKind::EmptyContent)
            },
            Err(e) => {
                log::error!("[FAIL] Error processing {}: {}", file_name, e);
                let kind = e.kind();
                failure(record, e.to_string(), kind)
            },
        }
    }
}

fn failure(record: InputRecord, error_reason: String, failure_type: FailureKind) -> RecordOutcome {
    RecordOutcome::Failure(FailureRecord {
        record,
        error_reason,
        failure_type,
    })
}

fn log_success(file_name: &str, store: &StoreRecord) {
    let title_sample: String = if store.title.is_empty() {
        "No Title".to_string()
    } else {
        store.title.chars().take(LOG_TITLE_SAMPLE).collect()
    };
    let token_sample = store
        .seg_content
        .iter()
        .take(LOG_TOKEN_SAMPLE)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    log::info!("[Success] {} | Title: {}... | Seg: {}...", file_name, title_sample, token_sample);
}
