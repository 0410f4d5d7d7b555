//! Legacy Word (`.doc`) parsing through an external converter.
//!
//! The converter (antiword by default) writes plain text to stdout. Stdout
//! goes to an anonymous temporary file rather than a pipe, so the wait loop
//! never blocks on a full pipe buffer. The child is polled against the
//! configured timeout and killed when it runs over.

use crate::config::LegacyDocConfig;
use crate::document::{ParsedDocument, SourceDocument};
use crate::error::{Error, Result};
use crate::formats::FormatParser;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between exit checks.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Legacy DOC parser.
#[derive(Debug, Clone, Default)]
pub struct LegacyDocParser {
    config: LegacyDocConfig,
}

impl LegacyDocParser {
    /// Create a parser with the given converter settings.
    pub fn new(config: LegacyDocConfig) -> Self {
        Self { config }
    }

    /// Converter settings.
    pub fn config(&self) -> &LegacyDocConfig {
        &self.config
    }

    fn failure(&self, reason: impl Into<String>) -> Error {
        Error::ExternalToolFailure {
            tool: self.config.program.clone(),
            reason: reason.into(),
        }
    }

    /// Run the converter on `path` and return its stdout.
    fn convert(&self, path: &Path) -> Result<String> {
        let mut stdout = tempfile::tempfile()?;
        let child = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout.try_clone()?))
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    self.failure("converter is not installed")
                } else {
                    self.failure(format!("failed to start: {}", e))
                }
            })?;

        let mut guard = ChildGuard(Some(child));
        let status = self.wait(&mut guard)?;
        if !status.success() {
            return Err(self.failure(format!("exited with {}", status)));
        }

        let mut raw = Vec::new();
        stdout.seek(SeekFrom::Start(0))?;
        stdout.read_to_end(&mut raw)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn wait(&self, guard: &mut ChildGuard) -> Result<ExitStatus> {
        let timeout = self.config.timeout();
        let started = Instant::now();
        loop {
            let Some(child) = guard.0.as_mut() else {
                return Err(self.failure("process handle lost"));
            };
            match child.try_wait() {
                Ok(Some(status)) => {
                    guard.0 = None;
                    return Ok(status);
                },
                Ok(None) => {
                    if started.elapsed() >= timeout {
                        log::warn!(
                            "{} timed out after {:?}, killing pid {}",
                            self.config.program,
                            timeout,
                            child.id()
                        );
                        guard.kill();
                        return Err(self.failure(format!("timed out after {}s", timeout.as_secs())));
                    }
                    thread::sleep(POLL_INTERVAL);
                },
                Err(e) => return Err(self.failure(format!("wait failed: {}", e))),
            }
        }
    }
}

impl FormatParser for LegacyDocParser {
    fn parse(&self, source: &SourceDocument) -> Result<ParsedDocument> {
        // In-memory documents are spilled to disk for the converter
        let spilled;
        let path = if source.path().exists() {
            source.path()
        } else {
            let mut file = tempfile::Builder::new().suffix(".doc").tempfile()?;
            file.write_all(source.bytes())?;
            file.flush()?;
            spilled = file;
            spilled.path()
        };

        let output = self.convert(path)?;
        if output.is_empty() {
            return Err(self.failure("no output"));
        }

        let segments: Vec<String> = output.lines().map(str::to_string).collect();
        let title = segments
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
            .map(str::to_string);

        Ok(ParsedDocument::new(segments, title))
    }

    fn name(&self) -> &'static str {
        "legacy-doc"
    }
}

/// Kills and reaps the child if it is still held when dropped.
struct ChildGuard(Option<Child>);

impl ChildGuard {
    fn kill(&mut self) {
        if let Some(mut child) = self.0.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.kill();
    }
}
