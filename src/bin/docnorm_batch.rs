//! Batch document extraction.
//!
//! Reads a JSON manifest of `{url, path}` records, normalizes every file and
//! writes `extract_data.json` plus (when anything failed) `fail.json`.
//!
//! Usage:
//!   docnorm-batch --input raw_data.json --raw-root /data/raw
//!   docnorm-batch --input raw_data.json --raw-root /data/raw --limit 10
//!   docnorm-batch --input raw_data.json --log-dir logs --output-dir out

use chrono::Local;
use clap::Parser;
use docnorm::batch::{load_records, BatchDriver};
use docnorm::{ExtractionConfig, ExtractionPipeline};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "docnorm-batch")]
#[command(version, about = "Normalize the documents listed in a JSON manifest")]
struct Cli {
    /// Manifest: JSON array of {url, path} records
    #[arg(short, long)]
    input: PathBuf,

    /// Directory that record paths are relative to
    #[arg(short, long, default_value = ".")]
    raw_root: PathBuf,

    /// Where extract_data.json and fail.json are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write a timestamped log file into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Extraction configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra stopword list, one term per line
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Only process the first N records (0 = all)
    #[arg(short, long, visible_alias = "mode", default_value_t = 0)]
    limit: usize,
}

/// Writes log lines to stderr and to a file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Initialise logging; returns the log file path when one was opened.
fn init_logging(log_dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    let mut log_path = None;
    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("extract_data_{}.log", Local::now().format("%Y%m%d_%H%M%S")));
        let file = File::create(&path)?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
        log_path = Some(path);
    }

    builder.init();
    Ok(log_path)
}

fn load_config(cli: &Cli) -> docnorm::Result<ExtractionConfig> {
    let mut config = match &cli.config {
        Some(path) => ExtractionConfig::from_json_file(path)?,
        None => ExtractionConfig::default(),
    };
    if let Some(stopwords) = &cli.stopwords {
        config = config.with_stopwords_path(stopwords);
    }
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match init_logging(cli.log_dir.as_deref()) {
        Ok(Some(path)) => log::info!("[INFO] Logs saving to: {}", path.display()),
        Ok(None) => {},
        Err(e) => {
            eprintln!("Failed to open log file: {}", e);
            return ExitCode::FAILURE;
        },
    }

    if cli.limit == 0 {
        log::info!("[INFO] Processing ALL files");
    } else {
        log::info!("[INFO] Processing first {} files", cli.limit);
    }

    let records = match load_records(&cli.input) {
        Ok(records) => records,
        Err(e) => {
            log::error!("[FAIL] Failed to load input data: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let pipeline = match load_config(&cli).and_then(ExtractionPipeline::new) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            log::error!("[FAIL] Failed to initialise pipeline: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let driver = BatchDriver::new(pipeline, &cli.raw_root).with_limit(cli.limit);
    let report = driver.run(records);

    if let Err(e) = report.write_outputs(&cli.output_dir) {
        log::error!("[FAIL] Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    report.log_summary();
    ExitCode::SUCCESS
}
