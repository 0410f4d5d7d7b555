//! Normalize a single document and print the result as JSON.
//!
//! Usage:
//!   docnorm-extract report.pdf
//!   docnorm-extract notes.txt --stopwords stopwords.txt

use clap::Parser;
use docnorm::{Extraction, ExtractionConfig, ExtractionPipeline};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "docnorm-extract")]
#[command(version, about = "Normalize one document and print it as JSON")]
struct Cli {
    /// Document to normalize
    path: PathBuf,

    /// Extraction configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra stopword list, one term per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
}

fn run(cli: &Cli) -> docnorm::Result<Extraction> {
    let mut config = match &cli.config {
        Some(path) => ExtractionConfig::from_json_file(path)?,
        None => ExtractionConfig::default(),
    };
    if let Some(stopwords) = &cli.stopwords {
        config = config.with_stopwords_path(stopwords);
    }
    ExtractionPipeline::new(config)?.run_path(&cli.path)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(Extraction::Normalized(document)) => match serde_json::to_string_pretty(&document) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            },
        },
        Ok(Extraction::Empty) => {
            eprintln!("{}: extraction returned empty content", cli.path.display());
            ExitCode::from(2)
        },
        Err(e) => {
            eprintln!("Error ({}): {}", e.kind(), e);
            ExitCode::FAILURE
        },
    }
}
