// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use ectran::app_config::{Config, LogLevel, ProviderConfig};
use ectran::client::CompletionClient;
use ectran::pipeline::process_document;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Extract and translate Encumbrance Certificate transactions from raw
/// document text using an LLM completion service
#[derive(Parser, Debug)]
#[command(name = "ectran", version, about)]
struct Args {
    /// Input text file containing extracted document content
    #[arg(value_name = "INPUT_PATH", required_unless_present = "test_connection")]
    input_path: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "conf.json")]
    config: PathBuf,

    /// Write the resulting records to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run extraction only, skipping translation
    #[arg(long)]
    extract_only: bool,

    /// Verify the completion service is reachable, then exit
    #[arg(long)]
    test_connection: bool,

    /// Log level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger with timestamps and colored levels
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{color}{} {:5} {}\x1B[0m",
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };

    if let Some(cli_level) = args.log_level {
        config.log_level = cli_level.into();
    }
    CustomLogger::init(level_filter(&config.log_level))?;

    if let Err(e) = run(args, &config).await {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args, config: &Config) -> Result<()> {
    let provider_config: &ProviderConfig = &config.provider;
    let client = Arc::new(CompletionClient::new(provider_config)?);

    if args.test_connection {
        client.test_connection().await?;
        info!("Connection to completion service OK (model {})", provider_config.model);
        return Ok(());
    }

    let input_path = args.input_path.as_ref()
        .context("INPUT_PATH is required unless --test-connection is given")?;
    let raw_text = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file: {}", input_path.display()))?;

    info!(
        "Processing {} ({} bytes) with model {}",
        input_path.display(),
        raw_text.len(),
        provider_config.model
    );

    let records = if args.extract_only {
        ectran::extract_transactions(client.as_ref(), &raw_text).await?
    } else {
        process_document(client, &raw_text, config.pipeline.max_concurrent_batches).await?
    };

    let rendered = serde_json::to_string_pretty(&records)
        .context("Failed to render records as JSON")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote {} record(s) to {}", records.len(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
