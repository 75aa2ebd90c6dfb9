//! Main entry point for the recorder binary
//!
//! Runs next to a test runner and serves its hooks over stdin/stdout.
//! Configuration comes from `RECORDER_*` variables (a `.env` file is loaded
//! first) and is overridden by command line flags.

use clap::Parser;
use tokio::io::BufReader;
use tokio::signal;

use recorder::config::RecorderConfigBuilder;
use recorder::core::naming::render_template;
use recorder::{host, RealFileSystem, Recorder, RecorderError};
use shared::{logging, process_debug, ProcessId};

/// Captures browser logs and network archives into one record per test attempt
#[derive(Parser)]
#[command(name = "recorder")]
#[command(about = "Serves test-runner hooks and writes one execution record per test attempt")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory execution records are written to (defaults to ./dump)
    #[arg(long)]
    pub target_dir: Option<String>,

    /// Directory the network-capture plugin stages archives in
    #[arg(long)]
    pub staging_dir: Option<String>,

    /// Only write records for failed test attempts
    #[arg(long)]
    pub failed_only: bool,

    /// JSON value copied into every record as `pluginMeta`
    #[arg(long)]
    pub plugin_meta: Option<String>,

    /// Record name pattern using {spec}, {test} and {retry}
    #[arg(long)]
    pub filename_template: Option<String>,
}

impl Args {
    fn apply(self, mut builder: RecorderConfigBuilder) -> Result<RecorderConfigBuilder, RecorderError> {
        if let Some(dir) = self.target_dir {
            builder = builder.target_directory(dir);
        }
        if let Some(dir) = self.staging_dir {
            builder = builder.staging_dir(dir);
        }
        if self.failed_only {
            builder = builder.failed_tests_only(true);
        }
        if let Some(raw) = self.plugin_meta {
            let meta = serde_json::from_str(&raw)
                .map_err(|e| RecorderError::config(format!("--plugin-meta is not valid JSON: {e}")))?;
            builder = builder.plugin_meta(meta);
        }
        if let Some(template) = self.filename_template {
            builder = builder.filename_fn(move |meta| render_template(&template, meta));
        }
        Ok(builder)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Initialize process ID singleton for the recorder
    ProcessId::init_recorder();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "recorder host adapter");

    let config = args
        .apply(RecorderConfigBuilder::new().from_env()?)?
        .callback(|path, record| {
            logging::log_progress(
                ProcessId::current(),
                "Record written",
                &format!("{} -> {}", record.meta.test_title(), path.display()),
            );
            Ok(())
        })
        .build()?;
    process_debug!(ProcessId::current(), "Configuration: {:?}", config);

    let mut recorder = Recorder::new(RealFileSystem::new(), config);
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    let served = tokio::select! {
        result = host::serve(&mut recorder, reader, writer) => Some(result),
        _ = signal::ctrl_c() => None,
    };

    match served {
        Some(result) => {
            let summary = result?;
            logging::log_success(
                ProcessId::current(),
                &format!(
                    "Served {} events: {} log entries, {} records, {} failures",
                    summary.events, summary.logs, summary.records_written, summary.failures
                ),
            );
        }
        None => {
            logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");
            if let Err(e) = recorder.on_run_end().await {
                logging::log_error(ProcessId::current(), "Cleanup", &e);
            }
        }
    }

    Ok(())
}
