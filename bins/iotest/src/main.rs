mod config;
mod engine;
mod evaluator;
mod executor;
mod report;


use anyhow::Result;
use clap::Parser;
use config::{CliOverrides, ReportFormat, RunConfig};
use report::Reporter;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "iotest")]
#[command(about = "Run a program against stdin/stdout test cases described in a text file", long_about = None)]
struct Cli {
    /// Program under test; started once per test case with no arguments
    program_path: PathBuf,

    /// Text file with one `... Output: <expected>` line per test case
    tests_path: PathBuf,

    /// Report format (env: IOTEST_FORMAT)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Keep the first field value of each line instead of treating it as a header
    #[arg(long)]
    keep_first_value: bool,

    /// Exit with status 1 when any test fails
    #[arg(long)]
    fail_on_mismatch: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::load(
        cli.program_path,
        cli.tests_path,
        CliOverrides {
            format: cli.format,
            keep_first_value: cli.keep_first_value,
            fail_on_mismatch: cli.fail_on_mismatch,
        },
    )?;

    info!(
        program = %config.program.display(),
        tests_path = %config.tests_path.display(),
        format = %config.format,
        "iotest starting"
    );

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(config.format, stdout.lock());

    let report = executor::execute_suite(&config, &mut reporter)
        .await
        .map_err(|e| {
            error!("{:#}", e);
            e
        })?;

    if config.fail_on_mismatch && !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
