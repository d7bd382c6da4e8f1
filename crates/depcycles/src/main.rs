//! Depcycles CLI binary.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use depcycles::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the depcycles CLI.
///
/// The search is synchronous; the runtime only drives input reading.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over -v flags, e.g. RUST_LOG=depcycles=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting depcycles");

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "depcycles failed");
            eprintln!("{}: {e}", "error".red().bold());
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let report = cli.execute().await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write report to stdout")?;

    tracing::debug!("Depcycles completed successfully");
    Ok(())
}
