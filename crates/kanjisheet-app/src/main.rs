use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use kanjisheet_api::KanjiApiClient;
use kanjisheet_core::{RunError, RunOptions, RunReport};

pub mod cli;
pub mod config_file;
pub mod logging;

use self::cli::Cli;

/// Run finished, even if some rows were dropped
pub const EXIT_SUCCESS: u8 = 0;
/// Any fatal [`RunError`] or config failure
pub const EXIT_ERROR: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let result = run(&cli).await;
    report(&result);

    ExitCode::from(exit_status(&result))
}

pub async fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    let Some(input) = cli.input.as_deref() else {
        return Err(RunError::MissingArgument.into());
    };

    let mut config = config_file::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    let options = RunOptions::from_config(&config)?;
    let client = KanjiApiClient::new(&config.api).context("cannot set up API client")?;

    let report = kanjisheet_core::run(Some(input), &options, client).await?;
    Ok(report)
}

fn report(result: &anyhow::Result<RunReport>) {
    match result {
        Ok(report) => {
            for failed in &report.failed {
                match failed.status {
                    Some(status) => tracing::warn!(
                        "Row {} ({}) left out, HTTP {}",
                        failed.line,
                        failed.kanji,
                        status.as_u16()
                    ),
                    None => tracing::warn!(
                        "Row {} ({}) left out: {}",
                        failed.line,
                        failed.kanji,
                        failed.reason
                    ),
                }
            }
            tracing::info!(
                "Enriched {} of {} rows into {}",
                report.enriched,
                report.rows_read,
                report.output_path.display()
            );
        }
        Err(e) => {
            if let Some(run_error) = e.downcast_ref::<RunError>() {
                if matches!(run_error, RunError::MissingArgument) {
                    tracing::error!("Please provide a path to a CSV file as an argument");
                    return;
                }
                tracing::error!("Run aborted while {}", run_error.stage());
            }
            tracing::error!("{:#}", e);
        }
    }
}

/// Dropped rows never change the status
pub fn exit_status(result: &anyhow::Result<RunReport>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_ERROR,
    }
}
