use std::path::{Path, PathBuf};

use kanjisheet_api::KanjiLookup;
use kanjisheet_config::Config;

pub mod error;
pub mod pipeline;
pub mod preprocess;
pub mod reader;
pub mod state;
pub mod writer;

pub use error::RunError;
pub use pipeline::{EnrichmentPipeline, Enriched, FailedLookup};
pub use state::RunStage;

/// Settings for one run, resolved from [`Config`]
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_delimiter: u8,
    pub output_path: PathBuf,
    pub output_delimiter: u8,
    /// `Some(limit)` when example words are fetched
    pub examples_limit: Option<usize>,
}

impl RunOptions {
    pub fn from_config(config: &Config) -> Result<Self, RunError> {
        config.validate()?;

        Ok(Self {
            input_delimiter: config.input.delimiter_byte()?,
            output_path: config.output.path.clone(),
            output_delimiter: config.output.delimiter_byte()?,
            examples_limit: config
                .api
                .fetch_examples
                .then_some(config.api.examples_limit),
        })
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input_delimiter: b',',
            output_path: PathBuf::from("tmp.csv"),
            output_delimiter: b'\t',
            examples_limit: None,
        }
    }
}

/// What a finished run did
#[derive(Debug)]
pub struct RunReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rows_read: usize,
    pub enriched: usize,
    pub failed: Vec<FailedLookup>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Read `input`, enrich every row through `lookup` and write the output sheet.
///
/// Lookup failures are dropped from the output and listed in the report.
pub async fn run<L>(
    input: Option<&Path>,
    options: &RunOptions,
    lookup: L,
) -> Result<RunReport, RunError>
where
    L: KanjiLookup,
{
    let result = run_stages(input, options, lookup).await;
    if let Err(e) = &result {
        RunStage::Aborted.enter();
        tracing::debug!("run aborted while {}: {}", e.stage(), e);
    }
    result
}

async fn run_stages<L>(
    input: Option<&Path>,
    options: &RunOptions,
    lookup: L,
) -> Result<RunReport, RunError>
where
    L: KanjiLookup,
{
    RunStage::Start.enter();
    let input = input.ok_or(RunError::MissingArgument)?;
    let input_path = std::path::absolute(input).map_err(|e| RunError::Read {
        path: input.to_path_buf(),
        source: reader::ReadError::Open(e.into()),
    })?;

    RunStage::Reading.enter();
    tracing::info!("Reading {}", input_path.display());
    let read = {
        let path = input_path.clone();
        let delimiter = options.input_delimiter;
        tokio::task::spawn_blocking(move || reader::read_records(&path, delimiter)).await?
    };
    let records = read.map_err(|source| RunError::Read {
        path: input_path.clone(),
        source,
    })?;

    let mut pipeline = EnrichmentPipeline::new(lookup);
    if let Some(limit) = options.examples_limit {
        pipeline = pipeline.with_examples(limit);
    }
    let enriched = pipeline.run(&records).await;

    RunStage::Writing.enter();
    let output_path = options.output_path.clone();
    let enriched_count = enriched.records.len();
    let written = {
        let path = output_path.clone();
        let delimiter = options.output_delimiter;
        let records = enriched.records;
        tokio::task::spawn_blocking(move || writer::write_output(&path, &records, delimiter))
            .await?
    };
    written.map_err(|source| RunError::Write {
        path: output_path.clone(),
        source,
    })?;

    RunStage::Done.enter();
    tracing::info!("Done writing.");

    Ok(RunReport {
        input_path,
        output_path,
        rows_read: records.len(),
        enriched: enriched_count,
        failed: enriched.failed,
    })
}
