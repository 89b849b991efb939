use std::path::PathBuf;

use clap::Parser;
use kanjisheet_config::Config;

/// Enrich a kanji spreadsheet with meanings and readings from kanjiapi.dev
#[derive(Debug, Parser)]
#[command(name = "kanjisheet", version)]
pub struct Cli {
    /// CSV file with a `kanji` column
    pub input: Option<PathBuf>,

    /// Where to write the tab-delimited result [default: tmp.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON config file, replaces environment settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also fill the `examples` column from the words endpoint
    #[arg(long)]
    pub examples: bool,
}

impl Cli {
    /// Flags win over config file and environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if self.examples {
            config.api.fetch_examples = true;
        }
    }
}
