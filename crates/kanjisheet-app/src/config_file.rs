use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use kanjisheet_config::Config;

/// Load a JSON config file; fields it leaves out take their defaults
fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("cannot open config {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Config from `path` when given, otherwise from the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config_file(path),
        None => Ok(Config::new()),
    }
}
