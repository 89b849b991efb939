use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::sheet::{InputConfig, OutputConfig, parse_delimiter};

pub mod api;
pub mod sheet;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Build config from process environment, falling back to defaults
    pub fn new() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary variable source
    pub fn from_env_with<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let base_url = var("KANJI_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api.base_url);

        let timeout_seconds = var("TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.api.timeout_seconds); // 30 seconds default

        let fetch_examples = var("FETCH_EXAMPLES")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.api.fetch_examples);

        let examples_limit = var("EXAMPLES_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.api.examples_limit);

        let input_delimiter = var("INPUT_DELIMITER")
            .and_then(|v| parse_delimiter(&v))
            .unwrap_or(defaults.input.delimiter);

        let output_path = var("OUTPUT_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output.path);

        let output_delimiter = var("OUTPUT_DELIMITER")
            .and_then(|v| parse_delimiter(&v))
            .unwrap_or(defaults.output.delimiter);

        Config {
            api: ApiConfig {
                base_url,
                timeout_seconds,
                fetch_examples,
                examples_limit,
            },
            input: InputConfig {
                delimiter: input_delimiter,
            },
            output: OutputConfig {
                path: output_path,
                delimiter: output_delimiter,
            },
        }
    }

    /// Check values that serde cannot reject on its own. The API base URL
    /// is checked when the client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.input.delimiter_byte()?;
        self.output.delimiter_byte()?;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
