use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_input_delimiter() -> char {
    ','
}

fn default_output_path() -> PathBuf {
    PathBuf::from("tmp.csv")
}

fn default_output_delimiter() -> char {
    '\t'
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    #[serde(default = "default_input_delimiter")]
    pub delimiter: char,
}

impl InputConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        delimiter_byte(self.delimiter)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_input_delimiter(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Relative paths resolve against the working directory
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_output_delimiter")]
    pub delimiter: char,
}

impl OutputConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        delimiter_byte(self.delimiter)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            delimiter: default_output_delimiter(),
        }
    }
}

/// csv only takes single-byte delimiters
fn delimiter_byte(delimiter: char) -> Result<u8, ConfigError> {
    if delimiter.is_ascii() && delimiter != '\n' && delimiter != '\r' && delimiter != '"' {
        Ok(delimiter as u8)
    } else {
        Err(ConfigError::InvalidDelimiter(delimiter))
    }
}

/// Parse a delimiter from an env value. Accepts a single character or the
/// names `tab`, `\t`, `comma`, `semicolon`, `pipe`.
pub fn parse_delimiter(value: &str) -> Option<char> {
    match value {
        "tab" | "\\t" | "\t" => Some('\t'),
        "comma" => Some(','),
        "semicolon" => Some(';'),
        "pipe" => Some('|'),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}
