use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column holding the lookup key in the input sheet
pub const KEY_COLUMN: &str = "kanji";

/// Output header, in write order
pub const OUTPUT_COLUMNS: [&str; 5] = ["kanji", "meaning", "ja_on", "ja_kun", "examples"];

/// Separator used when joining glosses and readings into a single cell
pub const LIST_SEPARATOR: &str = ", ";

/// One data row of the input sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// 1-based data row number (header excluded)
    pub line: u64,
    pub kanji: String,
    /// Every column of the row keyed by header name, `kanji` included
    pub columns: BTreeMap<String, String>,
}

impl InputRecord {
    pub fn new(line: u64, kanji: impl Into<String>) -> Self {
        let kanji = kanji.into();
        let mut columns = BTreeMap::new();
        columns.insert(KEY_COLUMN.to_string(), kanji.clone());

        Self {
            line,
            kanji,
            columns,
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }
}

/// Merged dictionary data for one kanji
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub kanji: String,
    pub meaning: String,
    pub ja_on: String,
    pub ja_kun: String,
    pub examples: String,
}

impl LookupResult {
    pub fn new(
        kanji: impl Into<String>,
        meanings: &[String],
        on_readings: &[String],
        kun_readings: &[String],
    ) -> Self {
        Self {
            kanji: kanji.into(),
            meaning: meanings.join(LIST_SEPARATOR),
            ja_on: on_readings.join(LIST_SEPARATOR),
            ja_kun: kun_readings.join(LIST_SEPARATOR),
            examples: String::new(),
        }
    }

    pub fn with_examples(mut self, examples: String) -> Self {
        self.examples = examples;
        self
    }
}

/// One row of the output sheet. Field order is the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub kanji: String,
    pub meaning: String,
    pub ja_on: String,
    pub ja_kun: String,
    pub examples: String,
}

impl From<LookupResult> for OutputRecord {
    fn from(result: LookupResult) -> Self {
        Self {
            kanji: result.kanji,
            meaning: result.meaning,
            ja_on: result.ja_on,
            ja_kun: result.ja_kun,
            examples: result.examples,
        }
    }
}
