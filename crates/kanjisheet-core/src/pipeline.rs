use kanjisheet_api::{KanjiLookup, LookupError, StatusCode, format_examples};
use kanjisheet_types::{InputRecord, LookupResult, OutputRecord};

use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::state::RunStage;

/// A record left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLookup {
    pub line: u64,
    pub kanji: String,
    /// HTTP status, when the service answered
    pub status: Option<StatusCode>,
    pub reason: String,
}

/// Output of one pass over the input
#[derive(Debug, Default)]
pub struct Enriched {
    pub records: Vec<OutputRecord>,
    pub failed: Vec<FailedLookup>,
}

/// Sequential fetch-merge loop over input records
pub struct EnrichmentPipeline<L> {
    lookup: L,
    examples_limit: Option<usize>,
}

impl<L: KanjiLookup> EnrichmentPipeline<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            examples_limit: None,
        }
    }

    /// Fill `examples` from the words endpoint, keeping at most `limit` words
    pub fn with_examples(mut self, limit: usize) -> Self {
        self.examples_limit = Some(limit);
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Look up one record. The result keeps the record's `kanji` as read.
    pub async fn enrich(&self, record: &InputRecord) -> Result<LookupResult, LookupError> {
        let key = DefaultPreprocessor.process(&record.kanji);
        if key.is_empty() {
            return Err(LookupError::EmptyKey);
        }

        tracing::info!("Fetching data for kanji: {}", key);
        let entry = self.lookup.lookup_kanji(&key).await?;

        let mut result = LookupResult::new(
            record.kanji.clone(),
            &entry.meanings,
            &entry.on_readings,
            &entry.kun_readings,
        );

        if let Some(limit) = self.examples_limit {
            result.examples = self.examples(&key, limit).await;
        }

        Ok(result)
    }

    async fn examples(&self, key: &str, limit: usize) -> String {
        tracing::info!("Fetching examples for kanji: {}", key);

        match self.lookup.lookup_words(key).await {
            Ok(words) => format_examples(&words, limit),
            Err(e) => {
                tracing::warn!("Failed to fetch example data for {}: {}", key, e);
                String::new()
            }
        }
    }

    /// One lookup at a time, in input order. Failed lookups are dropped.
    pub async fn run(&self, records: &[InputRecord]) -> Enriched {
        let mut enriched = Enriched::default();

        for record in records {
            RunStage::Fetching.enter();
            let outcome = self.enrich(record).await;

            RunStage::Merging.enter();
            match outcome {
                Ok(result) => {
                    tracing::info!("Fetched data for kanji: {}", result.kanji);
                    tracing::debug!("{:?}", result);
                    enriched.records.push(OutputRecord::from(result));
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to fetch kanji data for {:?} (row {}): {}",
                        record.kanji,
                        record.line,
                        e
                    );
                    enriched.failed.push(FailedLookup {
                        line: record.line,
                        kanji: record.kanji.clone(),
                        status: e.status(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        enriched
    }
}
