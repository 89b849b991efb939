mod client;
mod model;

pub use client::KanjiApiClient;
pub use model::{KanjiEntry, WordEntry, WordMeaning, WordVariant, format_examples};
pub use reqwest::StatusCode;

/// Dictionary lookup interface
#[async_trait::async_trait]
pub trait KanjiLookup: Send + Sync {
    /// Look up meanings and readings of a single kanji
    async fn lookup_kanji(&self, kanji: &str) -> Result<KanjiEntry, LookupError>;

    /// Look up words written with the kanji
    async fn lookup_words(&self, kanji: &str) -> Result<Vec<WordEntry>, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Lookup failed for {kanji}: HTTP {status}")]
    LookupFailed {
        kanji: String,
        status: reqwest::StatusCode,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response for {kanji}: {source}")]
    InvalidResponse {
        kanji: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Empty lookup key")]
    EmptyKey,
}

impl LookupError {
    /// HTTP status, when the service answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            LookupError::LookupFailed { status, .. } => Some(*status),
            LookupError::NetworkError(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
