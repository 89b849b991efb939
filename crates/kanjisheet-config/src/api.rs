use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://kanjiapi.dev/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_fetch_examples() -> bool {
    false
}

fn default_examples_limit() -> usize {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the dictionary API, without the `kanji`/`words` segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout, 0 disables it
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Also query the words endpoint and fill the `examples` column
    #[serde(default = "default_fetch_examples")]
    pub fetch_examples: bool,
    /// Max words rendered into `examples`
    #[serde(default = "default_examples_limit")]
    pub examples_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            fetch_examples: default_fetch_examples(),
            examples_limit: default_examples_limit(),
        }
    }
}
