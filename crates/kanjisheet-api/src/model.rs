use serde::Deserialize;

/// `/kanji/{kanji}` response. Only the fields we merge are required.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct KanjiEntry {
    pub meanings: Vec<String>,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
}

/// One element of the `/words/{kanji}` response array
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    #[serde(default)]
    pub variants: Vec<WordVariant>,
    #[serde(default)]
    pub meanings: Vec<WordMeaning>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WordVariant {
    pub written: String,
    pub pronounced: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WordMeaning {
    #[serde(default)]
    pub glosses: Vec<String>,
}

impl WordEntry {
    /// `written (pronounced): gloss, gloss` from the first variant and meaning
    pub fn example(&self) -> Option<String> {
        let variant = self.variants.first()?;
        let meaning = self.meanings.first()?;

        Some(format!(
            "{} ({}): {}",
            variant.written,
            variant.pronounced,
            meaning.glosses.join(", ")
        ))
    }
}

/// Render up to `limit` words into a single `examples` cell
pub fn format_examples(words: &[WordEntry], limit: usize) -> String {
    words
        .iter()
        .take(limit)
        .filter_map(WordEntry::example)
        .collect::<Vec<_>>()
        .join(", ")
}
