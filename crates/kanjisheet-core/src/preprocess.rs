use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Turns a raw `kanji` cell into a lookup key: trim, NFKC, trim again.
    /// NFKC folds radicals and compatibility ideographs to plain kanji.
    fn process(&self, text: &str) -> String {
        let key: String = text.trim().nfkc().collect();
        key.trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
