use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Clipboard selections: trimmed, NFC, lines joined with a space
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let text: String = text.nfc().collect();

        text.split(['\n', '\r'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct SelectionPreprocessor;
impl Preprocessor for SelectionPreprocessor {}

/// Typed lines are taken as they are, minus the line terminator
pub struct TypedPreprocessor;
impl Preprocessor for TypedPreprocessor {
    fn process(&self, text: &str) -> String {
        text.trim_end_matches(['\n', '\r']).nfc().collect()
    }
}
