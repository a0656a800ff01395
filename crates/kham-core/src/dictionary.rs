use std::slice;

use kham_types::DisplayRow;

use crate::loader::wrap_translation;

/// One entry of the word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRow {
    headword: String,
    translation: String,
    source: String,
}

impl DictionaryRow {
    /// Row shown exactly as given
    pub fn new(headword: impl Into<String>, translation: impl Into<String>) -> Self {
        let translation = translation.into();
        Self {
            headword: headword.into(),
            source: translation.clone(),
            translation,
        }
    }

    /// Row whose display translation is wrapped at `width` characters
    pub fn wrapped(headword: impl Into<String>, translation: &str, width: usize) -> Self {
        Self {
            headword: headword.into(),
            translation: wrap_translation(translation, width),
            source: translation.to_string(),
        }
    }

    /// Lookup term
    pub fn headword(&self) -> &str {
        &self.headword
    }

    /// Display text, may contain inserted line breaks
    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Translation as it appeared in the source, without display line breaks
    pub fn plain_translation(&self) -> &str {
        &self.source
    }

    pub fn to_display(&self) -> DisplayRow {
        DisplayRow {
            headword: self.headword.clone(),
            translation: self.translation.clone(),
        }
    }
}

/// Rows in source order. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    rows: Vec<DictionaryRow>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<DictionaryRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DictionaryRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[DictionaryRow] {
        &self.rows
    }

    pub fn iter(&self) -> slice::Iter<'_, DictionaryRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryRow;
    type IntoIter = slice::Iter<'a, DictionaryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Dictionary source is empty")]
    Empty,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
