use std::sync::Arc;

use kham_types::MatchMode;
use unicode_normalization::UnicodeNormalization;

use crate::dictionary::{Dictionary, DictionaryRow};

/// Query and mode of the last accepted filter pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub query: String,
    pub mode: MatchMode,
}

/// Comparison key for headwords and queries: NFC, lower case
pub fn normalize_key(text: &str) -> String {
    text.nfc().flat_map(char::to_lowercase).collect()
}

/// Whether a normalized headword `key` matches a normalized, non-empty `needle`
pub fn matches(key: &str, needle: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::StartsWith => key.starts_with(needle),
        MatchMode::Contains => key.contains(needle),
        MatchMode::Exact => key == needle,
    }
}

/// Filters a shared dictionary by headword.
///
/// Starts out showing every row. An empty query leaves the previous result in place.
pub struct FilterEngine {
    dictionary: Arc<Dictionary>,
    keys: Vec<String>,
    state: FilterState,
    visible: Vec<usize>,
    passes: u64,
}

impl FilterEngine {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        let keys = dictionary
            .iter()
            .map(|row| normalize_key(row.headword()))
            .collect();
        let visible = (0..dictionary.len()).collect();

        Self {
            dictionary,
            keys,
            state: FilterState::default(),
            visible,
            passes: 0,
        }
    }

    /// Re-filter for `query`. Returns `false`, changing nothing, when the query is empty.
    pub fn set_query(&mut self, query: &str, mode: MatchMode) -> bool {
        let needle = normalize_key(query);
        if needle.is_empty() {
            tracing::debug!("Empty query, keeping {} visible rows", self.visible.len());
            return false;
        }

        self.visible = self
            .keys
            .iter()
            .enumerate()
            .filter(|(_, key)| matches(key, &needle, mode))
            .map(|(index, _)| index)
            .collect();
        self.state = FilterState {
            query: query.to_string(),
            mode,
        };
        self.passes += 1;

        tracing::debug!(
            "Filter '{}' ({}): {} of {} rows",
            query,
            mode,
            self.visible.len(),
            self.keys.len()
        );
        true
    }

    /// Switch mode, re-running the current query if there is one
    pub fn set_mode(&mut self, mode: MatchMode) -> bool {
        if self.state.query.is_empty() {
            self.state.mode = mode;
            return false;
        }
        let query = self.state.query.clone();
        self.set_query(&query, mode)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Matching rows in dictionary order
    pub fn visible_rows(&self) -> impl Iterator<Item = &DictionaryRow> + '_ {
        self.visible
            .iter()
            .filter_map(|&index| self.dictionary.get(index))
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Row at `position` within the visible rows
    pub fn row(&self, position: usize) -> Option<&DictionaryRow> {
        self.visible
            .get(position)
            .and_then(|&index| self.dictionary.get(index))
    }

    /// Number of filter passes run so far
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(headwords: &[&str]) -> FilterEngine {
        let rows = headwords
            .iter()
            .map(|h| DictionaryRow::new(*h, format!("{h} translation")))
            .collect();
        FilterEngine::new(Arc::new(Dictionary::from_rows(rows)))
    }

    fn headwords(engine: &FilterEngine) -> Vec<&str> {
        engine.visible_rows().map(DictionaryRow::headword).collect()
    }

    #[test]
    fn starts_with_keeps_source_order() {
        let mut engine = engine(&["cat", "car", "dog"]);
        assert!(engine.set_query("ca", MatchMode::StartsWith));
        assert_eq!(headwords(&engine), ["cat", "car"]);
    }

    #[test]
    fn starts_out_unfiltered() {
        let engine = engine(&["cat", "car", "dog"]);
        assert_eq!(engine.visible_len(), 3);
        assert_eq!(engine.passes(), 0);
    }

    #[test]
    fn case_is_ignored() {
        let mut engine = engine(&["Cat", "catalog", "CAR", "scat"]);
        let mut results = Vec::new();
        for query in ["cat", "CAT", "Cat"] {
            engine.set_query(query, MatchMode::StartsWith);
            results.push(engine.visible_indices().to_vec());
        }
        assert_eq!(results[0], [0, 1]);
        assert!(results.iter().all(|r| *r == results[0]));
    }

    #[test]
    fn empty_query_keeps_previous_rows() {
        let mut engine = engine(&["cat", "car", "dog"]);
        engine.set_query("d", MatchMode::StartsWith);

        assert!(!engine.set_query("", MatchMode::StartsWith));
        assert_eq!(headwords(&engine), ["dog"]);
        assert_eq!(engine.state().query, "d");
        assert_eq!(engine.passes(), 1);
    }

    #[test]
    fn contains_and_exact_modes() {
        let mut engine = engine(&["cat", "scatter", "at", "dog"]);
        engine.set_query("at", MatchMode::Contains);
        assert_eq!(headwords(&engine), ["cat", "scatter", "at"]);

        engine.set_query("at", MatchMode::Exact);
        assert_eq!(headwords(&engine), ["at"]);
    }

    #[test]
    fn set_mode_reapplies_the_current_query() {
        let mut engine = engine(&["cat", "scat"]);
        assert!(!engine.set_mode(MatchMode::Contains));
        assert_eq!(engine.state().mode, MatchMode::Contains);

        engine.set_query("cat", MatchMode::StartsWith);
        assert_eq!(headwords(&engine), ["cat"]);
        assert!(engine.set_mode(MatchMode::Contains));
        assert_eq!(headwords(&engine), ["cat", "scat"]);
    }

    #[test]
    fn thai_headwords_match_by_prefix() {
        let mut engine = engine(&["กิน", "กินข้าว", "ข้าว"]);
        engine.set_query("กิน", MatchMode::StartsWith);
        assert_eq!(headwords(&engine), ["กิน", "กินข้าว"]);
    }

    #[test]
    fn row_indexes_visible_positions() {
        let mut engine = engine(&["cat", "car", "dog"]);
        engine.set_query("car", MatchMode::StartsWith);
        assert_eq!(engine.row(0).map(DictionaryRow::headword), Some("car"));
        assert!(engine.row(1).is_none());
    }

    #[test]
    fn empty_dictionary_returns_nothing() {
        let mut engine = FilterEngine::new(Arc::new(Dictionary::empty()));
        assert!(engine.set_query("a", MatchMode::Contains));
        assert_eq!(engine.visible_len(), 0);
    }
}
