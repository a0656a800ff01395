use std::env;

use serde::{Deserialize, Serialize};

use self::clipboard::ClipboardConfig;
use self::debounce::DebounceConfig;
use self::dictionary::DictionaryConfig;
use self::speech::SpeechConfig;
use self::ui::UiConfig;
use self::wordlist::WordListConfig;

pub mod clipboard;
pub mod debounce;
pub mod dictionary;
pub mod speech;
pub mod ui;
pub mod wordlist;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub debounce: DebounceConfig,
    pub ui: UiConfig,
    pub clipboard: ClipboardConfig,
    pub speech: SpeechConfig,
    pub wordlist: WordListConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Apply `KHAM_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("KHAM_DICTIONARY").filter(|p| !p.is_empty()) {
            self.dictionary.path = Some(path);
        }

        if let Some(ms) = lookup("KHAM_QUIET_PERIOD_MS").and_then(|v| v.parse().ok()) {
            self.debounce.quiet_period_ms = ms;
        }

        if let Some(url) = lookup("KHAM_TTS_URL") {
            self.speech.url = url;
        }

        if let Some(player) = lookup("KHAM_PLAYER") {
            let parts: Vec<String> = player.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                self.speech.player = parts;
            }
        }

        if let Some(path) = lookup("KHAM_WORDLIST").filter(|p| !p.is_empty()) {
            self.wordlist.path = Some(path);
        }
    }
}
