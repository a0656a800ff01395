use std::path::Path;
use std::sync::Arc;

use kham_config::Config;
use kham_config::dictionary::DictionaryConfig;
use kham_core::{Dictionary, DictionaryLoader};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub dictionary: Arc<Dictionary>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let dictionary = load_dictionary(&config.dictionary);
        Self::with_dictionary(config, dictionary)
    }

    pub fn with_dictionary(config: Config, dictionary: Dictionary) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            dictionary: Arc::new(dictionary),
        }
    }
}

/// Load the configured or bundled word list, empty on failure
pub fn load_dictionary(config: &DictionaryConfig) -> Dictionary {
    let loader = DictionaryLoader::new(config.wrap_width);

    let result = match &config.path {
        Some(path) => loader.load_from_file(Path::new(path)),
        None => loader.load_embedded(),
    };

    result.unwrap_or_else(|e| {
        tracing::error!("Failed to load dictionary: {}", e);
        tracing::warn!("Starting with empty dictionary");
        Dictionary::empty()
    })
}
