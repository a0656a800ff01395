use serde::{Deserialize, Serialize};

fn default_wrap_width() -> usize {
    64
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Word list to load instead of the bundled one
    #[serde(default)]
    pub path: Option<String>,
    /// Translations longer than this many characters get line breaks, 0 disables wrapping
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: None,
            wrap_width: default_wrap_width(),
        }
    }
}
