use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct WordListConfig {
    /// Saved-word file, defaults to the user data directory
    pub path: Option<String>,
}
