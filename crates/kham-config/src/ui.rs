use kham_types::{InputSource, MatchMode, WindowGeometry};
use serde::{Deserialize, Serialize};

fn default_max_rows() -> usize {
    20
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// Clipboard selection or typed queries
    pub input_source: InputSource,
    pub match_mode: MatchMode,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Not used by the terminal presenter. Kept so profiles shared with a windowed
    /// front end keep their window position across saves.
    pub geometry: WindowGeometry,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            input_source: InputSource::default(),
            match_mode: MatchMode::default(),
            max_rows: default_max_rows(),
            geometry: WindowGeometry::default(),
        }
    }
}
