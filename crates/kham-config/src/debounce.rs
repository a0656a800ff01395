use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_quiet_period_ms() -> u64 {
    50
}

fn default_relayout_min_chars() -> usize {
    2
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DebounceConfig {
    /// Delay after the last keystroke or selection change before filtering
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    /// Queries shorter than this skip the column relayout
    #[serde(default = "default_relayout_min_chars")]
    pub relayout_min_chars: usize,
}

impl DebounceConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
            relayout_min_chars: default_relayout_min_chars(),
        }
    }
}
