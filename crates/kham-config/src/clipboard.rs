use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_poll_interval_ms() -> u64 {
    250
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClipboardConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl ClipboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
