use std::path::PathBuf;

use clap::Parser;
use kham_config::Config;
use kham_types::{InputSource, MatchMode};

#[derive(Parser, Debug)]
#[command(name = "kham", version, about = "Thai-English word lookup")]
pub struct Cli {
    /// Settings profile to load and save
    #[arg(long, default_value = "main")]
    pub profile: String,

    /// Tab-separated word list to use instead of the bundled one
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Where queries come from: typed or clipboard
    #[arg(long)]
    pub source: Option<InputSource>,

    /// Headword matching: starts, contains or exact
    #[arg(long)]
    pub mode: Option<MatchMode>,

    /// Log as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Flags win over the stored profile
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.dictionary {
            config.dictionary.path = Some(path.display().to_string());
        }
        if let Some(source) = self.source {
            config.ui.input_source = source;
        }
        if let Some(mode) = self.mode {
            config.ui.match_mode = mode;
        }
    }
}
