use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Text that should replace the current query
    Query {
        text: String,
        source: TextSource,
    },
    UiEvent(UiEvent),
    ShowResults {
        rows: Vec<DisplayRow>,
        /// Matches before truncation to `rows`
        total: usize,
        relayout: bool,
    },
    Status(String),
    BackendReady,
}

/// Where a query came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Typed,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Select a row by its position in the visible rows
    Select(usize),
    Speak,
    AddWord,
    SetMode(MatchMode),
    SetSource(InputSource),
    Close,
}

/// The one input that feeds the debounce scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Typed,
    #[default]
    ClipboardSelection,
}

impl InputSource {
    pub fn accepts(self, source: TextSource) -> bool {
        matches!(
            (self, source),
            (InputSource::Typed, TextSource::Typed)
                | (InputSource::ClipboardSelection, TextSource::Clipboard)
        )
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Typed => f.write_str("typed"),
            InputSource::ClipboardSelection => f.write_str("clipboard"),
        }
    }
}

impl FromStr for InputSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typed" | "type" | "keyboard" => Ok(InputSource::Typed),
            "clipboard" | "selection" | "clipboard_selection" => {
                Ok(InputSource::ClipboardSelection)
            }
            other => Err(format!("unknown input source: {other}")),
        }
    }
}

/// How a query is compared against headwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    StartsWith,
    Contains,
    Exact,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::StartsWith => f.write_str("starts"),
            MatchMode::Contains => f.write_str("contains"),
            MatchMode::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starts" | "starts_with" | "prefix" => Ok(MatchMode::StartsWith),
            "contains" | "substring" => Ok(MatchMode::Contains),
            "exact" => Ok(MatchMode::Exact),
            other => Err(format!("unknown match mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub headword: String,
    pub translation: String,
}

/// Window position and size stored in profiles, carried through unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 480,
            height: 640,
        }
    }
}
