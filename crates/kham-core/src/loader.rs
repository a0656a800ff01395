use std::io;
use std::path::Path;

use crate::dictionary::{Dictionary, DictionaryRow, LoadError};

pub const DEFAULT_WRAP_WIDTH: usize = 64;

const EMBEDDED: &str = include_str!("../data/thai_english.tsv");

/// Outcome of parsing a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub rows: usize,
    /// Non-blank lines without a tab
    pub skipped: usize,
}

/// Parses `headword \t phonetic \t translation` lines
#[derive(Debug, Clone, Copy)]
pub struct DictionaryLoader {
    wrap_width: usize,
}

impl Default for DictionaryLoader {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl DictionaryLoader {
    /// `wrap_width` of 0 disables translation wrapping
    pub fn new(wrap_width: usize) -> Self {
        Self { wrap_width }
    }

    /// Load the word list compiled into the binary
    pub fn load_embedded(&self) -> Result<Dictionary, LoadError> {
        tracing::info!("Loading embedded dictionary...");
        self.load(EMBEDDED)
    }

    pub fn load_from_file(&self, path: &Path) -> Result<Dictionary, LoadError> {
        tracing::info!("Loading dictionary from file: {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound(path.display().to_string()),
            _ => LoadError::IoError(e),
        })?;
        self.load(&source)
    }

    /// Parse a source, failing when it yields no rows
    pub fn load(&self, source: &str) -> Result<Dictionary, LoadError> {
        let (dictionary, report) = self.parse(source);

        if report.skipped > 0 {
            tracing::warn!("Skipped {} malformed dictionary lines", report.skipped);
        }
        if dictionary.is_empty() {
            return Err(LoadError::Empty);
        }

        tracing::info!("Loaded {} dictionary entries", report.rows);
        Ok(dictionary)
    }

    pub fn parse(&self, source: &str) -> (Dictionary, LoadReport) {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut rows = Vec::new();
        let mut report = LoadReport::default();

        for (number, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let Some((headword, translation)) = split_row(line) else {
                tracing::debug!("Line {}: no tab separator, skipping", number + 1);
                report.skipped += 1;
                continue;
            };

            rows.push(DictionaryRow::wrapped(headword, translation, self.wrap_width));
        }

        report.rows = rows.len();
        (Dictionary::from_rows(rows), report)
    }
}

/// Load `source` with the default wrap width
pub fn load(source: &str) -> Result<Dictionary, LoadError> {
    DictionaryLoader::default().load(source)
}

/// First and last tab-separated fields, `None` without a tab
fn split_row(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split('\t');
    let headword = fields.next()?;
    let translation = fields.last()?;
    Some((headword, translation))
}

fn is_boundary(c: char) -> bool {
    c == ' ' || c == ';'
}

/// Break `text` into lines of roughly `width` characters.
///
/// Each break goes at the first space or semicolon at least `width` characters into the
/// current line. A semicolon keeps its place and the break follows it; a space becomes
/// the break. Scanning stops at the first line with no boundary left.
///
/// A space replaced right after a semicolon cannot be told apart from a semicolon break,
/// so [`unwrap_translation`] is lossy there. Rows keep their source text for that reason.
pub fn wrap_translation(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    let mut line_start = 0;

    while chars.len() - line_start > width {
        let Some(at) = (line_start + width..chars.len()).find(|&i| is_boundary(chars[i])) else {
            break;
        };

        if chars[at] == ';' {
            chars.insert(at + 1, '\n');
            line_start = at + 2;
        } else {
            chars[at] = '\n';
            line_start = at + 1;
        }
    }

    chars.into_iter().collect()
}

/// Revert [`wrap_translation`]: a break after `;` is dropped, any other becomes a space
pub fn unwrap_translation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;

    for c in text.chars() {
        if c == '\n' {
            if prev != Some(';') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}
