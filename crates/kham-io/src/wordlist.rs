use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("No user data directory available")]
    NoDataDir,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Added,
    AlreadyPresent,
}

/// Personal list of saved words, one `headword \t translation` per line.
///
/// Clones share one write lock, so appends through them never duplicate a headword.
#[derive(Debug, Clone)]
pub struct WordList {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl WordList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// `<data dir>/kham/wordlist.txt`
    pub fn default_path() -> Result<PathBuf, WordListError> {
        dirs::data_local_dir()
            .map(|dir| dir.join("kham").join("wordlist.txt"))
            .ok_or(WordListError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved entries, empty if the file does not exist yet
    pub async fn entries(&self) -> Result<Vec<(String, String)>, WordListError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once('\t') {
                Some((headword, translation)) => (headword.to_string(), translation.to_string()),
                None => (line.to_string(), String::new()),
            })
            .collect())
    }

    pub async fn contains(&self, headword: &str) -> Result<bool, WordListError> {
        Ok(self.entries().await?.iter().any(|(saved, _)| saved == headword))
    }

    /// Append unless the headword is already saved
    pub async fn append(
        &self,
        headword: &str,
        translation: &str,
    ) -> Result<AppendOutcome, WordListError> {
        // held across the check and the write
        let _guard = self.write_lock.lock().await;

        if self.contains(headword).await? {
            tracing::debug!("'{}' already in word list", headword);
            return Ok(AppendOutcome::AlreadyPresent);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let line = format!("{}\t{}\n", single_line(headword), single_line(translation));
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::info!("Added '{}' to {}", headword, self.path.display());
        Ok(AppendOutcome::Added)
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ")
}
