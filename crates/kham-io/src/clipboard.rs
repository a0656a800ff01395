use std::time::Duration;

use arboard::Clipboard;
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Source of the currently selected text
pub trait ClipboardReader {
    /// `None` when nothing textual is selected
    fn read_selection(&mut self) -> Result<Option<String>, ClipboardError>;
}

/// The desktop clipboard. Reads the primary selection on Linux, the regular clipboard
/// elsewhere.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            clipboard: Clipboard::new()?,
        })
    }
}

impl ClipboardReader for SystemClipboard {
    fn read_selection(&mut self) -> Result<Option<String>, ClipboardError> {
        #[cfg(target_os = "linux")]
        let text = {
            use arboard::{GetExtLinux, LinuxClipboardKind};
            self.clipboard
                .get()
                .clipboard(LinuxClipboardKind::Primary)
                .text()
        };
        #[cfg(not(target_os = "linux"))]
        let text = self.clipboard.get_text();

        match text {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reports selection changes
pub struct SelectionWatcher<R> {
    reader: R,
    last_text: String,
}

impl<R: ClipboardReader> SelectionWatcher<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            last_text: String::new(),
        }
    }

    /// Remember the current selection so it is not reported as a change
    pub fn prime(&mut self) {
        if let Ok(Some(text)) = self.reader.read_selection() {
            self.last_text = text;
        }
    }

    /// New, non-empty selection since the last call
    pub fn poll(&mut self) -> Option<String> {
        match self.reader.read_selection() {
            Ok(Some(text)) if !text.trim().is_empty() && text != self.last_text => {
                self.last_text = text.clone();
                Some(text)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Clipboard read failed: {}", e);
                None
            }
        }
    }

    /// Poll until cancelled. Blocks the calling thread.
    pub fn run<F>(mut self, interval: Duration, cancel: &CancellationToken, mut on_text: F)
    where
        F: FnMut(String),
    {
        self.prime();

        while !cancel.is_cancelled() {
            if let Some(text) = self.poll() {
                on_text(text);
            }
            std::thread::sleep(interval);
        }

        tracing::info!("Clipboard watcher stopping");
    }
}
