use std::sync::Arc;

use kanal::AsyncSender;
use kham_io::{Speaker, WordList};
use kham_types::AppEvent;

use crate::state::AppState;

/// Collaborators shared by the event handlers
#[derive(Clone)]
pub struct LookupContext {
    pub state: Arc<AppState>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub speaker: Option<Arc<dyn Speaker>>,
    pub wordlist: Option<WordList>,
}

impl LookupContext {
    pub fn new(
        state: Arc<AppState>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        speaker: Option<Arc<dyn Speaker>>,
        wordlist: Option<WordList>,
    ) -> Self {
        Self {
            state,
            app_to_ui_tx,
            speaker,
            wordlist,
        }
    }

    /// Show a status line, ignoring a closed UI
    pub async fn status(&self, message: impl Into<String>) {
        let _ = self.app_to_ui_tx.send(AppEvent::Status(message.into())).await;
    }
}
