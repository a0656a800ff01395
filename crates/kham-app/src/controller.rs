use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kham_config::Config;
use kham_core::{LookupSession, SessionOptions};
use kham_io::{RemoteTts, Speaker, WordList};
use kham_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::EventLoop;
use crate::io::{spawn_stdin_reader, watcher_io};
use crate::lookup_context::LookupContext;
use crate::presenter::ConsolePresenter;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(256), // clipboard and typing bursts
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let config = self.state.config.read().await.clone();
        let mut tasks = JoinSet::new();

        // Event loop
        let event_loop = build_event_loop(
            self.state.clone(),
            &config,
            self.channels.app_to_ui.0.clone(),
        );
        tasks.spawn(event_loop.run(
            self.channels.ui_to_app.1.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            ConsolePresenter::stdout(),
        ));

        // Input
        spawn_stdin_reader(self.channels.ui_to_app.0.clone())?;
        tasks.spawn(watcher_io(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

pub fn build_event_loop(
    state: Arc<AppState>,
    config: &Config,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> EventLoop {
    let session = LookupSession::new(
        state.dictionary.clone(),
        SessionOptions {
            quiet_period: config.debounce.quiet_period(),
            mode: config.ui.match_mode,
            relayout_min_chars: config.debounce.relayout_min_chars,
        },
    );

    let speaker = config.speech.enabled.then(|| {
        Arc::new(RemoteTts::new(
            config.speech.url.clone(),
            config.speech.voice.clone(),
            config.speech.player.clone(),
        )) as Arc<dyn Speaker>
    });

    let ctx = LookupContext::new(state, app_to_ui_tx, speaker, wordlist(config));
    EventLoop::new(session, config.ui.input_source, config.ui.max_rows, ctx)
}

fn wordlist(config: &Config) -> Option<WordList> {
    let path = match &config.wordlist.path {
        Some(path) => PathBuf::from(path),
        None => match WordList::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Word list disabled: {}", e);
                return None;
            }
        },
    };
    tracing::info!("Word list at {}", path.display());
    Some(WordList::new(path))
}
