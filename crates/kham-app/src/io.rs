use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncSender, Sender};
use kham_io::{ClipboardError, ClipboardReader, SelectionWatcher, SystemClipboard};
use kham_types::{AppEvent, TextSource, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::command::parse_line;
use crate::state::AppState;

/// Read terminal lines on a plain thread.
///
/// Not a tokio task: a pending stdin read would otherwise hold up runtime shutdown.
pub fn spawn_stdin_reader(event_tx: AsyncSender<AppEvent>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("kham-stdin".into())
        .spawn(move || forward_lines(std::io::stdin().lock(), &event_tx.to_sync()))?;
    Ok(())
}

/// Send every line as an event. End of input closes the app.
pub fn forward_lines<R: BufRead>(reader: R, tx: &Sender<AppEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if tx.send(parse_line(&line)).is_err() {
            return;
        }
    }

    tracing::debug!("stdin closed");
    let _ = tx.send(AppEvent::UiEvent(UiEvent::Close));
}

/// Clipboard selection watcher
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let poll_interval = {
        let config = state.config.read().await;
        config.clipboard.poll_interval()
    };

    watch_selection(SystemClipboard::new, poll_interval, cancel, event_tx).await
}

/// Forward selection changes as clipboard queries until cancelled.
///
/// A reader that cannot be opened is reported once, then the task idles until shutdown
/// so typed lookups keep working.
pub async fn watch_selection<R, F>(
    open: F,
    poll_interval: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: ClipboardReader + 'static,
    F: FnOnce() -> Result<R, ClipboardError> + Send + 'static,
{
    tracing::info!("Starting clipboard watcher");

    let tx = event_tx.to_sync();
    let watcher_cancel = cancel.clone();
    let watcher = tokio::task::spawn_blocking(move || {
        let reader = match open() {
            Ok(reader) => reader,
            Err(e) => {
                tracing::error!("Clipboard unavailable: {}", e);
                let _ = tx.send(AppEvent::Status(format!("clipboard unavailable: {e}")));
                return;
            }
        };

        SelectionWatcher::new(reader).run(poll_interval, &watcher_cancel, |text| {
            if let Err(e) = tx.send(AppEvent::Query {
                text,
                source: TextSource::Clipboard,
            }) {
                tracing::error!("Failed to send clipboard text to app: {}", e);
            }
        });
    });

    if let Err(e) = watcher.await {
        tracing::error!("Clipboard watcher panicked: {}", e);
    }

    cancel.cancelled().await;
    Ok(())
}
