use kanal::AsyncReceiver;
use kham_types::{AppEvent, UiEvent};

use crate::presenter::Presenter;

/// Render everything the backend sends until the channel closes
pub async fn ui_loop<P: Presenter>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    mut presenter: P,
) -> anyhow::Result<()> {
    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::ShowResults {
                rows,
                total,
                relayout,
            } => {
                tracing::debug!("[UI] Showing {} of {} rows", rows.len(), total);
                presenter.show(&rows, total, relayout)?;
            }
            AppEvent::Status(message) => presenter.status(&message)?,
            AppEvent::BackendReady => {
                presenter.status("ready, type a word or :quit")?;
            }
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::debug!("[UI] Backend closed");
                return Ok(());
            }
            _ => {}
        }
    }

    tracing::debug!("[UI] Channel closed");
    Ok(())
}
