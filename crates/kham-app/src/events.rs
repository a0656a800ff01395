use std::time::Instant;

use kanal::AsyncReceiver;
use kham_core::{Clock, LookupSession, Refresh, SystemClock};
use kham_types::{AppEvent, InputSource, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::lookup_context::LookupContext;

pub mod add_word;
pub mod query;
pub mod speak;

use add_word::handle_add_word;
use query::handle_query;
use speak::handle_speak;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the lookup session. All filtering happens on this task.
pub struct EventLoop<C: Clock = SystemClock> {
    session: LookupSession<C>,
    input_source: InputSource,
    selection: Option<usize>,
    max_rows: usize,
    ctx: LookupContext,
}

impl<C: Clock> EventLoop<C> {
    pub fn new(
        session: LookupSession<C>,
        input_source: InputSource,
        max_rows: usize,
        ctx: LookupContext,
    ) -> Self {
        Self {
            session,
            input_source,
            selection: None,
            max_rows,
            ctx,
        }
    }

    pub fn session(&self) -> &LookupSession<C> {
        &self.session
    }

    pub fn input_source(&self) -> InputSource {
        self.input_source
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// App's main loop
    pub async fn run(
        mut self,
        ui_to_app_rx: AsyncReceiver<AppEvent>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        let _ = self.ctx.app_to_ui_tx.send(AppEvent::BackendReady).await;
        self.publish_all().await?;

        tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
        loop {
            let deadline = self.session.deadline();

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("[EVENT_LOOP] Cancelled");
                    break;
                }
                _ = wait_until(deadline) => {
                    self.on_timer_fire().await?;
                }
                event = ui_to_app_rx.recv() => {
                    if self.handle_event(event?).await? == Flow::Quit {
                        tracing::info!("[EVENT_LOOP] Close requested");
                        // a query typed right before closing still gets shown
                        self.on_timer_fire().await?;
                        break;
                    }
                }
            }
        }

        let _ = self
            .ctx
            .app_to_ui_tx
            .send(AppEvent::UiEvent(UiEvent::Close))
            .await;
        Ok(())
    }

    /// Apply the debounced query and push the new rows to the UI
    pub async fn on_timer_fire(&mut self) -> anyhow::Result<()> {
        if let Some(refresh) = self.session.on_timer_fire() {
            self.publish(refresh).await?;
        }
        Ok(())
    }

    pub async fn handle_event(&mut self, event: AppEvent) -> anyhow::Result<Flow> {
        match event {
            AppEvent::Query { text, source } => {
                handle_query(text, source, self.input_source, &mut self.session, &self.ctx)
                    .await?;
            }
            AppEvent::UiEvent(event) => return self.handle_ui_event(event).await,
            AppEvent::Status(message) => {
                // input adapters report problems this way
                self.ctx.status(message).await;
            }
            AppEvent::ShowResults { .. } | AppEvent::BackendReady => {
                // UI-only event, ignore in backend
            }
        }

        Ok(Flow::Continue)
    }

    async fn handle_ui_event(&mut self, event: UiEvent) -> anyhow::Result<Flow> {
        tracing::debug!("UiEvent: {:?}", event);
        match event {
            UiEvent::Select(position) => match self.session.engine().row(position) {
                Some(row) => {
                    self.selection = Some(position);
                    let message = format!("selected {}: {}", position + 1, row.headword());
                    self.ctx.status(message).await;
                }
                None => {
                    let message = format!("no row {}", position + 1);
                    self.ctx.status(message).await;
                }
            },
            UiEvent::Speak => match self.selected_row() {
                Some((headword, _)) => handle_speak(headword, &self.ctx),
                None => self.ctx.status("no row selected").await,
            },
            UiEvent::AddWord => match self.selected_row() {
                Some((headword, translation)) => {
                    handle_add_word(headword, translation, &self.ctx)
                }
                None => self.ctx.status("no row selected").await,
            },
            UiEvent::SetMode(mode) => {
                self.ctx.state.config.write().await.ui.match_mode = mode;
                self.ctx.status(format!("mode: {mode}")).await;
                if let Some(refresh) = self.session.set_mode(mode) {
                    self.publish(refresh).await?;
                }
            }
            UiEvent::SetSource(source) => {
                self.input_source = source;
                self.ctx.state.config.write().await.ui.input_source = source;
                self.ctx.status(format!("reading {source} input")).await;
            }
            UiEvent::Close => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Headword and plain translation of the selected row
    fn selected_row(&self) -> Option<(String, String)> {
        let row = self.session.engine().row(self.selection?)?;
        Some((row.headword().to_string(), row.plain_translation().to_string()))
    }

    async fn publish(&mut self, refresh: Refresh) -> anyhow::Result<()> {
        tracing::debug!(
            "Refresh for '{}': {} rows, relayout {}",
            refresh.query,
            refresh.visible,
            refresh.relayout
        );
        self.selection = None;
        self.ctx
            .app_to_ui_tx
            .send(AppEvent::ShowResults {
                rows: self.session.display_rows(self.max_rows),
                total: refresh.visible,
                relayout: refresh.relayout,
            })
            .await?;
        Ok(())
    }

    /// Initial, unfiltered table
    async fn publish_all(&mut self) -> anyhow::Result<()> {
        let total = self.session.engine().visible_len();
        self.ctx
            .app_to_ui_tx
            .send(AppEvent::ShowResults {
                rows: self.session.display_rows(self.max_rows),
                total,
                relayout: true,
            })
            .await?;
        Ok(())
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
