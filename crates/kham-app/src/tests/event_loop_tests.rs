//! Event loop behaviour with a manual clock and recording collaborators

use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::AsyncReceiver;
use kham_config::Config;
use kham_core::{DebounceState, DictionaryLoader, LookupSession, ManualClock, SessionOptions};
use kham_io::{ClipboardError, Speaker, SpeechError, SystemClipboard, WordList};
use kham_types::{AppEvent, InputSource, MatchMode, TextSource, UiEvent};
use tokio::time::timeout;

use crate::controller::build_event_loop;
use crate::events::{EventLoop, Flow};
use crate::io::watch_selection;
use crate::lookup_context::LookupContext;
use crate::state::AppState;

const WORDS: &str = "แมว\tmaeo\tcat\nหมา\tmǎa\tdog\nหมาก\tmàak\tareca nut; betel\n";

#[derive(Default)]
struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Speaker for RecordingSpeaker {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    event_loop: EventLoop<ManualClock>,
    clock: ManualClock,
    ui_rx: AsyncReceiver<AppEvent>,
    speaker: Arc<RecordingSpeaker>,
    state: Arc<AppState>,
    dir: tempfile::TempDir,
}

fn harness(input_source: InputSource) -> Harness {
    let dictionary = DictionaryLoader::default().load(WORDS).unwrap();
    let state = Arc::new(AppState::with_dictionary(Config::default(), dictionary));
    let (ui_tx, ui_rx) = kanal::unbounded_async();
    let speaker = Arc::new(RecordingSpeaker::default());
    let dir = tempfile::tempdir().unwrap();

    let ctx = LookupContext::new(
        state.clone(),
        ui_tx,
        Some(speaker.clone() as Arc<dyn Speaker>),
        Some(WordList::new(dir.path().join("wordlist.txt"))),
    );
    let clock = ManualClock::new();
    let session = LookupSession::with_clock(
        state.dictionary.clone(),
        SessionOptions::default(),
        clock.clone(),
    );

    Harness {
        event_loop: EventLoop::new(session, input_source, 10, ctx),
        clock,
        ui_rx,
        speaker,
        state,
        dir,
    }
}

fn typed(text: &str) -> AppEvent {
    AppEvent::Query {
        text: text.to_string(),
        source: TextSource::Typed,
    }
}

fn selected(text: &str) -> AppEvent {
    AppEvent::Query {
        text: text.to_string(),
        source: TextSource::Clipboard,
    }
}

async fn next_event(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for UI event")
        .expect("channel closed")
}

async fn next_status(rx: &AsyncReceiver<AppEvent>) -> String {
    match next_event(rx).await {
        AppEvent::Status(message) => message,
        other => panic!("expected status, got {other:?}"),
    }
}

fn headwords(event: &AppEvent) -> Vec<&str> {
    match event {
        AppEvent::ShowResults { rows, .. } => rows.iter().map(|r| r.headword.as_str()).collect(),
        other => panic!("expected results, got {other:?}"),
    }
}

impl Harness {
    async fn filter(&mut self, query: &str) {
        self.event_loop.handle_event(typed(query)).await.unwrap();
        self.clock.advance(Duration::from_millis(60));
        self.event_loop.on_timer_fire().await.unwrap();
        next_event(&self.ui_rx).await;
    }
}

#[tokio::test]
async fn typing_burst_runs_one_filter_pass() {
    let mut h = harness(InputSource::Typed);

    for query in ["ห", "หม", "หมา"] {
        h.event_loop.handle_event(typed(query)).await.unwrap();
        h.clock.advance(Duration::from_millis(10));
    }
    assert_eq!(h.event_loop.session().debounce_state(), DebounceState::Pending);

    h.clock.advance(Duration::from_millis(50));
    h.event_loop.on_timer_fire().await.unwrap();

    let event = next_event(&h.ui_rx).await;
    assert_eq!(headwords(&event), ["หมา", "หมาก"]);
    assert!(matches!(event, AppEvent::ShowResults { total: 2, relayout: true, .. }));
    assert_eq!(h.event_loop.session().engine().passes(), 1);
    assert!(h.ui_rx.try_recv().unwrap().is_none());
}

#[tokio::test]
async fn inactive_source_is_ignored() {
    let mut h = harness(InputSource::ClipboardSelection);

    h.event_loop.handle_event(typed("แมว")).await.unwrap();
    assert_eq!(h.event_loop.session().debounce_state(), DebounceState::Idle);

    h.event_loop
        .handle_event(selected("  แมว\n"))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "selection: แมว");

    h.event_loop.on_timer_fire().await.unwrap();
    let event = next_event(&h.ui_rx).await;
    assert_eq!(headwords(&event), ["แมว"]);
}

#[tokio::test]
async fn switching_source_updates_config() {
    let mut h = harness(InputSource::ClipboardSelection);

    let event = AppEvent::UiEvent(UiEvent::SetSource(InputSource::Typed));
    h.event_loop.handle_event(event).await.unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "reading typed input");
    assert_eq!(h.event_loop.input_source(), InputSource::Typed);
    assert_eq!(
        h.state.config.read().await.ui.input_source,
        InputSource::Typed
    );

    h.event_loop.handle_event(typed("แมว")).await.unwrap();
    assert_eq!(h.event_loop.session().debounce_state(), DebounceState::Pending);
}

#[tokio::test]
async fn empty_query_keeps_current_rows() {
    let mut h = harness(InputSource::Typed);
    h.filter("หมา").await;

    h.event_loop.handle_event(typed("")).await.unwrap();
    h.event_loop.on_timer_fire().await.unwrap();

    assert!(h.ui_rx.try_recv().unwrap().is_none());
    assert_eq!(h.event_loop.session().engine().visible_len(), 2);
}

#[tokio::test]
async fn speak_uses_the_selected_headword() {
    let mut h = harness(InputSource::Typed);
    h.filter("หมา").await;

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::Select(1)))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "selected 2: หมาก");

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::Speak))
        .await
        .unwrap();

    let speaker = h.speaker.clone();
    timeout(Duration::from_secs(2), async move {
        while speaker.spoken.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("speaker never called");
    assert_eq!(*h.speaker.spoken.lock().unwrap(), ["หมาก"]);
}

#[tokio::test]
async fn add_saves_the_selected_entry_once() {
    let mut h = harness(InputSource::Typed);
    h.filter("หมา").await;

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::Select(1)))
        .await
        .unwrap();
    next_status(&h.ui_rx).await;

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::AddWord))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "saved หมาก");

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::AddWord))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "หมาก is already saved");

    let saved = std::fs::read_to_string(h.dir.path().join("wordlist.txt")).unwrap();
    assert_eq!(saved, "หมาก\tareca nut; betel\n");
}

#[tokio::test]
async fn actions_need_a_selection() {
    let mut h = harness(InputSource::Typed);

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::Select(5)))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "no row 6");

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::AddWord))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "no row selected");
}

#[tokio::test]
async fn refresh_clears_the_selection() {
    let mut h = harness(InputSource::Typed);
    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::Select(0)))
        .await
        .unwrap();
    next_status(&h.ui_rx).await;
    assert_eq!(h.event_loop.selection(), Some(0));

    h.filter("แมว").await;
    assert_eq!(h.event_loop.selection(), None);
}

#[tokio::test]
async fn mode_change_refilters_and_is_remembered() {
    let mut h = harness(InputSource::Typed);
    h.filter("มา").await;
    assert_eq!(h.event_loop.session().engine().visible_len(), 0);

    h.event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::SetMode(MatchMode::Contains)))
        .await
        .unwrap();
    assert_eq!(next_status(&h.ui_rx).await, "mode: contains");

    let event = next_event(&h.ui_rx).await;
    assert_eq!(headwords(&event), ["หมา", "หมาก"]);
    assert_eq!(h.state.config.read().await.ui.match_mode, MatchMode::Contains);
}

#[tokio::test]
async fn close_ends_the_loop() {
    let mut h = harness(InputSource::Typed);
    let flow = h
        .event_loop
        .handle_event(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();
    assert_eq!(flow, Flow::Quit);
}

#[tokio::test]
async fn run_applies_queries_after_the_quiet_period() {
    let dictionary = DictionaryLoader::default().load(WORDS).unwrap();
    let mut config = Config::default();
    config.ui.input_source = InputSource::Typed;
    config.debounce.quiet_period_ms = 10;
    config.speech.enabled = false;
    let state = Arc::new(AppState::with_dictionary(config.clone(), dictionary));

    let (ui_tx, ui_rx) = kanal::unbounded_async();
    let (app_tx, app_rx) = kanal::unbounded_async();
    let event_loop = build_event_loop(state, &config, ui_tx);
    let cancel = tokio_util::sync::CancellationToken::new();
    let task = tokio::spawn(event_loop.run(app_rx, cancel.clone()));

    assert!(matches!(next_event(&ui_rx).await, AppEvent::BackendReady));
    assert_eq!(headwords(&next_event(&ui_rx).await).len(), 3);

    for query in ["แ", "แม", "แมว"] {
        app_tx.send(typed(query)).await.unwrap();
    }
    let event = next_event(&ui_rx).await;
    assert_eq!(headwords(&event), ["แมว"]);

    app_tx
        .send(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();
    let result = timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn unavailable_clipboard_keeps_typed_lookup_running() {
    let dictionary = DictionaryLoader::default().load(WORDS).unwrap();
    let mut config = Config::default();
    config.ui.input_source = InputSource::Typed;
    config.debounce.quiet_period_ms = 10;
    config.speech.enabled = false;
    let state = Arc::new(AppState::with_dictionary(config.clone(), dictionary));

    let (ui_tx, ui_rx) = kanal::unbounded_async();
    let (app_tx, app_rx) = kanal::unbounded_async();
    let cancel = tokio_util::sync::CancellationToken::new();

    let event_loop = build_event_loop(state, &config, ui_tx);
    let loop_task = tokio::spawn(event_loop.run(app_rx, cancel.clone()));
    let watcher = tokio::spawn(watch_selection(
        || {
            Err::<SystemClipboard, _>(ClipboardError::Backend(
                arboard::Error::ClipboardNotSupported,
            ))
        },
        Duration::from_millis(1),
        cancel.clone(),
        app_tx.clone(),
    ));

    assert!(matches!(next_event(&ui_rx).await, AppEvent::BackendReady));
    next_event(&ui_rx).await;
    assert!(next_status(&ui_rx).await.starts_with("clipboard unavailable"));

    app_tx.send(typed("แมว")).await.unwrap();
    assert_eq!(headwords(&next_event(&ui_rx).await), ["แมว"]);
    assert!(!watcher.is_finished());
    assert!(!loop_task.is_finished());

    cancel.cancel();
    let watched = timeout(Duration::from_secs(2), watcher).await.unwrap().unwrap();
    let looped = timeout(Duration::from_secs(2), loop_task).await.unwrap().unwrap();
    assert!(watched.is_ok());
    assert!(looped.is_ok());
}

#[tokio::test]
async fn closing_applies_the_pending_query_first() {
    let dictionary = DictionaryLoader::default().load(WORDS).unwrap();
    let mut config = Config::default();
    config.ui.input_source = InputSource::Typed;
    config.debounce.quiet_period_ms = 10_000;
    config.speech.enabled = false;
    let state = Arc::new(AppState::with_dictionary(config.clone(), dictionary));

    let (ui_tx, ui_rx) = kanal::unbounded_async();
    let (app_tx, app_rx) = kanal::unbounded_async();
    let event_loop = build_event_loop(state, &config, ui_tx);
    let task = tokio::spawn(event_loop.run(app_rx, tokio_util::sync::CancellationToken::new()));

    app_tx.send(typed("หมา")).await.unwrap();
    app_tx
        .send(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();

    next_event(&ui_rx).await;
    next_event(&ui_rx).await;
    assert_eq!(headwords(&next_event(&ui_rx).await), ["หมา", "หมาก"]);
    assert!(matches!(
        next_event(&ui_rx).await,
        AppEvent::UiEvent(UiEvent::Close)
    ));
    assert!(timeout(Duration::from_secs(2), task).await.unwrap().unwrap().is_ok());
}
