use std::sync::Arc;
use std::time::{Duration, Instant};

use kham_types::{DisplayRow, MatchMode};

use crate::debounce::{Clock, DEFAULT_QUIET_PERIOD, DebounceScheduler, DebounceState, SystemClock};
use crate::dictionary::Dictionary;
use crate::filter::FilterEngine;

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub quiet_period: Duration,
    pub mode: MatchMode,
    /// Queries with at least this many characters trigger a relayout
    pub relayout_min_chars: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            mode: MatchMode::StartsWith,
            relayout_min_chars: 2,
        }
    }
}

/// What the presentation has to redraw after a filter pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub query: String,
    pub visible: usize,
    /// Recompute column sizes as well
    pub relayout: bool,
}

/// Filter state and pending input of one open lookup window
pub struct LookupSession<C: Clock = SystemClock> {
    engine: FilterEngine,
    scheduler: DebounceScheduler<C>,
    mode: MatchMode,
    relayout_min_chars: usize,
}

impl LookupSession<SystemClock> {
    pub fn new(dictionary: Arc<Dictionary>, options: SessionOptions) -> Self {
        Self::with_clock(dictionary, options, SystemClock)
    }
}

impl<C: Clock> LookupSession<C> {
    pub fn with_clock(dictionary: Arc<Dictionary>, options: SessionOptions, clock: C) -> Self {
        Self {
            engine: FilterEngine::new(dictionary),
            scheduler: DebounceScheduler::new(options.quiet_period, clock),
            mode: options.mode,
            relayout_min_chars: options.relayout_min_chars,
        }
    }

    /// Record a query-changing event
    pub fn submit(&mut self, query: impl Into<String>) {
        self.scheduler.submit(query);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.scheduler.state()
    }

    /// Apply the pending query. `None` if nothing was pending or the query was empty.
    pub fn on_timer_fire(&mut self) -> Option<Refresh> {
        let query = self.scheduler.on_timer_fire()?;
        if !self.engine.set_query(&query, self.mode) {
            return None;
        }
        Some(self.refresh(query))
    }

    pub fn fire_if_due(&mut self) -> Option<Refresh> {
        if self.scheduler.is_due() {
            self.on_timer_fire()
        } else {
            None
        }
    }

    /// Change the match mode, re-filtering right away
    pub fn set_mode(&mut self, mode: MatchMode) -> Option<Refresh> {
        self.mode = mode;
        if !self.engine.set_mode(mode) {
            return None;
        }
        let query = self.engine.state().query.clone();
        Some(self.refresh(query))
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Visible rows for the presenter, at most `limit` of them
    pub fn display_rows(&self, limit: usize) -> Vec<DisplayRow> {
        self.engine
            .visible_rows()
            .take(limit)
            .map(|row| row.to_display())
            .collect()
    }

    fn refresh(&self, query: String) -> Refresh {
        let relayout = query.chars().count() >= self.relayout_min_chars;
        Refresh {
            visible: self.engine.visible_len(),
            relayout,
            query,
        }
    }
}
