use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(50);

/// Time source for the scheduler
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending,
}

/// Trailing-edge debounce with a single pending slot.
///
/// Every [`submit`](Self::submit) overwrites the pending query and restarts the one-shot
/// timer. The owner arms a real timer from [`deadline`](Self::deadline) and calls
/// [`on_timer_fire`](Self::on_timer_fire) when it elapses.
pub struct DebounceScheduler<C: Clock = SystemClock> {
    quiet_period: Duration,
    clock: C,
    pending: Option<String>,
    deadline: Option<Instant>,
}

impl<C: Clock> DebounceScheduler<C> {
    pub fn new(quiet_period: Duration, clock: C) -> Self {
        Self {
            quiet_period,
            clock,
            pending: None,
            deadline: None,
        }
    }

    pub fn submit(&mut self, query: impl Into<String>) {
        let query = query.into();
        if let Some(previous) = self.pending.as_deref() {
            tracing::trace!("Replacing pending query '{}'", previous);
        }
        self.deadline = Some(self.clock.now() + self.quiet_period);
        self.pending = Some(query);
    }

    pub fn state(&self) -> DebounceState {
        if self.pending.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// When the running timer should fire, `None` while idle
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn is_due(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| self.clock.now() >= deadline)
    }

    /// Consume the pending query. Returns `None` when idle.
    pub fn on_timer_fire(&mut self) -> Option<String> {
        self.deadline = None;
        self.pending.take()
    }

    /// Fire only if the quiet period has elapsed
    pub fn fire_if_due(&mut self) -> Option<String> {
        if self.is_due() {
            self.on_timer_fire()
        } else {
            None
        }
    }

    /// Drop the pending query without applying it
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }
}
