//! The long-running loop: poll, compare with what was last said, notify.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::DEFAULT_INTERVAL_SECS;
use crate::cycle::poll_cycle;
use crate::notify::BestEffortNotifier;
use crate::ports::{Notifier, StatusSource};
use crate::util::now_secs;

/// State carried between cycles. Owned by the [`Supervisor`] only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleState {
    /// Last status text that was notified; empty until the first one.
    pub current_status_message: String,
    /// Last error text that was notified; empty until the first one.
    pub last_error_message: String,
    /// `from_date` for the next poll (epoch seconds).
    pub next_poll_timestamp: i64,
}

impl CycleState {
    /// Fresh state polling from `timestamp`.
    pub fn starting_at(timestamp: i64) -> Self {
        Self {
            next_poll_timestamp: timestamp,
            ..Self::default()
        }
    }
}

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// New status text, sent to the notifier.
    StatusNotified,
    /// Same status text as last time, suppressed.
    StatusUnchanged,
    /// New error text, sent to the notifier.
    ErrorNotified,
    /// Same error text as last time, suppressed.
    ErrorSuppressed,
}

/// Loop tuning.
#[derive(Debug, Clone)]
pub struct SupervisorSettings {
    /// Pause between cycles; constant, not a backoff.
    pub interval: Duration,
    /// First `from_date`. Defaults to the current time.
    pub start_timestamp: Option<i64>,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            start_timestamp: None,
        }
    }
}

/// Runs poll cycles forever and decides what gets notified.
///
/// Status texts and error texts are de-duplicated separately: a text is
/// suppressed only when it equals the previous notified text of the same
/// category. The timestamp advances only after a fully successful cycle.
pub struct Supervisor<S, N> {
    source: S,
    notifier: BestEffortNotifier<N>,
    interval: Duration,
    state: CycleState,
}

impl<S: StatusSource, N: Notifier> Supervisor<S, N> {
    /// Builds a supervisor with fresh [`CycleState`].
    pub fn new(source: S, notifier: N, settings: SupervisorSettings) -> Self {
        let start = settings.start_timestamp.unwrap_or_else(now_secs);
        Self {
            source,
            notifier: BestEffortNotifier::new(notifier),
            interval: settings.interval,
            state: CycleState::starting_at(start),
        }
    }

    /// Current cycle state.
    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// The underlying notifier.
    pub fn notifier(&self) -> &N {
        self.notifier.inner()
    }

    /// The underlying status source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// One iteration without the trailing sleep.
    pub async fn tick(&mut self) -> Tick {
        match poll_cycle(&self.source, Some(self.state.next_poll_timestamp)).await {
            Ok(outcome) => {
                self.state.next_poll_timestamp = outcome.new_timestamp;
                if outcome.status_message == self.state.current_status_message {
                    debug!("status unchanged; not notifying");
                    return Tick::StatusUnchanged;
                }
                info!(text = %outcome.status_message, "status changed");
                self.notifier.notify(&outcome.status_message).await;
                self.state.current_status_message = outcome.status_message;
                Tick::StatusNotified
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "poll cycle failed");
                let text = e.to_string();
                if text == self.state.last_error_message {
                    debug!("same error as last notified; not notifying");
                    return Tick::ErrorSuppressed;
                }
                self.notifier.notify(&text).await;
                self.state.last_error_message = text;
                Tick::ErrorNotified
            }
        }
    }

    /// Ticks, sleeps the fixed interval, repeats. Never returns.
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.interval.as_secs(),
            from_date = self.state.next_poll_timestamp,
            "watcher loop starting"
        );
        loop {
            let tick = self.tick().await;
            debug!(?tick, next_poll = self.state.next_poll_timestamp, "cycle done");
            sleep(self.interval).await;
        }
    }
}
