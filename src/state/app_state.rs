//! Main application state management

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{ButtonState, TickOutcome, TimerState};
use crate::tasks::tick_loop_task;

/// Errors raised by timer transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// `play` or `resume` was called while the countdown is already running
    AlreadyRunning,
    /// The engine mutex was poisoned by a panicking holder
    StatePoisoned(String),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::AlreadyRunning => write!(f, "Timer is already running"),
            TimerError::StatePoisoned(e) => write!(f, "Failed to lock timer state: {}", e),
        }
    }
}

impl std::error::Error for TimerError {}

/// Most recent transition applied to the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastAction {
    pub action: String,
    pub at: DateTime<Utc>,
    /// Countdown value right after the transition
    pub countdown: f32,
}

/// Handle to the one tick loop allowed to drive the countdown
#[derive(Debug)]
struct TickLoop {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Countdown state together with the loop that advances it.
///
/// Both live under one lock so that cancelling a loop and mutating the
/// countdown are never observed out of order by a tick.
#[derive(Debug)]
struct Engine {
    timer: TimerState,
    tick_loop: Option<TickLoop>,
}

impl Engine {
    fn cancel_tick_loop(&mut self) -> Option<JoinHandle<()>> {
        self.tick_loop.take().map(|tick_loop| {
            tick_loop.cancel.cancel();
            tick_loop.handle
        })
    }
}

/// Main application state that owns the timer engine
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<Engine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    last_action: Mutex<Option<LastAction>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with a stopped timer at the full countdown
    pub fn new(port: u16, host: String) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            engine: Mutex::new(Engine {
                timer: TimerState::new(),
                tick_loop: None,
            }),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, Engine>, TimerError> {
        self.engine
            .lock()
            .map_err(|e| TimerError::StatePoisoned(e.to_string()))
    }

    /// Start the countdown from its current value
    pub fn play(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        self.start("play")
    }

    /// Continue a paused countdown; identical to `play`
    pub fn resume(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        self.start("resume")
    }

    fn start(self: &Arc<Self>, action: &str) -> Result<TimerState, TimerError> {
        let mut engine = self.lock_engine()?;

        if engine.timer.running {
            warn!("Rejected {}: timer is already running", action);
            return Err(TimerError::AlreadyRunning);
        }

        // A loop that ended on its own may still be parked here
        engine.cancel_tick_loop();

        engine.timer.running = true;
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(tick_loop_task(Arc::clone(self), cancel.clone()));
        engine.tick_loop = Some(TickLoop { cancel, handle });

        let snapshot = engine.timer;
        drop(engine);

        info!("Timer {} at countdown {}", action, snapshot.countdown);
        self.record_action(action, &snapshot);
        self.publish(snapshot);
        Ok(snapshot)
    }

    /// Halt the countdown, keeping its value and threshold
    pub fn pause(&self) -> Result<TimerState, TimerError> {
        let mut engine = self.lock_engine()?;

        if !engine.timer.running {
            debug!("Pause requested while timer is not running");
        }
        engine.timer.running = false;
        engine.cancel_tick_loop();

        let snapshot = engine.timer;
        drop(engine);

        info!("Timer paused at countdown {}", snapshot.countdown);
        self.record_action("pause", &snapshot);
        self.publish(snapshot);
        Ok(snapshot)
    }

    /// Halt the countdown and return it to the full value; no loop is relaunched
    pub fn stop(&self) -> Result<TimerState, TimerError> {
        let mut engine = self.lock_engine()?;

        engine.cancel_tick_loop();
        engine.timer.reset();

        let snapshot = engine.timer;
        drop(engine);

        info!("Timer stopped and reset");
        self.record_action("stop", &snapshot);
        self.publish(snapshot);
        Ok(snapshot)
    }

    /// Apply the primary button for whatever state the timer is in
    pub fn press_primary(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        let button = self.get_timer_state()?.button_state();
        debug!("Primary button pressed in state {:?}", button);

        match button {
            ButtonState::Play => self.play(),
            ButtonState::Pause => self.pause(),
            ButtonState::Resume => self.resume(),
        }
    }

    /// Apply the cancel/reset button
    pub fn press_cancel(&self) -> Result<TimerState, TimerError> {
        debug!("Cancel button pressed");
        self.stop()
    }

    /// Advance the countdown on behalf of the loop owning `cancel`.
    ///
    /// Returns `None` when that loop has been cancelled or superseded, in
    /// which case nothing is changed and the loop must exit.
    pub fn apply_tick(&self, cancel: &CancellationToken) -> Result<Option<TickOutcome>, TimerError> {
        let mut engine = self.lock_engine()?;

        if cancel.is_cancelled() || !engine.timer.running {
            return Ok(None);
        }

        let outcome = engine.timer.tick();
        if outcome == TickOutcome::Reset {
            engine.tick_loop = None;
        }
        let snapshot = engine.timer;
        drop(engine);

        debug!("Tick: countdown={} threshold={}", snapshot.countdown, snapshot.threshold);
        self.publish(snapshot);
        Ok(Some(outcome))
    }

    /// Stop the timer and wait for its tick loop to finish
    pub async fn shutdown(&self) -> Result<(), TimerError> {
        let handle = {
            let mut engine = self.lock_engine()?;
            let handle = engine.cancel_tick_loop();
            engine.timer.reset();
            handle
        };

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Tick loop ended abnormally: {}", e);
            }
        }
        self.publish(TimerState::new());
        info!("Timer shut down");
        Ok(())
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, TimerError> {
        self.lock_engine().map(|engine| engine.timer)
    }

    /// True while a tick loop is registered and has not yet finished
    pub fn has_active_tick_loop(&self) -> Result<bool, TimerError> {
        let engine = self.lock_engine()?;
        Ok(engine
            .tick_loop
            .as_ref()
            .is_some_and(|tick_loop| !tick_loop.handle.is_finished()))
    }

    /// Subscribe to timer snapshots published after every change
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    fn publish(&self, snapshot: TimerState) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn record_action(&self, action: &str, snapshot: &TimerState) {
        match self.last_action.lock() {
            Ok(mut last_action) => {
                *last_action = Some(LastAction {
                    action: action.to_string(),
                    at: Utc::now(),
                    countdown: snapshot.countdown,
                });
            }
            Err(e) => warn!("Failed to record last action: {}", e),
        }
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// The most recent user transition, if any
    pub fn get_last_action(&self) -> Option<LastAction> {
        self.last_action.lock().ok().and_then(|last| last.clone())
    }
}
