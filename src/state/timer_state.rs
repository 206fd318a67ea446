//! Countdown state and the tick transition

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ButtonState, Threshold};

/// Starting and reset magnitude of the countdown, in half-second units
pub const TIME_LIMIT: f32 = 362.0;
/// Floor at which the countdown resets itself
pub const TIMER_LOW_RESET: f32 = 2.0;
/// Delay between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Half-second units per displayed minute
const UNITS_PER_MINUTE: f32 = 120.0;

/// Result of applying a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented, timer keeps running
    Continue,
    /// Countdown hit the floor and was reset; the timer is no longer running
    Reset,
}

/// Snapshot of the timer engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub countdown: f32,
    pub running: bool,
    pub threshold: Threshold,
}

impl TimerState {
    /// Create a stopped timer at the full countdown
    pub fn new() -> Self {
        Self {
            countdown: TIME_LIMIT,
            running: false,
            threshold: Threshold::None,
        }
    }

    /// Return to the initial stopped state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Decrement once and recompute the threshold, resetting at the floor
    pub fn tick(&mut self) -> TickOutcome {
        self.countdown -= 1.0;
        self.threshold = Threshold::from_countdown(self.countdown);

        if self.countdown <= TIMER_LOW_RESET {
            self.reset();
            return TickOutcome::Reset;
        }
        TickOutcome::Continue
    }

    /// Whole minutes shown on the display
    pub fn minutes(&self) -> u32 {
        ((self.countdown - TIMER_LOW_RESET) / UNITS_PER_MINUTE) as u32
    }

    /// Seconds within the current minute shown on the display
    pub fn seconds(&self) -> u32 {
        (((self.countdown - TIMER_LOW_RESET) % UNITS_PER_MINUTE) / 2.0) as u32
    }

    /// Zero-padded `MM:SS` text
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.minutes(), self.seconds())
    }

    /// True when the countdown has not moved from its starting value
    pub fn is_at_start(&self) -> bool {
        self.countdown >= TIME_LIMIT
    }

    /// Button state derived from this snapshot
    pub fn button_state(&self) -> ButtonState {
        ButtonState::from_timer(self)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(countdown: f32) -> TimerState {
        TimerState {
            countdown,
            running: true,
            threshold: Threshold::from_countdown(countdown),
        }
    }

    #[test]
    fn tick_decrements_by_one() {
        let mut state = TimerState::new();
        state.running = true;
        assert_eq!(state.tick(), TickOutcome::Continue);
        assert_eq!(state.countdown, 361.0);
        assert!(state.running);
        assert_eq!(state.threshold, Threshold::None);
    }

    #[test]
    fn threshold_changes_exactly_at_limits() {
        let mut state = TimerState::new();
        state.running = true;
        let mut warning_at = None;
        let mut alert_at = None;
        let mut previous = state.threshold;

        while state.tick() == TickOutcome::Continue {
            if previous == Threshold::None && state.threshold == Threshold::Warning {
                warning_at = Some(state.countdown);
            }
            if previous == Threshold::Warning && state.threshold == Threshold::Alert {
                alert_at = Some(state.countdown);
            }
            previous = state.threshold;
        }

        assert_eq!(warning_at, Some(12.0));
        assert_eq!(alert_at, Some(6.0));
    }

    #[test]
    fn never_observed_below_floor() {
        let mut state = TimerState::new();
        state.running = true;
        for _ in 0..1000 {
            if state.tick() == TickOutcome::Reset {
                state.running = true;
            }
            assert!(state.countdown >= TIMER_LOW_RESET);
            assert!(state.countdown <= TIME_LIMIT);
        }
    }

    #[test]
    fn reaching_floor_resets_in_same_tick() {
        let mut state = at(3.0);
        assert_eq!(state.tick(), TickOutcome::Reset);
        assert_eq!(state, TimerState::new());
    }

    #[test]
    fn full_run_scenario() {
        let mut state = TimerState::new();
        state.running = true;

        for _ in 0..350 {
            assert_eq!(state.tick(), TickOutcome::Continue);
            assert!(state.running);
        }
        assert_eq!(state.countdown, 12.0);
        assert_eq!(state.threshold, Threshold::Warning);

        for _ in 0..6 {
            state.tick();
        }
        assert_eq!(state.countdown, 6.0);
        assert_eq!(state.threshold, Threshold::Alert);

        for _ in 0..3 {
            assert_eq!(state.tick(), TickOutcome::Continue);
        }
        assert_eq!(state.tick(), TickOutcome::Reset);
        assert_eq!(state.countdown, TIME_LIMIT);
        assert!(!state.running);
        assert_eq!(state.threshold, Threshold::None);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(at(362.0).minutes(), 3);
        assert_eq!(at(362.0).seconds(), 0);
        assert_eq!(at(362.0).display(), "03:00");
        assert_eq!(at(2.0).display(), "00:00");
        assert_eq!(at(122.0).display(), "01:00");
        assert_eq!(at(121.0).display(), "00:59");
        assert_eq!(at(13.0).display(), "00:05");
    }
}
