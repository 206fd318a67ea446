//! State management module
//!
//! This module contains the countdown state, its derived display values and
//! the shared application state that owns the tick loop.

pub mod app_state;
pub mod button;
pub mod threshold;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, LastAction, TimerError};
pub use button::ButtonState;
pub use threshold::{Threshold, ALERT_LIMIT, WARNING_LIMIT};
pub use timer_state::{TickOutcome, TimerState, TICK_INTERVAL, TIMER_LOW_RESET, TIME_LIMIT};
