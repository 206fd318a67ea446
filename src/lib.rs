//! Countdown Timer - A countdown engine served over HTTP
//!
//! This library provides a single countdown timer with play, pause, resume
//! and stop transitions, a cancellable tick loop, and the derived values a
//! client needs to render the timer screen.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerError, TimerState};
pub use api::create_router;
pub use utils::signals::{serve_until_shutdown, shutdown_signal};
