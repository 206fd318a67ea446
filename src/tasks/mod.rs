//! Background tasks module
//!
//! This module contains the tick loop that drives the countdown and the
//! monitor that reports threshold changes.

pub mod threshold_monitor;
pub mod tick_loop;

// Re-export main functions
pub use threshold_monitor::threshold_monitor_task;
pub use tick_loop::tick_loop_task;
