//! API response structures

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{AppState, ButtonState, LastAction, Threshold, TimerError, TimerState, TIME_LIMIT};

/// Primary button as a client should draw it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonView {
    pub state: ButtonState,
    pub label: String,
    pub icon: String,
    pub style: String,
}

/// Timer snapshot plus everything a client needs to render the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub countdown: f32,
    pub running: bool,
    pub threshold: Threshold,
    pub minutes: u32,
    pub seconds: u32,
    pub display: String,
    /// Progress arc sweep; the full track is `TIME_LIMIT`
    pub sweep: f32,
    pub text_color: String,
    pub button: ButtonView,
    pub cancel_visible: bool,
}

impl From<TimerState> for TimerView {
    fn from(timer: TimerState) -> Self {
        let button = timer.button_state();
        Self {
            countdown: timer.countdown,
            running: timer.running,
            threshold: timer.threshold,
            minutes: timer.minutes(),
            seconds: timer.seconds(),
            display: timer.display(),
            sweep: timer.countdown,
            text_color: timer.threshold.text_color().to_string(),
            button: ButtonView {
                state: button,
                label: button.label().to_string(),
                icon: button.icon().to_string(),
                style: button.style().to_string(),
            },
            cancel_visible: button.cancel_visible(),
        }
    }
}

/// API response structure for timer transition endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer: timer.into(),
        }
    }

    /// Create a response whose status reflects the timer: running, paused or stopped
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        let status = if timer.running {
            "running"
        } else if timer.is_at_start() {
            "stopped"
        } else {
            "paused"
        };
        Self::new(status.to_string(), message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Format an uptime as `HH:MM:SS`, letting the hours grow past two digits
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub time_limit: f32,
    pub uptime: String,
    pub uptime_seconds: u64,
    pub port: u16,
    pub host: String,
    pub last_action: Option<LastAction>,
}

impl StatusResponse {
    /// Build a status response from the shared state and a timer snapshot
    pub fn new(state: &AppState, timer: TimerState) -> Self {
        let uptime = state.uptime();
        Self {
            timer: timer.into(),
            time_limit: TIME_LIMIT,
            uptime: format_uptime(uptime),
            uptime_seconds: uptime.as_secs(),
            port: state.port,
            host: state.host.clone(),
            last_action: state.get_last_action(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    /// False when the timer lock is poisoned
    pub timer_available: bool,
}

impl HealthResponse {
    /// Report health; the service is degraded when the timer cannot be read
    pub fn from_timer(timer: Result<TimerState, TimerError>) -> Self {
        let timer_available = timer.is_ok();
        Self {
            status: if timer_available { "ok" } else { "degraded" }.to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timer_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_of_fresh_timer() {
        let view = TimerView::from(TimerState::new());
        assert_eq!(view.display, "03:00");
        assert_eq!(view.sweep, 362.0);
        assert_eq!(view.text_color, "default");
        assert_eq!(view.button.label, "Start");
        assert!(!view.cancel_visible);
    }

    #[test]
    fn status_follows_timer() {
        let mut timer = TimerState::new();
        assert_eq!(ApiResponse::from_timer(String::new(), timer).status, "stopped");

        timer.running = true;
        assert_eq!(ApiResponse::from_timer(String::new(), timer).status, "running");

        timer.tick();
        timer.running = false;
        let response = ApiResponse::from_timer(String::new(), timer);
        assert_eq!(response.status, "paused");
        assert_eq!(response.timer.button.label, "Resume");
    }

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(3_725)), "01:02:05");
        assert_eq!(format_uptime(Duration::from_secs(360_000)), "100:00:00");
    }

    #[test]
    fn health_degrades_without_timer() {
        let healthy = HealthResponse::from_timer(Ok(TimerState::new()));
        assert_eq!(healthy.status, "ok");
        assert!(healthy.timer_available);

        let degraded = HealthResponse::from_timer(Err(TimerError::StatePoisoned("poisoned".to_string())));
        assert_eq!(degraded.status, "degraded");
        assert!(!degraded.timer_available);
    }
}
