//! Threshold monitor background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::{AppState, Threshold};

/// Background task that logs every change of threshold band and running flag
pub async fn threshold_monitor_task(state: Arc<AppState>) {
    info!("Starting threshold monitor task");

    let mut timer_rx = state.subscribe();
    let initial = *timer_rx.borrow_and_update();
    let mut threshold = initial.threshold;
    let mut running = initial.running;

    while timer_rx.changed().await.is_ok() {
        let current = *timer_rx.borrow_and_update();

        if current.threshold != threshold {
            match current.threshold {
                Threshold::None => info!("Countdown left the warning bands"),
                Threshold::Warning | Threshold::Alert => info!(
                    "Countdown entered {} band at {} ({})",
                    current.threshold,
                    current.countdown,
                    current.display()
                ),
            }
            threshold = current.threshold;
        }

        if current.running != running {
            debug!("Timer running flag changed to {}", current.running);
            running = current.running;
        }
    }

    debug!("Timer update channel closed, threshold monitor exiting");
}
