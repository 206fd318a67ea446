//! Countdown tick loop background task

use std::sync::Arc;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome, TICK_INTERVAL};

/// Background task that ticks the countdown until cancelled or reset.
///
/// The first tick fires immediately, the rest every `TICK_INTERVAL`.
pub async fn tick_loop_task(state: Arc<AppState>, cancel: CancellationToken) {
    debug!("Starting tick loop");

    let mut interval = interval(TICK_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Tick loop cancelled");
                break;
            }

            _ = interval.tick() => {
                match state.apply_tick(&cancel) {
                    Ok(Some(TickOutcome::Continue)) => {}
                    Ok(Some(TickOutcome::Reset)) => {
                        info!("Countdown reached its floor, timer reset");
                        break;
                    }
                    Ok(None) => {
                        debug!("Tick loop superseded, exiting");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to apply tick: {}", e);
                        break;
                    }
                }
            }
        }
    }
}
