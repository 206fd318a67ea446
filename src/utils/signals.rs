//! Signal handling for graceful shutdown

use std::future::{Future, IntoFuture};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{error, info};

use crate::state::AppState;

/// Wait for SIGTERM or SIGINT and return the signal number received
pub async fn shutdown_signal() -> anyhow::Result<i32> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();

    let signal = signals
        .next()
        .await
        .ok_or_else(|| anyhow::anyhow!("Signal stream ended unexpectedly"))?;
    info!("Received signal: {}", signal);

    handle.close();
    Ok(signal)
}

/// Run the server until it exits or `signal` resolves, then stop the timer.
///
/// The timer is shut down on every path, including a failed signal handler.
pub async fn serve_until_shutdown<S, F>(state: &AppState, server: S, signal: F)
where
    S: IntoFuture<Output = std::io::Result<()>>,
    F: Future<Output = anyhow::Result<i32>>,
{
    let server = server.into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        signal = signal => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => error!("Signal handling failed, shutting down: {}", e),
            }
        }
    }

    if let Err(e) = state.shutdown().await {
        error!("Failed to shut down timer: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::state::{TimerState, TICK_INTERVAL};

    #[tokio::test(start_paused = true)]
    async fn failed_signal_handler_still_stops_timer() {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
        state.play().unwrap();
        tokio::time::sleep(TICK_INTERVAL / 2).await;
        assert!(state.has_active_tick_loop().unwrap());

        serve_until_shutdown(
            &state,
            std::future::pending::<std::io::Result<()>>(),
            async { Err::<i32, _>(anyhow::anyhow!("signal registration failed")) },
        )
        .await;

        assert!(!state.has_active_tick_loop().unwrap());
        assert_eq!(state.get_timer_state().unwrap(), TimerState::new());
    }

    #[tokio::test(start_paused = true)]
    async fn server_exit_stops_timer() {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
        state.play().unwrap();
        tokio::time::sleep(TICK_INTERVAL / 2).await;

        serve_until_shutdown(
            &state,
            async { Err::<(), _>(std::io::Error::other("listener closed")) },
            std::future::pending::<anyhow::Result<i32>>(),
        )
        .await;

        assert!(!state.has_active_tick_loop().unwrap());
        assert!(!state.get_timer_state().unwrap().running);
    }
}
