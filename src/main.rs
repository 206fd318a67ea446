//! Countdown Timer - A countdown engine served over HTTP
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::threshold_monitor_task,
    utils::{serve_until_shutdown, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Report threshold changes as the countdown runs
    let monitor_state = Arc::clone(&state);
    tokio::spawn(async move {
        threshold_monitor_task(monitor_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /play          - Start the countdown");
    info!("  POST /pause         - Pause the countdown");
    info!("  POST /resume        - Resume a paused countdown");
    info!("  POST /stop          - Stop and reset the countdown");
    info!("  POST /press/primary - Press the start/pause/resume button");
    info!("  POST /press/cancel  - Press the reset button");
    info!("  GET  /status        - Current timer and display values");
    info!("  GET  /health        - Health check");

    // Serve until a shutdown signal, then stop the timer
    serve_until_shutdown(&state, axum::serve(listener, app), shutdown_signal()).await;

    info!("Server shutdown complete");
    Ok(())
}
