//! Pomodoro Server - A state-managed HTTP server for an ADHD-friendly Pomodoro timer
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    config::Config,
    state::AppState,
    api::create_router,
    services::InMemoryMessageStore,
    tasks::{countdown_task, message_poll_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={}, poll={}ms",
          config.host, config.port, config.mode, config.poll_interval().as_millis());

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.mode,
        Arc::new(InMemoryMessageStore::new()),
    ));

    // Start the countdown background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(timer_state).await;
    });

    // Start the message poll background task
    let poll_state = Arc::clone(&state);
    let poll_interval = config.poll_interval();
    tokio::spawn(async move {
        message_poll_task(poll_state, poll_interval).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer               - Timer snapshot");
    info!("  POST /timer/toggle        - Start or pause");
    info!("  POST /timer/reset         - Refill current period and pause");
    info!("  POST /timer/skip          - Advance to next period");
    info!("  POST /timer/mode          - Change mode");
    info!("  POST /timer/custom        - Set a custom duration");
    info!("  POST /timer/custom/apply  - Apply custom durations");
    info!("  POST /timer/cycles/reset  - Reset completed cycle counter");
    info!("  GET  /messages/latest     - Latest message");
    info!("  POST /messages            - Add a message");
    info!("  GET  /status              - Timer and server status");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
