//! Countdown Timer - a countdown timer served over a local HTTP control surface
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::progress_reporter_task,
    utils::{shutdown_signal, shutdown_signals},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    let input = config.initial_input();
    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, input={:02}:{:02}:{:02}",
          config.host, config.port, input.hours, input.minutes, input.seconds);

    let signals = shutdown_signals()?;

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), input, config.bar_width));

    // Log run transitions in the background
    let reporter_state = Arc::clone(&state);
    tokio::spawn(async move {
        progress_reporter_task(reporter_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the countdown");
    info!("  POST /pause  - Pause the countdown");
    info!("  POST /reset  - Stop and clear the countdown");
    info!("  PUT  /input  - Edit hours/minutes/seconds");
    info!("  GET  /timer  - Rendered timer widget");
    info!("  GET  /status - Timer plus server status");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(signals, Arc::clone(&state)))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
