//! Signal handling for graceful shutdown

use std::sync::Arc;
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{error, info};

use crate::state::AppState;

/// Register handlers for SIGTERM and SIGINT
pub fn shutdown_signals() -> std::io::Result<Signals> {
    Signals::new([signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT])
}

/// Wait for the first shutdown signal, then release the countdown's tick source
pub async fn shutdown_signal(mut signals: Signals, state: Arc<AppState>) {
    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }

    if let Err(e) = state.shutdown() {
        error!("Failed to release tick source: {}", e);
    }
}
