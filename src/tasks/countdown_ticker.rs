//! Periodic tick source for a countdown run

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error};

use crate::state::{AppState, TickOutcome};

/// Period between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn the tick source for run `epoch`.
///
/// The first tick fires one full period after spawning. The task exits on its
/// own when the run finishes or no longer accepts its ticks; pausing and
/// resetting abort it through the returned handle.
pub fn spawn_countdown_ticker(state: Arc<AppState>, epoch: u64) -> JoinHandle<()> {
    tokio::spawn(countdown_ticker_task(state, epoch))
}

async fn countdown_ticker_task(state: Arc<AppState>, epoch: u64) {
    debug!("Starting tick source for run {}", epoch);

    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick(epoch) {
            Ok(TickOutcome::Ticked { .. }) => {}
            Ok(TickOutcome::Finished) => break,
            Ok(TickOutcome::Ignored) => {
                debug!("Run {} no longer accepts ticks", epoch);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }

    debug!("Tick source for run {} stopped", epoch);
}
