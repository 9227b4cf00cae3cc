//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use super::{
    Countdown, CountdownSnapshot, InputEdit, InputOutcome, PauseOutcome, PendingInput,
    StartOutcome, StateError, TickOutcome,
};
use crate::{tasks::spawn_countdown_ticker, view::TimerView};

/// The running tick source and the run it belongs to
#[derive(Debug)]
struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

/// Main application state: the countdown, its tick source and server metadata
#[derive(Debug)]
pub struct AppState {
    countdown: Mutex<Countdown>,
    /// Tick source of the current run, if any.
    /// Lock order: `ticker` before `countdown`.
    ticker: Mutex<Option<Ticker>>,
    /// Width of the text progress bar in rendered views
    pub bar_width: usize,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel publishing a snapshot after every change
    pub snapshot_tx: watch::Sender<CountdownSnapshot>,
}

impl AppState {
    pub fn new(port: u16, host: String, input: PendingInput, bar_width: usize) -> Self {
        let countdown = Countdown::with_input(input);
        let (snapshot_tx, _) = watch::channel(countdown.snapshot());

        Self {
            countdown: Mutex::new(countdown),
            ticker: Mutex::new(None),
            bar_width,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            snapshot_tx,
        }
    }

    fn lock_countdown(&self) -> Result<MutexGuard<'_, Countdown>, StateError> {
        self.countdown.lock().map_err(|_| StateError::Poisoned("countdown"))
    }

    fn lock_ticker(&self) -> Result<MutexGuard<'_, Option<Ticker>>, StateError> {
        self.ticker.lock().map_err(|_| StateError::Poisoned("ticker"))
    }

    /// Publish the current state. Callers hold the `countdown` guard so
    /// publications happen in the same order as the changes they describe.
    fn publish(&self, countdown: &Countdown) {
        self.snapshot_tx.send_replace(countdown.snapshot());
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Stop the tick source, if one is active
    fn release_ticker(slot: &mut Option<Ticker>) {
        if let Some(ticker) = slot.take() {
            debug!("Releasing tick source of run {}", ticker.epoch);
            ticker.handle.abort();
        }
    }

    /// Press Start: begin a new run from the pending input or resume a paused one
    pub fn start(self: &Arc<Self>) -> Result<StartOutcome, StateError> {
        let mut ticker = self.lock_ticker()?;
        let (outcome, epoch) = {
            let mut countdown = self.lock_countdown()?;
            let outcome = countdown.start();
            if outcome.began_ticking() {
                self.publish(&countdown);
            }
            (outcome, countdown.epoch())
        };

        match outcome {
            StartOutcome::Started { target } => info!("Countdown started for {}s", target),
            StartOutcome::Resumed { remaining } => info!("Countdown resumed with {}s left", remaining),
            StartOutcome::AlreadyRunning => debug!("Start ignored: countdown already running"),
            StartOutcome::EmptyDuration => debug!("Start ignored: duration is zero"),
        }

        if outcome.began_ticking() {
            Self::release_ticker(&mut ticker);
            *ticker = Some(Ticker {
                epoch,
                handle: spawn_countdown_ticker(Arc::clone(self), epoch),
            });
            drop(ticker);
            self.record_action("start");
        }

        Ok(outcome)
    }

    /// Press Pause: stop ticking, keep the remaining time
    pub fn pause(&self) -> Result<PauseOutcome, StateError> {
        let mut ticker = self.lock_ticker()?;
        let outcome = {
            let mut countdown = self.lock_countdown()?;
            let outcome = countdown.pause();
            if matches!(outcome, PauseOutcome::Paused { .. }) {
                self.publish(&countdown);
            }
            outcome
        };

        if let PauseOutcome::Paused { remaining } = outcome {
            Self::release_ticker(&mut ticker);
            drop(ticker);
            info!("Countdown paused with {}s left", remaining);
            self.record_action("pause");
        } else {
            debug!("Pause ignored: countdown not running");
        }

        Ok(outcome)
    }

    /// Press Reset: stop ticking and clear the run
    pub fn reset(&self) -> Result<CountdownSnapshot, StateError> {
        let mut ticker = self.lock_ticker()?;
        let snapshot = {
            let mut countdown = self.lock_countdown()?;
            countdown.reset();
            self.publish(&countdown);
            countdown.snapshot()
        };
        Self::release_ticker(&mut ticker);
        drop(ticker);

        info!("Countdown reset");
        self.record_action("reset");
        Ok(snapshot)
    }

    /// Edit the pending input; refused while running
    pub fn edit_input(&self, edit: &InputEdit) -> Result<InputOutcome, StateError> {
        let outcome = {
            let mut countdown = self.lock_countdown()?;
            let outcome = countdown.edit_input(edit);
            if matches!(outcome, InputOutcome::Updated(_)) {
                self.publish(&countdown);
            }
            outcome
        };

        match outcome {
            InputOutcome::Updated(input) => {
                debug!("Pending input set to {}h {}m {}s", input.hours, input.minutes, input.seconds);
                self.record_action("input");
            }
            InputOutcome::Locked => debug!("Input edit refused: countdown running"),
        }

        Ok(outcome)
    }

    /// Apply one tick from the tick source of run `epoch`
    pub fn tick(&self, epoch: u64) -> Result<TickOutcome, StateError> {
        let outcome = {
            let mut countdown = self.lock_countdown()?;
            let outcome = countdown.tick(epoch);
            if outcome != TickOutcome::Ignored {
                self.publish(&countdown);
            }
            outcome
        };

        match outcome {
            TickOutcome::Ticked { remaining } => debug!("Tick: {}s left", remaining),
            TickOutcome::Finished => {
                info!("Countdown finished");
                // The source stops itself; only forget its handle
                let mut ticker = self.lock_ticker()?;
                if ticker.as_ref().is_some_and(|t| t.epoch == epoch) {
                    ticker.take();
                }
            }
            TickOutcome::Ignored => debug!("Ignored tick from run {}", epoch),
        }

        Ok(outcome)
    }

    /// Release the tick source on teardown
    pub fn shutdown(&self) -> Result<(), StateError> {
        let mut ticker = self.lock_ticker()?;
        Self::release_ticker(&mut ticker);
        Ok(())
    }

    /// Whether a tick source is currently held
    pub fn has_ticker(&self) -> bool {
        self.ticker
            .lock()
            .map(|ticker| ticker.as_ref().is_some_and(|t| !t.handle.is_finished()))
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> Result<CountdownSnapshot, StateError> {
        self.lock_countdown().map(|countdown| countdown.snapshot())
    }

    /// Render the widget from the current state
    pub fn view(&self) -> Result<TimerView, StateError> {
        let snapshot = self.snapshot()?;
        Ok(TimerView::render(&snapshot, self.bar_width))
    }

    /// Subscribe to snapshots published after every change
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
