//! Progress reporter background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    state::{AppState, CountdownSnapshot},
    view::TimerView,
};

/// Transition between two consecutive snapshots worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    Started,
    Resumed,
    Paused,
    Finished,
    Cleared,
    Progress,
    InputChanged,
}

/// Classify the change from `prev` to `next`
pub fn classify(prev: &CountdownSnapshot, next: &CountdownSnapshot) -> RunEvent {
    match (prev.running, next.running) {
        (false, true) if prev.remaining_seconds == 0 => RunEvent::Started,
        (false, true) => RunEvent::Resumed,
        (true, false) if next.remaining_seconds == 0 && next.target_seconds > 0 => RunEvent::Finished,
        (true, false) if next.target_seconds == 0 => RunEvent::Cleared,
        (true, false) => RunEvent::Paused,
        (false, false) if prev.target_seconds > 0 && next.target_seconds == 0 => RunEvent::Cleared,
        (true, true) if prev.epoch != next.epoch => RunEvent::Resumed,
        _ if prev.input != next.input => RunEvent::InputChanged,
        _ => RunEvent::Progress,
    }
}

/// Background task that logs countdown transitions as they are published
pub async fn progress_reporter_task(state: Arc<AppState>) {
    info!("Starting progress reporter task");

    let mut rx = state.subscribe();
    let mut prev = *rx.borrow_and_update();

    while rx.changed().await.is_ok() {
        let next = *rx.borrow_and_update();
        let line = TimerView::render(&next, state.bar_width).line();

        match classify(&prev, &next) {
            RunEvent::Started => info!("Run started: {}", line),
            RunEvent::Resumed => info!("Run resumed: {}", line),
            RunEvent::Paused => info!("Run paused: {}", line),
            RunEvent::Finished => info!("Run finished: {}", line),
            RunEvent::Cleared => info!("Run cleared: {}", line),
            RunEvent::InputChanged => debug!(
                "Pending input: {:02}:{:02}:{:02}",
                next.input.hours, next.input.minutes, next.input.seconds
            ),
            RunEvent::Progress => debug!("{}", line),
        }

        prev = next;
    }

    debug!("Snapshot channel closed, progress reporter exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Countdown, PendingInput};

    #[test]
    fn classifies_a_full_run() {
        let mut timer = Countdown::with_input(PendingInput::clamped(0, 0, 2));
        let idle = timer.snapshot();
        timer.start();
        let started = timer.snapshot();
        assert_eq!(classify(&idle, &started), RunEvent::Started);

        timer.tick(timer.epoch());
        let ticked = timer.snapshot();
        assert_eq!(classify(&started, &ticked), RunEvent::Progress);

        timer.tick(timer.epoch());
        assert_eq!(classify(&ticked, &timer.snapshot()), RunEvent::Finished);
    }

    #[test]
    fn classifies_pause_resume_and_reset() {
        let mut timer = Countdown::with_input(PendingInput::clamped(0, 0, 9));
        timer.start();
        let running = timer.snapshot();
        timer.pause();
        let paused = timer.snapshot();
        assert_eq!(classify(&running, &paused), RunEvent::Paused);

        timer.start();
        assert_eq!(classify(&paused, &timer.snapshot()), RunEvent::Resumed);

        let before = timer.snapshot();
        timer.reset();
        assert_eq!(classify(&before, &timer.snapshot()), RunEvent::Cleared);
    }
}
