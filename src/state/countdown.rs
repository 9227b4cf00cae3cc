//! Countdown state machine

use serde::{Deserialize, Serialize};

use super::duration_input::{InputEdit, PendingInput};

/// Result of pressing Start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run began from the pending input
    Started { target: u64 },
    /// A paused run continues
    Resumed { remaining: u64 },
    AlreadyRunning,
    /// Nothing to count down: remaining and pending input are both zero
    EmptyDuration,
}

impl StartOutcome {
    pub fn began_ticking(&self) -> bool {
        matches!(self, StartOutcome::Started { .. } | StartOutcome::Resumed { .. })
    }
}

/// Result of pressing Pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    Paused { remaining: u64 },
    NotRunning,
}

/// Result of one periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or the tick belongs to an earlier run
    Ignored,
    Ticked { remaining: u64 },
    /// Remaining reached zero and the timer stopped itself
    Finished,
}

/// Result of editing the pending input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Updated(PendingInput),
    /// Inputs are disabled while running
    Locked,
}

/// Immutable copy of the countdown published to watchers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub remaining_seconds: u64,
    pub target_seconds: u64,
    pub running: bool,
    pub input: PendingInput,
    pub epoch: u64,
}

impl CountdownSnapshot {
    /// Start is available when stopped with either a paused run or a non-empty input
    pub fn can_start(&self) -> bool {
        !self.running && (self.remaining_seconds > 0 || !self.input.is_empty())
    }
}

/// A single countdown timer.
///
/// `remaining_seconds` is the only source of truth for the display.
/// `target_seconds` is captured once per run when starting from zero and
/// cleared on reset, so `remaining_seconds <= target_seconds` always holds.
/// Each transition into the running state bumps `epoch`; ticks must present
/// the current epoch to take effect.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining_seconds: u64,
    target_seconds: u64,
    running: bool,
    input: PendingInput,
    epoch: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopped countdown with a preloaded pending input
    pub fn with_input(input: PendingInput) -> Self {
        Self { input, ..Self::default() }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn target_seconds(&self) -> u64 {
        self.target_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn input(&self) -> PendingInput {
        self.input
    }

    /// Epoch of the current (or most recent) run of the tick source
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether Start would do anything right now
    pub fn can_start(&self) -> bool {
        self.snapshot().can_start()
    }

    pub fn start(&mut self) -> StartOutcome {
        if self.running {
            return StartOutcome::AlreadyRunning;
        }

        let outcome = if self.remaining_seconds == 0 {
            let total = self.input.total_seconds();
            if total == 0 {
                return StartOutcome::EmptyDuration;
            }
            self.remaining_seconds = total;
            self.target_seconds = total;
            StartOutcome::Started { target: total }
        } else {
            StartOutcome::Resumed { remaining: self.remaining_seconds }
        };

        self.running = true;
        self.epoch += 1;
        outcome
    }

    pub fn pause(&mut self) -> PauseOutcome {
        if !self.running {
            return PauseOutcome::NotRunning;
        }
        self.running = false;
        PauseOutcome::Paused { remaining: self.remaining_seconds }
    }

    /// Stop and clear the run. The pending input is kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = 0;
        self.target_seconds = 0;
    }

    /// Apply one tick issued by the tick source of `epoch`
    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        if !self.running || epoch != self.epoch {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Ticked { remaining: self.remaining_seconds }
        }
    }

    pub fn edit_input(&mut self, edit: &InputEdit) -> InputOutcome {
        if self.running {
            return InputOutcome::Locked;
        }
        self.input.apply(edit);
        InputOutcome::Updated(self.input)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            remaining_seconds: self.remaining_seconds,
            target_seconds: self.target_seconds,
            running: self.running,
            input: self.input,
            epoch: self.epoch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::duration_input::FieldValue;

    fn countdown(hours: i64, minutes: i64, seconds: i64) -> Countdown {
        Countdown::with_input(PendingInput::clamped(hours, minutes, seconds))
    }

    fn run_to_end(timer: &mut Countdown) -> u32 {
        let epoch = timer.epoch();
        let mut ticks = 0;
        while timer.is_running() {
            timer.tick(epoch);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn start_derives_remaining_from_input() {
        for (h, m, s) in [(0, 0, 1), (1, 1, 1), (99, 59, 59), (0, 30, 0), (2, 0, 59)] {
            let mut timer = countdown(h, m, s);
            let expected = (h * 3600 + m * 60 + s) as u64;
            assert_eq!(timer.start(), StartOutcome::Started { target: expected });
            assert_eq!(timer.remaining_seconds(), expected);
            assert_eq!(timer.target_seconds(), expected);
            assert!(timer.is_running());
        }
    }

    #[test]
    fn start_with_empty_input_is_ignored() {
        let mut timer = Countdown::new();
        assert_eq!(timer.start(), StartOutcome::EmptyDuration);
        assert!(!timer.is_running());
        assert_eq!(timer.epoch(), 0);
        assert!(!timer.can_start());
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut timer = countdown(0, 0, 10);
        timer.start();
        let epoch = timer.epoch();
        assert_eq!(timer.start(), StartOutcome::AlreadyRunning);
        assert_eq!(timer.epoch(), epoch);
        assert_eq!(timer.remaining_seconds(), 10);
    }

    #[test]
    fn five_second_run_stops_after_five_ticks() {
        let mut timer = countdown(0, 0, 5);
        timer.start();
        assert_eq!(run_to_end(&mut timer), 5);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn last_tick_reports_finished() {
        let mut timer = countdown(0, 0, 2);
        timer.start();
        let epoch = timer.epoch();
        assert_eq!(timer.tick(epoch), TickOutcome::Ticked { remaining: 1 });
        assert_eq!(timer.tick(epoch), TickOutcome::Finished);
        assert_eq!(timer.tick(epoch), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn pause_keeps_remaining_and_resume_keeps_target() {
        let mut timer = countdown(0, 1, 0);
        timer.start();
        let epoch = timer.epoch();
        for _ in 0..20 {
            timer.tick(epoch);
        }
        assert_eq!(timer.pause(), PauseOutcome::Paused { remaining: 40 });
        assert_eq!(timer.tick(epoch), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 40);

        assert_eq!(timer.start(), StartOutcome::Resumed { remaining: 40 });
        assert_eq!(timer.target_seconds(), 60);
        assert!(timer.epoch() > epoch);
    }

    #[test]
    fn stale_epoch_ticks_are_ignored() {
        let mut timer = countdown(0, 0, 30);
        timer.start();
        let stale = timer.epoch();
        timer.pause();
        timer.start();
        assert_eq!(timer.tick(stale), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 30);
        assert_eq!(timer.tick(timer.epoch()), TickOutcome::Ticked { remaining: 29 });
    }

    #[test]
    fn pause_when_idle_is_ignored() {
        let mut timer = countdown(0, 0, 3);
        assert_eq!(timer.pause(), PauseOutcome::NotRunning);
    }

    #[test]
    fn reset_from_any_state_clears_the_run() {
        let mut idle = countdown(0, 0, 9);
        let mut running = countdown(0, 0, 9);
        running.start();
        let mut paused = countdown(0, 0, 9);
        paused.start();
        paused.tick(paused.epoch());
        paused.pause();

        for timer in [&mut idle, &mut running, &mut paused] {
            timer.reset();
            assert_eq!(timer.remaining_seconds(), 0);
            assert_eq!(timer.target_seconds(), 0);
            assert!(!timer.is_running());
            assert_eq!(timer.input(), PendingInput::clamped(0, 0, 9));
        }
    }

    #[test]
    fn remaining_never_exceeds_target() {
        let mut timer = countdown(0, 0, 4);
        timer.start();
        let epoch = timer.epoch();
        while timer.is_running() {
            assert!(timer.remaining_seconds() <= timer.target_seconds());
            timer.tick(epoch);
        }
        assert!(timer.remaining_seconds() <= timer.target_seconds());
    }

    #[test]
    fn input_is_locked_while_running() {
        let mut timer = countdown(0, 0, 5);
        timer.start();
        let edit = InputEdit { hours: Some(FieldValue::Number(3)), ..Default::default() };
        assert_eq!(timer.edit_input(&edit), InputOutcome::Locked);
        assert_eq!(timer.input().hours, 0);

        timer.pause();
        assert_eq!(
            timer.edit_input(&edit),
            InputOutcome::Updated(PendingInput::clamped(3, 0, 5))
        );
    }

    #[test]
    fn paused_timer_can_resume_with_empty_input() {
        let mut timer = countdown(0, 0, 5);
        timer.start();
        timer.pause();
        timer.edit_input(&InputEdit {
            seconds: Some(FieldValue::Number(0)),
            ..Default::default()
        });
        assert!(timer.can_start());
        assert_eq!(timer.start(), StartOutcome::Resumed { remaining: 5 });
    }
}
