//! Rendered widget: readout, progress bar, inputs and buttons

use serde::{Deserialize, Serialize};

use super::format::{format_hms, progress_bar, progress_percentage, Hms};
use crate::state::{CountdownSnapshot, Field};

/// A numeric input control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputControl {
    pub field: Field,
    pub value: u32,
    pub min: u32,
    pub max: u32,
    pub enabled: bool,
}

/// A push button control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonControl {
    pub label: String,
    pub enabled: bool,
}

impl ButtonControl {
    fn new(label: &str, enabled: bool) -> Self {
        Self { label: label.to_string(), enabled }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    pub start: ButtonControl,
    pub pause: ButtonControl,
    pub reset: ButtonControl,
}

/// Everything the widget shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    /// `HH:MM:SS` readout
    pub display: String,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub remaining_seconds: u64,
    pub target_seconds: u64,
    pub running: bool,
    pub progress_percentage: f64,
    pub progress_bar: String,
    pub inputs: Vec<InputControl>,
    pub buttons: Buttons,
}

impl TimerView {
    pub fn render(snapshot: &CountdownSnapshot, bar_width: usize) -> Self {
        let hms = Hms::from_seconds(snapshot.remaining_seconds);
        let percentage = progress_percentage(snapshot.remaining_seconds, snapshot.target_seconds);
        let inputs_enabled = !snapshot.running;

        let inputs = [Field::Hours, Field::Minutes, Field::Seconds]
            .into_iter()
            .map(|field| InputControl {
                field,
                value: snapshot.input.get(field),
                min: 0,
                max: field.max(),
                enabled: inputs_enabled,
            })
            .collect();

        Self {
            display: format_hms(snapshot.remaining_seconds),
            hours: hms.hours,
            minutes: hms.minutes,
            seconds: hms.seconds,
            remaining_seconds: snapshot.remaining_seconds,
            target_seconds: snapshot.target_seconds,
            running: snapshot.running,
            progress_percentage: percentage,
            progress_bar: progress_bar(percentage, bar_width),
            inputs,
            buttons: Buttons {
                start: ButtonControl::new("Start", snapshot.can_start()),
                pause: ButtonControl::new("Pause", snapshot.running),
                reset: ButtonControl::new("Reset", true),
            },
        }
    }

    /// Single-line rendering used in logs
    pub fn line(&self) -> String {
        format!("{} {}", self.display, self.progress_bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Countdown, FieldValue, InputEdit, PendingInput};

    fn render(timer: &Countdown) -> TimerView {
        TimerView::render(&timer.snapshot(), 10)
    }

    #[test]
    fn idle_empty_timer_disables_start() {
        let view = render(&Countdown::new());
        assert_eq!(view.display, "00:00:00");
        assert!(!view.buttons.start.enabled);
        assert!(!view.buttons.pause.enabled);
        assert!(view.buttons.reset.enabled);
        assert!(view.inputs.iter().all(|input| input.enabled));
        assert_eq!(view.progress_percentage, 0.0);
    }

    #[test]
    fn running_timer_locks_inputs_and_start() {
        let mut timer = Countdown::with_input(PendingInput::clamped(1, 1, 1));
        timer.start();
        let view = render(&timer);
        assert_eq!(view.display, "01:01:01");
        assert_eq!((view.hours, view.minutes, view.seconds), (1, 1, 1));
        assert!(!view.buttons.start.enabled);
        assert!(view.buttons.pause.enabled);
        assert!(view.inputs.iter().all(|input| !input.enabled));
        assert_eq!(view.progress_percentage, 100.0);
        assert_eq!(view.progress_bar, "[##########]");
    }

    #[test]
    fn inputs_carry_their_bounds() {
        let view = render(&Countdown::with_input(PendingInput::clamped(4, 5, 6)));
        let bounds: Vec<_> = view.inputs.iter().map(|i| (i.field, i.value, i.max)).collect();
        assert_eq!(
            bounds,
            vec![(Field::Hours, 4, 99), (Field::Minutes, 5, 59), (Field::Seconds, 6, 59)]
        );
        assert!(view.buttons.start.enabled);
    }

    #[test]
    fn paused_run_can_resume_with_zeroed_inputs() {
        let mut timer = Countdown::with_input(PendingInput::clamped(0, 0, 8));
        timer.start();
        timer.pause();
        timer.edit_input(&InputEdit {
            seconds: Some(FieldValue::Number(0)),
            ..Default::default()
        });
        let view = render(&timer);
        assert!(view.buttons.start.enabled);
        assert_eq!(view.buttons.start.enabled, timer.can_start());

        timer.reset();
        let view = render(&timer);
        assert!(!view.buttons.start.enabled);
        assert_eq!(view.buttons.start.enabled, timer.can_start());
    }

    #[test]
    fn reset_renders_zero_readout() {
        let mut timer = Countdown::with_input(PendingInput::clamped(0, 2, 0));
        timer.start();
        timer.tick(timer.epoch());
        timer.reset();
        let view = render(&timer);
        assert_eq!(view.display, "00:00:00");
        assert_eq!(view.target_seconds, 0);
        assert_eq!(view.progress_bar, "[----------]");
    }
}
