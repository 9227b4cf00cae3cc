//! Display module
//!
//! Turns countdown snapshots into what the widget shows.

pub mod format;
pub mod timer_view;

pub use format::{format_hms, progress_bar, progress_percentage, Hms};
pub use timer_view::{ButtonControl, Buttons, InputControl, TimerView};
