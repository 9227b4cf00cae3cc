//! State management module
//!
//! This module contains the countdown state machine, its inputs and the
//! shared application state wrapping it.

pub mod app_state;
pub mod countdown;
pub mod duration_input;
pub mod error;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{
    Countdown, CountdownSnapshot, InputOutcome, PauseOutcome, StartOutcome, TickOutcome,
};
pub use duration_input::{coerce_text, Field, FieldValue, InputEdit, PendingInput};
pub use error::StateError;
