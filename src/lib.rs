//! Countdown Timer - a single countdown timer served over a local HTTP
//! control surface
//!
//! The library holds the countdown state machine, its display formatting,
//! the one-second tick source and the HTTP endpoints mirroring the widget's
//! controls.

pub mod config;
pub mod state;
pub mod view;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Countdown, PendingInput};
pub use view::TimerView;
pub use api::create_router;
