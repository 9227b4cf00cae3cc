//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server.

pub mod countdown_ticker;
pub mod progress_reporter;

// Re-export main functions
pub use countdown_ticker::{spawn_countdown_ticker, TICK_INTERVAL};
pub use progress_reporter::progress_reporter_task;
