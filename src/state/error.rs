//! State access errors

/// Failures while touching the shared application state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to lock {0}: lock poisoned")]
    Poisoned(&'static str),
}
