//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::PendingInput;

/// Widest progress bar accepted on the command line
pub const MAX_BAR_WIDTH: u64 = 200;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer with start/pause/reset controls over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Preloaded hours input (clamped to 0-99)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub hours: i64,

    /// Preloaded minutes input (clamped to 0-59)
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub minutes: i64,

    /// Preloaded seconds input (clamped to 0-59)
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub seconds: i64,

    /// Width of the text progress bar (0-200)
    #[arg(
        long,
        default_value = "30",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_BAR_WIDTH),
    )]
    pub bar_width: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Pending input preloaded from the command line
    pub fn initial_input(&self) -> PendingInput {
        PendingInput::clamped(self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.initial_input().is_empty());
    }

    #[test]
    fn preloaded_input_is_clamped() {
        let config = Config::try_parse_from([
            "countdown-timer", "--hours", "150", "-m", "30", "-s", "-5", "-v",
        ])
        .unwrap();
        assert_eq!(config.initial_input(), PendingInput { hours: 99, minutes: 30, seconds: 0 });
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn bar_width_is_bounded() {
        let config = Config::try_parse_from(["countdown-timer", "--bar-width", "200"]).unwrap();
        assert_eq!(config.bar_width, 200);
        assert!(Config::try_parse_from(["countdown-timer", "--bar-width", "201"]).is_err());
        assert!(Config::try_parse_from(["countdown-timer", "--bar-width", "18446744073709551615"]).is_err());
    }
}
