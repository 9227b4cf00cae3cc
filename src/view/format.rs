//! Time readout and progress formatting

/// Hours, minutes and seconds of a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

/// Format seconds as zero-padded `HH:MM:SS`
pub fn format_hms(total_seconds: u64) -> String {
    let Hms { hours, minutes, seconds } = Hms::from_seconds(total_seconds);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Remaining share of the run, 0 to 100. Zero when no run has a target.
pub fn progress_percentage(remaining_seconds: u64, target_seconds: u64) -> f64 {
    if target_seconds == 0 {
        return 0.0;
    }
    remaining_seconds as f64 / target_seconds as f64 * 100.0
}

/// Fixed-width text bar filled in proportion to `percentage`, rounded down
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = ((width as f64) * ratio).floor() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
