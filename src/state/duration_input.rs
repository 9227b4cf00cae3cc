//! Pending duration input: the three clamped hour/minute/second fields

use serde::{Deserialize, Serialize};

/// Upper bound of the hours field
pub const MAX_HOURS: u32 = 99;
/// Upper bound of the minutes and seconds fields
pub const MAX_MINUTES: u32 = 59;
pub const MAX_SECONDS: u32 = 59;

/// One of the three duration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// Largest value the field accepts
    pub fn max(self) -> u32 {
        match self {
            Field::Hours => MAX_HOURS,
            Field::Minutes => MAX_MINUTES,
            Field::Seconds => MAX_SECONDS,
        }
    }

    /// Clamp any integer into the field's range
    pub fn clamp(self, value: i64) -> u32 {
        // max() is at most 99, so the cast back is lossless
        value.clamp(0, i64::from(self.max())) as u32
    }
}

/// Requested duration before the timer starts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInput {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl PendingInput {
    /// Build an input from arbitrary integers, clamping each field
    pub fn clamped(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours: Field::Hours.clamp(hours),
            minutes: Field::Minutes.clamp(minutes),
            seconds: Field::Seconds.clamp(seconds),
        }
    }

    /// Total requested duration in seconds
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn is_empty(&self) -> bool {
        self.total_seconds() == 0
    }

    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::Hours => self.hours,
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
        }
    }

    /// Set a single field from an integer, clamping it to the field's range
    pub fn set(&mut self, field: Field, value: i64) {
        let value = field.clamp(value);
        match field {
            Field::Hours => self.hours = value,
            Field::Minutes => self.minutes = value,
            Field::Seconds => self.seconds = value,
        }
    }

    /// Set a single field from raw text typed into it
    pub fn set_text(&mut self, field: Field, text: &str) {
        self.set(field, coerce_text(text));
    }

    /// Apply a partial edit; fields left as `None` keep their value
    pub fn apply(&mut self, edit: &InputEdit) {
        for field in [Field::Hours, Field::Minutes, Field::Seconds] {
            if let Some(value) = edit.get(field) {
                match value {
                    FieldValue::Number(n) => self.set(field, *n),
                    FieldValue::Text(text) => self.set_text(field, text),
                }
            }
        }
    }
}

/// A value typed into a field, either already numeric or raw text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

/// A partial edit of the pending input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEdit {
    #[serde(default)]
    pub hours: Option<FieldValue>,
    #[serde(default)]
    pub minutes: Option<FieldValue>,
    #[serde(default)]
    pub seconds: Option<FieldValue>,
}

impl InputEdit {
    fn get(&self, field: Field) -> Option<&FieldValue> {
        match field {
            Field::Hours => self.hours.as_ref(),
            Field::Minutes => self.minutes.as_ref(),
            Field::Seconds => self.seconds.as_ref(),
        }
    }
}

/// Coerce typed text into an integer by reading its leading integer prefix.
///
/// Leading whitespace is skipped, then an optional sign and a run of ASCII
/// digits are read; everything after that is ignored. Text without any
/// leading digits is zero. Values too large for `i64` saturate.
pub fn coerce_text(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in rest.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_hours_above_range() {
        let mut input = PendingInput::default();
        input.set(Field::Hours, 150);
        assert_eq!(input.hours, 99);
    }

    #[test]
    fn clamps_negative_seconds_to_zero() {
        let mut input = PendingInput::default();
        input.set(Field::Seconds, -5);
        assert_eq!(input.seconds, 0);
    }

    #[test]
    fn minutes_cap_at_59() {
        assert_eq!(PendingInput::clamped(0, 60, 0).minutes, 59);
    }

    #[test]
    fn total_seconds_combines_fields() {
        assert_eq!(PendingInput::clamped(1, 1, 1).total_seconds(), 3661);
        assert_eq!(PendingInput::clamped(99, 59, 59).total_seconds(), 359_999);
        assert!(PendingInput::default().is_empty());
    }

    #[test]
    fn coerces_text_like_typed_input() {
        assert_eq!(coerce_text("42"), 42);
        assert_eq!(coerce_text("12abc"), 12);
        assert_eq!(coerce_text("abc"), 0);
        assert_eq!(coerce_text(""), 0);
        assert_eq!(coerce_text(" 7"), 7);
        assert_eq!(coerce_text("-5"), -5);
        assert_eq!(coerce_text("+3"), 3);
        assert_eq!(coerce_text("3.9"), 3);
        assert_eq!(coerce_text("-"), 0);
        assert_eq!(coerce_text("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn text_edits_are_coerced_then_clamped() {
        let mut input = PendingInput::default();
        input.set_text(Field::Hours, "150");
        input.set_text(Field::Minutes, "oops");
        input.set_text(Field::Seconds, "-5");
        assert_eq!(input, PendingInput { hours: 99, minutes: 0, seconds: 0 });
    }

    #[test]
    fn partial_edit_keeps_other_fields() {
        let mut input = PendingInput::clamped(1, 2, 3);
        input.apply(&InputEdit {
            minutes: Some(FieldValue::Text("45".to_string())),
            ..Default::default()
        });
        assert_eq!(input, PendingInput { hours: 1, minutes: 45, seconds: 3 });
    }
}
