//! Phone number input mask.
//!
//! Pure string transform: strip everything that is not an ASCII digit, cap
//! at 10 digits, and format progressively as `(XXX) XXX-XXXX`. Stateless
//! beyond the formatted string.

use serde::{Deserialize, Serialize};

/// Digits kept by the mask: `(XXX) XXX-XXXX`.
const MAX_DIGITS: usize = 10;

/// Format a raw phone string into the `(XXX) XXX-XXXX` mask.
///
/// Partial input formats progressively: `"415"` becomes `"(415"`, `"4155"`
/// becomes `"(415) 5"`. Empty input (or input without digits) yields an
/// empty string.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect();

    let mut formatted = String::with_capacity(14);
    if !digits.is_empty() {
        formatted.push('(');
        formatted.push_str(&digits[..digits.len().min(3)]);
    }
    if digits.len() > 3 {
        formatted.push_str(") ");
        formatted.push_str(&digits[3..digits.len().min(6)]);
    }
    if digits.len() > 6 {
        formatted.push('-');
        formatted.push_str(&digits[6..]);
    }
    formatted
}

/// Reactive-style holder for a phone field: each input event replaces the
/// raw value and stores the re-formatted result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInput {
    value: String,
}

impl PhoneInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an input event: format `raw` and keep the result.
    pub fn set(&mut self, raw: &str) -> &str {
        self.value = format_phone(raw);
        &self.value
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_progressively() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("4"), "(4");
        assert_eq!(format_phone("415"), "(415");
        assert_eq!(format_phone("4155"), "(415) 5");
        assert_eq!(format_phone("415555"), "(415) 555");
        assert_eq!(format_phone("4155551"), "(415) 555-1");
        assert_eq!(format_phone("4155551234"), "(415) 555-1234");
    }

    #[test]
    fn strips_non_digits() {
        assert_eq!(format_phone("abc"), "");
        assert_eq!(format_phone("+1 415-555-1234"), "(141) 555-5123");
        assert_eq!(format_phone("(415) 555-1234"), "(415) 555-1234");
    }

    #[test]
    fn caps_at_ten_digits() {
        assert_eq!(format_phone("41555512349999"), "(415) 555-1234");
    }

    #[test]
    fn input_holder_reformats_on_set() {
        let mut input = PhoneInput::new();
        assert_eq!(input.set("415555"), "(415) 555");
        assert_eq!(input.set("4155551234"), "(415) 555-1234");
        assert_eq!(input.value(), "(415) 555-1234");
    }

    proptest! {
        #[test]
        fn keeps_first_ten_digits_in_order(raw in ".*") {
            let out = format_phone(&raw);
            let expected: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(10)
                .collect();
            let out_digits: String = out.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(out_digits, expected);
            prop_assert!(out.len() <= 14);
        }

        #[test]
        fn formatting_is_idempotent(raw in ".*") {
            let once = format_phone(&raw);
            prop_assert_eq!(format_phone(&once), once.clone());
        }
    }
}
