//! Date parsing for transaction entry
//!
//! Dates are calendar days in `yyyy-MM-dd` form. Parsing is strict and
//! returns an error; falling back to today is a caller decision, made visible
//! through [`DateInput`].

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};

/// The date format used on disk and at the prompt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `yyyy-MM-dd` date
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| LedgerError::DateFormat(format!("'{}' ({}), expected yyyy-MM-dd", trimmed, e)))
}

/// Outcome of reading a date with a fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// The input was a valid date
    Parsed(NaiveDate),
    /// The input was not a valid date, so `today` was used
    FellBack { input: String, today: NaiveDate },
}

impl DateInput {
    /// The date to record
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Parsed(date) => *date,
            Self::FellBack { today, .. } => *today,
        }
    }

    pub fn fell_back(&self) -> bool {
        matches!(self, Self::FellBack { .. })
    }
}

/// Parse a date, falling back to `today` when the input is not valid
pub fn parse_date_or(s: &str, today: NaiveDate) -> DateInput {
    match parse_date(s) {
        Ok(date) => DateInput::Parsed(date),
        Err(err) => {
            tracing::warn!(%err, "falling back to {}", today);
            DateInput::FellBack {
                input: s.to_string(),
                today,
            }
        }
    }
}

/// The local current date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-03-15\n").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_bad_input() {
        for input in ["", "15/03/2024", "2024-13-01", "2024-02-30", "yesterday"] {
            let err = parse_date(input).unwrap_err();
            assert!(matches!(err, LedgerError::DateFormat(_)), "input {:?}", input);
        }
    }

    #[test]
    fn test_fallback_is_observable() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

        let parsed = parse_date_or("2024-03-15", today);
        assert!(!parsed.fell_back());
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let fallback = parse_date_or("not a date", today);
        assert!(fallback.fell_back());
        assert_eq!(fallback.date(), today);
        assert_eq!(
            fallback,
            DateInput::FellBack {
                input: "not a date".into(),
                today
            }
        );
    }
}
