//! Calendar date parsing for front matter, without timezone dependencies.
//!
//! Post dates are written as `YYYY-MM-DD` and shown in newsletters in the
//! long English form `Month DD, YYYY`.
//!
//! # Examples
//!
//! ```ignore
//! let date = PostDate::parse("2024-03-05").unwrap();
//! assert_eq!(date.to_long(), "March 05, 2024");
//! ```

use thiserror::Error;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A date literal that could not be read as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date `{input}`: {reason}")]
pub struct DateParseError {
    pub input: String,
    pub reason: String,
}

impl DateParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Calendar date with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PostDate {
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse `YYYY-MM-DD`.
    ///
    /// Month and day may omit their leading zero (`2024-3-5`); the year must
    /// be four digits and nothing may follow the day.
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let mut parts = s.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateParseError::new(s, "expected YYYY-MM-DD"));
        };

        let year = parse_digits(year, 4, 4)
            .ok_or_else(|| DateParseError::new(s, "year must be four digits"))?;
        let month = parse_digits(month, 1, 2)
            .ok_or_else(|| DateParseError::new(s, "month must be one or two digits"))?;
        let day = parse_digits(day, 1, 2)
            .ok_or_else(|| DateParseError::new(s, "day must be one or two digits"))?;

        #[allow(clippy::cast_possible_truncation)] // bounded by digit counts above
        let date = Self::from_ymd(year as u16, month as u8, day as u8);
        date.validate().map_err(|reason| DateParseError::new(s, reason))?;
        Ok(date)
    }

    fn validate(self) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err(format!("month is invalid: {}", self.month));
        }
        let max_days = Self::days_in_month(self.year, self.month);
        if self.day == 0 || self.day > max_days {
            return Err(format!("day is invalid: {}", self.day));
        }
        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as `Month DD, YYYY` (e.g. `March 05, 2024`).
    pub fn to_long(self) -> String {
        format!(
            "{} {:02}, {:04}",
            MONTHS[(self.month - 1) as usize],
            self.day,
            self.year
        )
    }
}

/// Parse an ASCII decimal of `min..=max` digits.
#[inline]
fn parse_digits(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let date = PostDate::parse("2024-03-05").unwrap();
        assert_eq!(date, PostDate::from_ymd(2024, 3, 5));
        assert_eq!(date.to_long(), "March 05, 2024");
    }

    #[test]
    fn test_unpadded_month_and_day() {
        let date = PostDate::parse("2023-7-4").unwrap();
        assert_eq!(date.to_long(), "July 04, 2023");
    }

    #[test]
    fn test_all_months() {
        for (i, name) in MONTHS.iter().enumerate() {
            let date = PostDate::from_ymd(2024, (i + 1) as u8, 15);
            assert!(date.to_long().starts_with(name));
        }
    }

    #[test]
    fn test_leap_year() {
        assert!(PostDate::parse("2024-02-29").is_ok());
        assert!(PostDate::parse("2000-02-29").is_ok());
        assert!(PostDate::parse("2023-02-29").is_err());
        assert!(PostDate::parse("1900-02-29").is_err());
    }

    #[test]
    fn test_invalid_dates() {
        assert!(PostDate::parse("").is_err());
        assert!(PostDate::parse("yesterday").is_err());
        assert!(PostDate::parse("2024-13-01").is_err());
        assert!(PostDate::parse("2024-04-31").is_err());
        assert!(PostDate::parse("2024-00-10").is_err());
        assert!(PostDate::parse("24-01-01").is_err());
        assert!(PostDate::parse("2024-01-01-01").is_err());
        assert!(PostDate::parse("2024-01-01 10:00:00").is_err());
    }

    #[test]
    fn test_error_mentions_input() {
        let err = PostDate::parse("2024/01/01").unwrap_err();
        assert_eq!(err.input, "2024/01/01");
        assert!(err.to_string().contains("2024/01/01"));
    }
}
