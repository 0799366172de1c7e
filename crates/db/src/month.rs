//! Month-granularity time unit for the planner.
//!
//! A `Month` is the atomic unit of the planner's time axis, stored in
//! documents as a `"YYYY-MM"` string. Internally it is a single integer
//! (`year * 12 + month0`) so ordering and range arithmetic never fall back
//! to string comparison. Strings that do not match the exact `YYYY-MM`
//! shape parse to `None` and are excluded from any range computation.

use std::fmt;

/// A calendar month, totally ordered by its integer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(i32);

impl Month {
    /// Parse a `"YYYY-MM"` key into a month.
    ///
    /// Accepts exactly four digits, a dash, and two digits. Anything else
    /// (empty string, missing padding, extra segments, non-numeric parts)
    /// returns `None`.
    pub fn parse(key: &str) -> Option<Month> {
        let bytes = key.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return None;
        }
        if !bytes[..4].iter().all(u8::is_ascii_digit)
            || !bytes[5..].iter().all(u8::is_ascii_digit)
        {
            return None;
        }
        let year: i32 = key[..4].parse().ok()?;
        let month: i32 = key[5..].parse().ok()?;
        Some(Month(year * 12 + (month - 1)))
    }

    /// Build a month from a year and a 1-based month number.
    pub fn from_parts(year: i32, month1: u32) -> Month {
        Month(year * 12 + (month1 as i32 - 1))
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.0.div_euclid(12)
    }

    /// The 1-based month number within the year.
    pub fn month1(self) -> u32 {
        (self.0.rem_euclid(12) + 1) as u32
    }

    /// The raw integer index (`year * 12 + month0`).
    pub fn index(self) -> i32 {
        self.0
    }

    /// The month `offset` months after this one (negative for earlier).
    pub fn offset(self, offset: i32) -> Month {
        Month(self.0 + offset)
    }

    /// Render the `"YYYY-MM"` document key.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month1())
    }
}
