//! Small parsers shared by the model and the analyzer.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Parse a currency amount like `"$1,234.56"`.
///
/// Thousands separators are removed first, then the leading currency symbol
/// is dropped and the remainder parsed as a decimal number.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned = raw.replace(',', "");
    let mut chars = cleaned.chars();
    if chars.next().is_none() {
        return Err(Error::parse("empty amount"));
    }
    let digits = chars.as_str();
    digits
        .parse::<f64>()
        .map_err(|e| Error::parse_with(format!("invalid amount '{raw}'"), e))
}

/// A calendar month in a given year, parsed from `"M-YYYY"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthYear {
    pub month: u32,
    pub year: i32,
}

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::validation(format!("month out of range: {month}")));
        }
        Ok(Self { month, year })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at.month() == self.month && at.year() == self.year
    }
}

impl FromStr for MonthYear {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (month, year) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::validation(format!("invalid monthYear '{s}', expected M-YYYY")))?;

        // M without a leading zero, YYYY exactly four digits
        let month_ok = matches!(month.len(), 1 | 2)
            && !month.starts_with('0')
            && month.bytes().all(|b| b.is_ascii_digit());
        if !month_ok {
            return Err(Error::validation(format!("invalid month in '{s}', expected M-YYYY")));
        }
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::validation(format!("invalid year in '{s}', expected M-YYYY")));
        }

        let month: u32 = month
            .parse()
            .map_err(|_| Error::validation(format!("invalid month in '{s}'")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::validation(format!("invalid year in '{s}'")))?;

        MonthYear::new(month, year)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}
