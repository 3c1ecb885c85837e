//! Month-resolution period parsing for the `year_month` column.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a period cell into a [`YearMonth`].
///
/// Accepts `YYYY-MM`, `YYYY/MM` and full dates or datetimes; anything finer
/// than a month is discarded. Returns `None` for empty or unrecognised input.
pub fn parse_year_month(s: &str) -> Option<YearMonth> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(YearMonth::from_date(naive.date()));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(YearMonth::from_date(date));
        }
    }

    // Month-only forms: pin to the first day so chrono validates the month.
    let sep = if s.contains('/') { '/' } else { '-' };
    let padded = format!("{s}{sep}01");
    let fmt = if sep == '/' { "%Y/%m/%d" } else { "%Y-%m-%d" };
    NaiveDate::parse_from_str(&padded, fmt)
        .ok()
        .map(YearMonth::from_date)
}
