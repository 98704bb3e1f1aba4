//! Date ranges for batch classification.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Hour of day (UTC) at which scans sample each date.
pub const DEFAULT_SCAN_HOUR_UTC: u32 = 15;

/// A calendar range to scan day by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPeriod {
    Month { year: i32, month: u32 },
    /// Quarter 1–4 of a year.
    Quarter { year: i32, quarter: u32 },
    Year(i32),
    /// Inclusive date span.
    Span { start: NaiveDate, end: NaiveDate },
}

impl ScanPeriod {
    /// Whether the month, quarter, or span names real dates.
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Month { month, .. } => (1..=12).contains(&month),
            Self::Quarter { quarter, .. } => (1..=4).contains(&quarter),
            Self::Year(_) => true,
            Self::Span { start, end } => start <= end,
        }
    }

    /// `(year, month)` pairs covered, in order. Empty for an invalid month
    /// or quarter.
    pub fn months(&self) -> Vec<(i32, u32)> {
        match *self {
            Self::Month { year, month } if (1..=12).contains(&month) => vec![(year, month)],
            Self::Quarter { year, quarter } if (1..=4).contains(&quarter) => {
                let first = (quarter - 1) * 3 + 1;
                (first..first + 3).map(|m| (year, m)).collect()
            }
            Self::Year(year) => (1..=12).map(|m| (year, m)).collect(),
            Self::Span { start, end } if start <= end => {
                let mut out = Vec::new();
                let (mut y, mut m) = (start.year(), start.month());
                while (y, m) <= (end.year(), end.month()) {
                    out.push((y, m));
                    (y, m) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
                }
                out
            }
            _ => Vec::new(),
        }
    }

    /// Every real date in the period.
    ///
    /// Days 1 through 31 are tried for each month; impossible dates such as
    /// 30 February are skipped.
    pub fn candidate_days(&self) -> Vec<NaiveDate> {
        let days = self
            .months()
            .into_iter()
            .flat_map(|(y, m)| (1..=31).filter_map(move |d| NaiveDate::from_ymd_opt(y, m, d)));
        match *self {
            Self::Span { start, end } => days.filter(|d| (start..=end).contains(d)).collect(),
            _ => days.collect(),
        }
    }

    /// The following month or quarter; `None` for years, spans, and
    /// invalid periods.
    pub fn next(&self) -> Option<Self> {
        if !self.is_valid() {
            return None;
        }
        match *self {
            Self::Month { year, month: 12 } => Some(Self::Month {
                year: year + 1,
                month: 1,
            }),
            Self::Month { year, month } => Some(Self::Month {
                year,
                month: month + 1,
            }),
            Self::Quarter { year, quarter: 4 } => Some(Self::Quarter {
                year: year + 1,
                quarter: 1,
            }),
            Self::Quarter { year, quarter } => Some(Self::Quarter {
                year,
                quarter: quarter + 1,
            }),
            Self::Year(_) | Self::Span { .. } => None,
        }
    }
}
