// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month arithmetic shared by the aggregation engine and the calendar grid.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// A (year, month) pair; canonical text form is `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(LedgerError::validation(format!(
                "Invalid month {year:04}-{month:02}"
            )));
        }
        Ok(MonthKey { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        MonthKey::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), LedgerError> {
        month_bounds(self.year, self.month)
    }

    pub fn days_in_month(&self) -> Result<u32, LedgerError> {
        Ok(self.bounds()?.1.day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month, or `None` past the last representable date.
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            MonthKey::new(self.year.checked_add(1)?, 1).ok()
        } else {
            MonthKey::new(self.year, self.month + 1).ok()
        }
    }

    /// The preceding month, or `None` before the first representable date.
    pub fn prev(&self) -> Option<Self> {
        if self.month == 1 {
            MonthKey::new(self.year.checked_sub(1)?, 12).ok()
        } else {
            MonthKey::new(self.year, self.month - 1).ok()
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || LedgerError::validation(format!("Invalid month '{s}', expected YYYY-MM"));
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

/// Which weekday occupies the first grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" | "일" => Ok(WeekStart::Sunday),
            "monday" | "mon" | "월" => Ok(WeekStart::Monday),
            other => Err(LedgerError::validation(format!(
                "Invalid week start '{other}', expected sunday|monday"
            ))),
        }
    }
}

/// First and last calendar day of a month.
///
/// The last day is the first day of the following month minus one day, which
/// carries December into January of the next year.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), LedgerError> {
    let invalid = || LedgerError::validation(format!("Invalid month {year:04}-{month:02}"));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

/// Number of empty leading cells before `first_day`, in `0..=6`.
pub fn weekday_offset(first_day: NaiveDate, week_start: WeekStart) -> u32 {
    match week_start {
        WeekStart::Sunday => first_day.weekday().num_days_from_sunday(),
        WeekStart::Monday => first_day.weekday().num_days_from_monday(),
    }
}

/// Date a fixed expense falls on in the given month.
///
/// Days past the end of the month clamp to the last day (31 in February gives
/// the 28th or 29th); day 0 clamps to the 1st.
pub fn project_payment_date(
    year: i32,
    month: u32,
    payment_day: u32,
) -> Result<NaiveDate, LedgerError> {
    let (first, last) = month_bounds(year, month)?;
    let day = payment_day.clamp(1, last.day());
    if day != payment_day {
        tracing::debug!(
            year,
            month,
            payment_day,
            clamped = day,
            "payment day clamped into month"
        );
    }
    first
        .with_day(day)
        .ok_or_else(|| LedgerError::validation(format!("Invalid payment day {payment_day}")))
}

/// The trailing `count` months ending at `anchor`, oldest first. Stops early
/// at the first month chrono cannot represent.
pub fn recent_months(anchor: MonthKey, count: usize) -> Vec<MonthKey> {
    let mut out = Vec::new();
    let mut cur = Some(anchor);
    while let Some(m) = cur.filter(|_| out.len() < count) {
        out.push(m);
        cur = m.prev();
    }
    out.reverse();
    out
}
