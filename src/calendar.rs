// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::LedgerError;
use crate::models::ScheduleEvent;
use crate::period::{MonthKey, WeekStart, weekday_offset};

/// Anything that can be placed on a calendar day.
pub trait Dated {
    /// `YYYY-MM-DD` key the item is matched on.
    fn date_key(&self) -> String;
}

impl Dated for ScheduleEvent {
    fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell<T = ScheduleEvent> {
    pub date: Option<NaiveDate>,
    pub has_event: bool,
    pub events: Vec<T>,
}

impl<T> CalendarCell<T> {
    fn blank() -> Self {
        CalendarCell {
            date: None,
            has_event: false,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid<T = ScheduleEvent> {
    pub month: MonthKey,
    pub week_start: WeekStart,
    pub weeks: Vec<[CalendarCell<T>; 7]>,
}

impl<T> CalendarGrid<T> {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell<T>> {
        self.weeks.iter().flat_map(|w| w.iter())
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&CalendarCell<T>> {
        self.cells().find(|c| c.date == Some(date))
    }
}

/// Column headers for the given week start.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => ["일", "월", "화", "수", "목", "금", "토"],
        WeekStart::Monday => ["월", "화", "수", "목", "금", "토", "일"],
    }
}

/// Lays out `month` as whole weeks of seven cells and overlays `items` on the
/// days whose date they carry. Items for a day keep their input order.
pub fn build_month_grid<T: Dated + Clone>(
    month: MonthKey,
    items: &[T],
    week_start: WeekStart,
) -> Result<CalendarGrid<T>, LedgerError> {
    let (first, last) = month.bounds()?;
    let offset = weekday_offset(first, week_start) as usize;

    let mut cells: Vec<CalendarCell<T>> = (0..offset).map(|_| CalendarCell::blank()).collect();
    let mut day = first;
    while day <= last {
        let key = day.format("%Y-%m-%d").to_string();
        let events: Vec<T> = items
            .iter()
            .filter(|item| item.date_key() == key)
            .cloned()
            .collect();
        cells.push(CalendarCell {
            date: Some(day),
            has_event: !events.is_empty(),
            events,
        });
        day = day
            .checked_add_days(Days::new(1))
            .ok_or_else(|| LedgerError::validation(format!("Date overflow after {day}")))?;
    }
    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::blank());
    }

    let mut weeks = Vec::with_capacity(cells.len() / 7);
    let mut iter = cells.into_iter();
    loop {
        let week: Vec<CalendarCell<T>> = iter.by_ref().take(7).collect();
        if week.is_empty() {
            break;
        }
        match <[CalendarCell<T>; 7]>::try_from(week) {
            Ok(w) => weeks.push(w),
            Err(_) => return Err(LedgerError::validation("calendar row is not seven cells")),
        }
    }
    tracing::debug!(%month, %week_start, weeks = weeks.len(), "month grid built");
    Ok(CalendarGrid {
        month,
        week_start,
        weeks,
    })
}
