// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::{CalendarGrid, build_month_grid, weekday_labels};
use crate::config::Settings;
use crate::gateway::Gateway;
use crate::period::WeekStart;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_month_or_current, pretty_table};
use anyhow::Result;
use chrono::Datelike;

/// Grid for `--month`, honouring `--week-start` over the configured default.
pub fn month_grid<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<CalendarGrid> {
    let month = parse_month_or_current(m.get_one::<String>("month"))?;
    let week_start = match m.get_one::<String>("week-start") {
        Some(s) => s.parse::<WeekStart>()?,
        None => settings.week_start,
    };
    Ok(build_month_grid(month, &gw.schedules(), week_start)?)
}

pub fn handle<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    let grid = month_grid(gw, settings, m)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &grid)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = grid
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| match cell.date {
                    None => String::new(),
                    Some(d) if cell.has_event => {
                        let mut s = format!("{} *", d.day());
                        for e in &cell.events {
                            s.push('\n');
                            s.push_str(&e.title);
                        }
                        s
                    }
                    Some(d) => d.day().to_string(),
                })
                .collect::<Vec<String>>()
        })
        .collect();
    println!("{}", grid.month);
    println!("{}", pretty_table(&weekday_labels(grid.week_start), rows));
    Ok(())
}
