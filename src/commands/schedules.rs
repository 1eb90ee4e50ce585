// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{opt_arg, req_arg};
use crate::gateway::{Gateway, newest_first};
use crate::models::{ScheduleDraft, ScheduleEvent};
use crate::period::MonthKey;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: RecordStore>(gw: &Gateway<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = ScheduleDraft {
                date: parse_date(&req_arg(sub, "date")?)?,
                title: req_arg(sub, "title")?,
                description: opt_arg(sub, "memo").unwrap_or_default(),
            };
            let id = gw.add_schedule(&draft).context("Event not saved")?;
            println!("Added event '{}' on {} ({})", draft.title, draft.date, id);
        }
        Some(("list", sub)) => list(gw, sub)?,
        Some(("edit", sub)) => {
            let id = req_arg(sub, "id")?;
            let current: ScheduleEvent = gw.find(&id)?;
            let mut draft = ScheduleDraft::from(&current);
            if let Some(d) = opt_arg(sub, "date") {
                draft.date = parse_date(&d)?;
            }
            if let Some(t) = opt_arg(sub, "title") {
                draft.title = t;
            }
            if let Some(memo) = opt_arg(sub, "memo") {
                draft.description = memo;
            }
            gw.update_schedule(&id, &draft)
                .with_context(|| format!("Update of '{}' not applied", id))?;
            println!("Updated event {}", id);
        }
        Some(("rm", sub)) => {
            let id = req_arg(sub, "id")?;
            gw.delete_schedule(&id)
                .with_context(|| format!("Delete of '{}' not applied", id))?;
            println!("Removed event {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Events for the optional `--month` filter, newest first.
pub fn query_events<S: RecordStore>(
    gw: &Gateway<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<ScheduleEvent>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(m.parse::<MonthKey>()?),
        None => None,
    };
    let events: Vec<ScheduleEvent> = gw
        .schedules()
        .into_iter()
        .filter(|e| month.is_none_or(|m| m.contains(e.date)))
        .collect();
    Ok(newest_first(events, |e| e.date))
}

fn list<S: RecordStore>(gw: &Gateway<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_events(gw, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No events.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|e| vec![e.date.to_string(), e.title, e.description, e.id])
            .collect();
        println!("{}", pretty_table(&["Date", "Title", "Memo", "ID"], rows));
    }
    Ok(())
}
