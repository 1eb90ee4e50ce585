// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{opt_arg, req_arg};
use crate::config::Settings;
use crate::export::format_amount;
use crate::gateway::{Gateway, newest_first};
use crate::models::{Category, Direction, TransactionDraft, TransactionRecord};
use crate::period::MonthKey;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(gw, sub)?,
        Some(("list", sub)) => list(gw, settings, sub)?,
        Some(("edit", sub)) => edit(gw, sub)?,
        Some(("rm", sub)) => {
            let id = req_arg(sub, "id")?;
            gw.delete_transaction(&id)
                .with_context(|| format!("Delete of '{}' not applied", id))?;
            println!("Removed record {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add<S: RecordStore>(gw: &Gateway<S>, sub: &clap::ArgMatches) -> Result<()> {
    let draft = TransactionDraft {
        date: parse_date(&req_arg(sub, "date")?)?,
        direction: req_arg(sub, "type")?.parse::<Direction>()?,
        category: req_arg(sub, "category")?.parse::<Category>()?,
        amount: parse_amount(&req_arg(sub, "amount")?)?,
        description: opt_arg(sub, "memo").unwrap_or_default(),
    };
    let id = gw.add_transaction(&draft).context("Record not saved")?;
    println!(
        "Recorded {} {} {} on {} ({})",
        draft.direction.label(),
        draft.category,
        draft.amount,
        draft.date,
        id
    );
    Ok(())
}

fn edit<S: RecordStore>(gw: &Gateway<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = req_arg(sub, "id")?;
    let current: TransactionRecord = gw.find(&id)?;
    let mut draft = TransactionDraft::try_from(&current)?;
    if let Some(d) = opt_arg(sub, "date") {
        draft.date = parse_date(&d)?;
    }
    if let Some(t) = opt_arg(sub, "type") {
        draft.direction = t.parse()?;
    }
    if let Some(c) = opt_arg(sub, "category") {
        draft.category = c.parse()?;
    }
    if let Some(a) = opt_arg(sub, "amount") {
        draft.amount = parse_amount(&a)?;
    }
    if let Some(memo) = opt_arg(sub, "memo") {
        draft.description = memo;
    }
    gw.update_transaction(&id, &draft)
        .with_context(|| format!("Update of '{}' not applied", id))?;
    println!("Updated record {}", id);
    Ok(())
}

fn list<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(gw, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    format_amount(r.amount, &settings.currency_suffix),
                    r.memo.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Memo", "ID"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: u64,
    pub memo: String,
}

/// Records matching the list filters, newest first.
pub fn query_rows<S: RecordStore>(
    gw: &Gateway<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(m.parse::<MonthKey>()?),
        None => None,
    };
    let records: Vec<TransactionRecord> = gw
        .transactions()
        .into_iter()
        .filter(|t| month.is_none_or(|m| m.contains(t.date)))
        .collect();
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(newest_first(records, |t| t.date)
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.direction.label().to_string(),
            category: t.category.label().to_string(),
            amount: t.amount,
            memo: t.description,
        })
        .collect())
}
