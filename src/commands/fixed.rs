// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{opt_arg, req_arg};
use crate::config::Settings;
use crate::export::format_amount;
use crate::gateway::Gateway;
use crate::models::{Category, FixedExpenseDraft, FixedExpenseRecord};
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = FixedExpenseDraft {
                title: req_arg(sub, "title")?,
                category: req_arg(sub, "category")?.parse::<Category>()?,
                amount: parse_amount(&req_arg(sub, "amount")?)?,
                payment_day: sub.get_one::<u32>("day").copied().unwrap_or(0),
                description: opt_arg(sub, "memo").unwrap_or_default(),
            };
            let id = gw.add_fixed_expense(&draft).context("Fixed expense not saved")?;
            println!(
                "Added fixed expense '{}' {} on day {} ({})",
                draft.title, draft.amount, draft.payment_day, id
            );
        }
        Some(("list", sub)) => {
            let mut data = gw.fixed_expenses();
            data.sort_by_key(|f| f.payment_day);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .into_iter()
                    .map(|f| {
                        vec![
                            f.payment_day.to_string(),
                            f.title,
                            f.category.to_string(),
                            format_amount(f.amount, &settings.currency_suffix),
                            f.description,
                            f.id,
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Day", "Title", "Category", "Amount", "Memo", "ID"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = req_arg(sub, "id")?;
            let current: FixedExpenseRecord = gw.find(&id)?;
            let mut draft = FixedExpenseDraft::try_from(&current)?;
            if let Some(t) = opt_arg(sub, "title") {
                draft.title = t;
            }
            if let Some(c) = opt_arg(sub, "category") {
                draft.category = c.parse()?;
            }
            if let Some(a) = opt_arg(sub, "amount") {
                draft.amount = parse_amount(&a)?;
            }
            if let Some(day) = sub.get_one::<u32>("day") {
                draft.payment_day = *day;
            }
            if let Some(memo) = opt_arg(sub, "memo") {
                draft.description = memo;
            }
            gw.update_fixed_expense(&id, &draft)
                .with_context(|| format!("Update of '{}' not applied", id))?;
            println!("Updated fixed expense {}", id);
        }
        Some(("rm", sub)) => {
            let id = req_arg(sub, "id")?;
            gw.delete_fixed_expense(&id)
                .with_context(|| format!("Delete of '{}' not applied", id))?;
            println!("Removed fixed expense {}", id);
        }
        _ => {}
    }
    Ok(())
}
