// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{MonthlyRollup, aggregate_month, history, observed_months};
use crate::config::Settings;
use crate::export::{format_amount, format_signed_amount};
use crate::gateway::Gateway;
use crate::period::recent_months;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_month_or_current, pretty_table};
use anyhow::Result;

pub fn handle<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(gw, settings, sub)?,
        Some(("history", sub)) => history_report(gw, settings, sub)?,
        _ => {}
    }
    Ok(())
}

/// Rollup for `--month` computed from a fresh snapshot.
pub fn month_rollup<S: RecordStore>(
    gw: &Gateway<S>,
    sub: &clap::ArgMatches,
) -> Result<MonthlyRollup> {
    let month = parse_month_or_current(sub.get_one::<String>("month"))?;
    let snap = gw.snapshot();
    Ok(aggregate_month(&snap.transactions, &snap.fixed_expenses, month)?)
}

fn month<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let r = month_rollup(gw, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }
    let money = |v: u64| format_amount(v, &settings.currency_suffix);
    println!("{} 상세 내역", r.month);
    println!(
        "{}",
        pretty_table(
            &["", "Amount"],
            vec![
                vec!["수입 총액".into(), money(r.income_total)],
                vec!["지출 총액".into(), money(r.expense_total)],
                vec!["  고정지출".into(), money(r.fixed_expense_total)],
                vec!["  변동지출".into(), money(r.variable_expense_total)],
                vec![
                    "수지 차액".into(),
                    format_signed_amount(r.balance, &settings.currency_suffix),
                ],
            ],
        )
    );
    if r.category_totals.is_empty() {
        println!("No records for {}.", r.month);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = r
        .category_totals
        .iter()
        .map(|(cat, total)| {
            vec![
                cat.to_string(),
                cat.direction().label().to_string(),
                money(*r.fixed_by_category.get(cat).unwrap_or(&0)),
                money(*r.variable_by_category.get(cat).unwrap_or(&0)),
                money(*total),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Type", "Fixed", "Variable", "Total"], rows)
    );
    Ok(())
}

fn history_report<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let snap = gw.snapshot();
    let months = if sub.get_flag("observed") {
        observed_months(&snap.transactions).into_iter().collect()
    } else {
        let count = sub.get_one::<u16>("months").map(|n| usize::from(*n)).unwrap_or(6);
        recent_months(parse_month_or_current(sub.get_one::<String>("until"))?, count)
    };
    let data = history(&snap.transactions, &snap.fixed_expenses, &months)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = history_rows(&data, &settings.currency_suffix);
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}

/// Table cells for `report history`, money formatted like `report month`.
pub fn history_rows(data: &[MonthlyRollup], suffix: &str) -> Vec<Vec<String>> {
    data.iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                format_amount(r.income_total, suffix),
                format_amount(r.expense_total, suffix),
                format_signed_amount(r.balance, suffix),
            ]
        })
        .collect()
}
