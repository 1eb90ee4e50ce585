// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-scoped views over transactions and recurring fixed expenses.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::LedgerError;
use crate::models::{Category, Direction, FixedExpenseRecord, TransactionRecord};
use crate::period::{MonthKey, project_payment_date};

/// One row of a month's working set: a real transaction or the projection of
/// a fixed expense onto its payment date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub source_id: String,
    pub date: NaiveDate,
    pub direction: Direction,
    pub category: Category,
    pub amount: u64,
    pub title: String,
    pub memo: String,
    pub is_fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRollup {
    pub month: MonthKey,
    pub income_total: u64,
    pub expense_total: u64,
    pub balance: i64,
    pub category_totals: BTreeMap<Category, u64>,
    pub fixed_expense_total: u64,
    pub variable_expense_total: u64,
    pub fixed_by_category: BTreeMap<Category, u64>,
    pub variable_by_category: BTreeMap<Category, u64>,
}

impl MonthlyRollup {
    pub fn empty(month: MonthKey) -> Self {
        MonthlyRollup {
            month,
            income_total: 0,
            expense_total: 0,
            balance: 0,
            category_totals: BTreeMap::new(),
            fixed_expense_total: 0,
            variable_expense_total: 0,
            fixed_by_category: BTreeMap::new(),
            variable_by_category: BTreeMap::new(),
        }
    }
}

/// Synthetic expense entry for `fixed` in `month`, dated on its (clamped) payment day.
pub fn project_fixed_expense(
    fixed: &FixedExpenseRecord,
    month: MonthKey,
) -> Result<LedgerEntry, LedgerError> {
    let date = project_payment_date(month.year(), month.month(), fixed.payment_day)?;
    Ok(LedgerEntry {
        source_id: fixed.id.clone(),
        date,
        direction: Direction::Expense,
        category: fixed.category,
        amount: fixed.amount,
        title: fixed.title.clone(),
        memo: fixed.description.clone(),
        is_fixed: true,
    })
}

/// The month's working set: transactions dated inside `month` plus one
/// projection per fixed expense, ordered by date. Same-day rows keep input
/// order with real transactions ahead of projections.
pub fn month_entries(
    transactions: &[TransactionRecord],
    fixed_expenses: &[FixedExpenseRecord],
    month: MonthKey,
) -> Result<Vec<LedgerEntry>, LedgerError> {
    let mut entries: Vec<LedgerEntry> = transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .map(|t| LedgerEntry {
            source_id: t.id.clone(),
            date: t.date,
            direction: t.direction,
            category: t.category,
            amount: t.amount,
            title: t.category.label().to_string(),
            memo: t.description.clone(),
            is_fixed: false,
        })
        .collect();
    for fixed in fixed_expenses {
        entries.push(project_fixed_expense(fixed, month)?);
    }
    entries.sort_by_key(|e| e.date);
    tracing::debug!(%month, entries = entries.len(), "month working set built");
    Ok(entries)
}

/// Totals over an already-built working set. Sums are exact; a month whose
/// totals leave the integer range is reported instead of wrapped.
pub fn rollup(month: MonthKey, entries: &[LedgerEntry]) -> Result<MonthlyRollup, LedgerError> {
    let mut out = MonthlyRollup::empty(month);
    for e in entries {
        add_to(out.category_totals.entry(e.category).or_insert(0), e.amount, month)?;
        match (e.direction, e.is_fixed) {
            (Direction::Income, _) => add_to(&mut out.income_total, e.amount, month)?,
            (Direction::Expense, true) => {
                add_to(&mut out.expense_total, e.amount, month)?;
                add_to(&mut out.fixed_expense_total, e.amount, month)?;
                add_to(out.fixed_by_category.entry(e.category).or_insert(0), e.amount, month)?;
            }
            (Direction::Expense, false) => {
                add_to(&mut out.expense_total, e.amount, month)?;
                add_to(&mut out.variable_expense_total, e.amount, month)?;
                add_to(out.variable_by_category.entry(e.category).or_insert(0), e.amount, month)?;
            }
        }
    }
    let balance = i128::from(out.income_total) - i128::from(out.expense_total);
    out.balance = i64::try_from(balance).map_err(|_| {
        LedgerError::validation(format!("Balance {balance} for {month} is out of range"))
    })?;
    Ok(out)
}

fn add_to(total: &mut u64, amount: u64, month: MonthKey) -> Result<(), LedgerError> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| LedgerError::validation(format!("Totals for {month} overflow")))?;
    Ok(())
}

pub fn aggregate_month(
    transactions: &[TransactionRecord],
    fixed_expenses: &[FixedExpenseRecord],
    month: MonthKey,
) -> Result<MonthlyRollup, LedgerError> {
    let entries = month_entries(transactions, fixed_expenses, month)?;
    rollup(month, &entries)
}

/// One rollup per requested month, in the order given.
pub fn history(
    transactions: &[TransactionRecord],
    fixed_expenses: &[FixedExpenseRecord],
    months: &[MonthKey],
) -> Result<Vec<MonthlyRollup>, LedgerError> {
    months
        .iter()
        .map(|m| aggregate_month(transactions, fixed_expenses, *m))
        .collect()
}

/// Months that have at least one real transaction.
pub fn observed_months(transactions: &[TransactionRecord]) -> BTreeSet<MonthKey> {
    transactions.iter().map(|t| MonthKey::of(t.date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, date: &str, cat: Category, amount: u64) -> TransactionRecord {
        TransactionRecord {
            id: id.into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            direction: cat.direction(),
            category: cat,
            amount,
            description: String::new(),
            recorded_at: None,
        }
    }

    #[test]
    fn entries_are_filtered_and_date_ordered() {
        let m = MonthKey::new(2025, 3).unwrap();
        let txs = vec![
            tx("a", "2025-03-20", Category::Food, 1),
            tx("b", "2025-02-28", Category::Food, 2),
            tx("c", "2025-03-02", Category::Transport, 3),
            tx("d", "2025-04-01", Category::Food, 4),
        ];
        let fixed = vec![FixedExpenseRecord {
            id: "f".into(),
            title: "통신".into(),
            category: Category::Telecom,
            amount: 50,
            payment_day: 2,
            description: String::new(),
            recorded_at: None,
        }];
        let ids: Vec<_> = month_entries(&txs, &fixed, m)
            .unwrap()
            .into_iter()
            .map(|e| e.source_id)
            .collect();
        assert_eq!(ids, vec!["c", "f", "a"]);
    }

    #[test]
    fn empty_month_is_all_zero() {
        let m = MonthKey::new(2025, 1).unwrap();
        let r = aggregate_month(&[], &[], m).unwrap();
        assert_eq!(r, MonthlyRollup::empty(m));
    }

    #[test]
    fn balance_may_go_negative() {
        let m = MonthKey::new(2025, 1).unwrap();
        let txs = vec![
            tx("a", "2025-01-03", Category::Bonus, 100),
            tx("b", "2025-01-04", Category::Medical, 250),
        ];
        let r = aggregate_month(&txs, &[], m).unwrap();
        assert_eq!(r.balance, -150);
        assert_eq!(r.variable_expense_total, 250);
        assert_eq!(r.fixed_expense_total, 0);
    }

    #[test]
    fn observed_months_are_distinct_and_sorted() {
        let txs = vec![
            tx("a", "2025-03-20", Category::Food, 1),
            tx("b", "2024-12-28", Category::Food, 2),
            tx("c", "2025-03-02", Category::Food, 3),
        ];
        let got: Vec<String> = observed_months(&txs).iter().map(|m| m.to_string()).collect();
        assert_eq!(got, vec!["2024-12", "2025-03"]);
    }
}
