// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::aggregate::LedgerEntry;
use crate::error::LedgerError;
use crate::models::Direction;
use crate::period::MonthKey;

pub const COLUMNS: [&str; 4] = ["날짜", "항목", "금액", "메모"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Income,
    FixedExpense,
    VariableExpense,
}

impl SheetKind {
    pub const ORDER: [SheetKind; 3] = [
        SheetKind::Income,
        SheetKind::FixedExpense,
        SheetKind::VariableExpense,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SheetKind::Income => "수입",
            SheetKind::FixedExpense => "고정지출",
            SheetKind::VariableExpense => "변동지출",
        }
    }

    fn of(entry: &LedgerEntry) -> SheetKind {
        match (entry.direction, entry.is_fixed) {
            (Direction::Income, _) => SheetKind::Income,
            (Direction::Expense, true) => SheetKind::FixedExpense,
            (Direction::Expense, false) => SheetKind::VariableExpense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub date: String,
    pub title: String,
    pub amount: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: SheetKind,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    pub month: MonthKey,
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(LedgerError::validation(format!(
                "Unknown format: {other} (use csv|json)"
            ))),
        }
    }
}

/// `ledger_<YYYY-MM>.<ext>`
pub fn file_name(month: MonthKey, format: ExportFormat) -> String {
    format!("ledger_{}.{}", month, format.extension())
}

/// `3000000` with suffix `원` renders as `3,000,000원`.
pub fn format_amount(amount: u64, suffix: &str) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + suffix.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(suffix);
    out
}

/// Like [`format_amount`] with a leading `-` for negative values.
pub fn format_signed_amount(amount: i64, suffix: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}", sign, format_amount(amount.unsigned_abs(), suffix))
}

/// Groups a month's entries into sheets. Groups without rows are left out.
pub fn build_workbook(month: MonthKey, entries: &[LedgerEntry], currency_suffix: &str) -> Workbook {
    let sheets = SheetKind::ORDER
        .into_iter()
        .filter_map(|kind| {
            let rows: Vec<SheetRow> = entries
                .iter()
                .filter(|e| SheetKind::of(e) == kind)
                .map(|e| SheetRow {
                    date: e.date.format("%Y-%m-%d").to_string(),
                    title: e.title.clone(),
                    amount: format_amount(e.amount, currency_suffix),
                    memo: e.memo.clone(),
                })
                .collect();
            (!rows.is_empty()).then_some(Sheet { name: kind, rows })
        })
        .collect();
    Workbook { month, sheets }
}

/// Every CSV row is prefixed with the name of the sheet it belongs to.
pub fn write_csv<W: Write>(workbook: &Workbook, out: W) -> Result<(), LedgerError> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut header = vec!["sheet"];
    header.extend(COLUMNS);
    wtr.write_record(&header)?;
    for sheet in &workbook.sheets {
        for row in &sheet.rows {
            wtr.write_record([
                sheet.name.name(),
                row.date.as_str(),
                row.title.as_str(),
                row.amount.as_str(),
                row.memo.as_str(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(workbook: &Workbook, mut out: W) -> Result<(), LedgerError> {
    let sheets: Vec<serde_json::Value> = workbook
        .sheets
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name.name(),
                "columns": COLUMNS,
                "rows": s
                    .rows
                    .iter()
                    .map(|r| vec![r.date.as_str(), r.title.as_str(), r.amount.as_str(), r.memo.as_str()])
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    let doc = serde_json::json!({ "month": workbook.month, "sheets": sheets });
    serde_json::to_writer_pretty(&mut out, &doc)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn write_workbook<W: Write>(
    workbook: &Workbook,
    format: ExportFormat,
    out: W,
) -> Result<(), LedgerError> {
    match format {
        ExportFormat::Csv => write_csv(workbook, out),
        ExportFormat::Json => write_json(workbook, out),
    }
}
