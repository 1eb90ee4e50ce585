// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::models::{Category, Direction, TransactionDraft};
use crate::store::RecordStore;
use crate::utils::{parse_amount, parse_date};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;

pub fn handle<S: RecordStore>(gw: &Gateway<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            let file =
                std::fs::File::open(&path).with_context(|| format!("Open CSV {}", path))?;
            let created = import_transactions(gw, file)?;
            println!("Imported {} transactions from {}", created, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Reads `date,type,category,amount,description` rows. Every row is validated
/// before the first write, so a bad row leaves the store untouched.
pub fn import_transactions<S: RecordStore, R: Read>(gw: &Gateway<S>, input: R) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut drafts = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let rec = result.with_context(|| format!("Unreadable row {}", line))?;
        let field = |i: usize, name: &str| -> Result<String> {
            rec.get(i)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .with_context(|| format!("Row {}: {} missing", line, name))
        };
        let draft = TransactionDraft {
            date: parse_date(&field(0, "date")?).with_context(|| format!("Row {}", line))?,
            direction: field(1, "type")?
                .parse::<Direction>()
                .with_context(|| format!("Row {}", line))?,
            category: field(2, "category")?
                .parse::<Category>()
                .with_context(|| format!("Row {}", line))?,
            amount: parse_amount(&field(3, "amount")?).with_context(|| format!("Row {}", line))?,
            description: rec.get(4).unwrap_or("").to_string(),
        };
        draft.validate().with_context(|| format!("Row {}", line))?;
        drafts.push(draft);
    }

    let mut created = 0;
    for draft in &drafts {
        gw.add_transaction(draft).with_context(|| {
            format!(
                "Import stopped after {} of {} rows",
                created,
                drafts.len()
            )
        })?;
        created += 1;
    }
    Ok(created)
}
