// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::month_entries;
use crate::config::Settings;
use crate::export::{ExportFormat, build_workbook, file_name, write_workbook};
use crate::gateway::Gateway;
use crate::store::RecordStore;
use crate::utils::parse_month_or_current;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes `ledger_<YYYY-MM>.<ext>` into `--out` and returns its path.
pub fn export_month<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<PathBuf> {
    let format = sub
        .get_one::<String>("format")
        .map(|s| s.parse::<ExportFormat>())
        .transpose()?
        .unwrap_or(ExportFormat::Csv);
    let month = parse_month_or_current(sub.get_one::<String>("month"))?;
    let out_dir = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| ".".into());

    let snap = gw.snapshot();
    let entries = month_entries(&snap.transactions, &snap.fixed_expenses, month)?;
    let workbook = build_workbook(month, &entries, &settings.currency_suffix);

    let dir = Path::new(&out_dir);
    fs::create_dir_all(dir).with_context(|| format!("Create {}", dir.display()))?;
    let path = dir.join(file_name(month, format));
    let file = File::create(&path).with_context(|| format!("Create {}", path.display()))?;
    write_workbook(&workbook, format, BufWriter::new(file))?;
    tracing::info!(%month, sheets = workbook.sheets.len(), path = %path.display(), "export written");
    Ok(path)
}

pub fn handle<S: RecordStore>(
    gw: &Gateway<S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let path = export_month(gw, settings, sub)?;
    println!("Exported ledger to {}", path.display());
    Ok(())
}
