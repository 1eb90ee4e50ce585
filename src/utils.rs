// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use std::sync::Once;
use std::time::Duration;

use crate::error::LedgerError;
use crate::period::MonthKey;

const UA: &str = concat!(
    "famledger/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/famledger)"
);

static TRACING_INIT: Once = Once::new();

/// Installs the stderr tracing subscriber once; `RUST_LOG` refines the filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("famledger=info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, LedgerError> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parses `YYYY-MM`, defaulting to the current month when absent.
pub fn parse_month_or_current(s: Option<&String>) -> Result<MonthKey> {
    match s {
        Some(s) => Ok(s.parse::<MonthKey>()?),
        None => Ok(MonthKey::current()),
    }
}

/// Whole currency units; thousands separators are accepted.
pub fn parse_amount(s: &str) -> Result<i64> {
    s.trim()
        .replace(',', "")
        .parse::<i64>()
        .with_context(|| format!("Invalid amount '{}', expected a whole number", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_separators_and_sign() {
        assert_eq!(parse_amount("150,000").unwrap(), 150_000);
        assert_eq!(parse_amount(" -5 ").unwrap(), -5);
        assert!(parse_amount("12.5").is_err());
    }

    #[test]
    fn month_defaults_to_current() {
        assert_eq!(parse_month_or_current(None).unwrap(), MonthKey::current());
        let m = "2025-03".to_string();
        assert_eq!(parse_month_or_current(Some(&m)).unwrap().to_string(), "2025-03");
        let bad = "2025/03".to_string();
        assert!(parse_month_or_current(Some(&bad)).is_err());
    }
}
