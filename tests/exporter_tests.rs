// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use famledger::config::Settings;
use famledger::gateway::Gateway;
use famledger::models::{Category, FixedExpenseDraft, TransactionDraft};
use famledger::store::MemoryStore;
use famledger::{cli, commands::exporter};
use serde_json::{Value, json};
use tempfile::tempdir;

fn seeded() -> Gateway<MemoryStore> {
    let gw = Gateway::new(MemoryStore::new());
    gw.add_transaction(&TransactionDraft {
        date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        direction: Category::Salary.direction(),
        category: Category::Salary,
        amount: 3_000_000,
        description: "3월 급여".into(),
    })
    .unwrap();
    gw.add_fixed_expense(&FixedExpenseDraft {
        title: "월세".into(),
        category: Category::Rent,
        amount: 800_000,
        payment_day: 25,
        description: String::new(),
    })
    .unwrap();
    gw
}

fn export_args(format: &str, out: &str) -> clap::ArgMatches {
    cli::build_cli().get_matches_from([
        "famledger", "export", "--month", "2025-03", "--format", format, "--out", out,
    ])
}

#[test]
fn json_workbook_omits_empty_sheets() {
    let gw = seeded();
    let dir = tempdir().unwrap();
    let m = export_args("json", dir.path().to_str().unwrap());
    let path = exporter::export_month(&gw, &Settings::default(), m.subcommand_matches("export").unwrap())
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "ledger_2025-03.json");

    let content = std::fs::read_to_string(&path).unwrap();
    let v: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        v,
        json!({
            "month": "2025-03",
            "sheets": [
                {
                    "name": "수입",
                    "columns": ["날짜", "항목", "금액", "메모"],
                    "rows": [["2025-03-05", "급여", "3,000,000원", "3월 급여"]]
                },
                {
                    "name": "고정지출",
                    "columns": ["날짜", "항목", "금액", "메모"],
                    "rows": [["2025-03-25", "월세", "800,000원", ""]]
                }
            ]
        })
    );
}

#[test]
fn csv_rows_carry_their_sheet() {
    let gw = seeded();
    gw.add_transaction(&TransactionDraft {
        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        direction: Category::Food.direction(),
        category: Category::Food,
        amount: 150_000,
        description: "장보기".into(),
    })
    .unwrap();
    let dir = tempdir().unwrap();
    let m = export_args("csv", dir.path().to_str().unwrap());
    let path = exporter::export_month(&gw, &Settings::default(), m.subcommand_matches("export").unwrap())
        .unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["sheet", "날짜", "항목", "금액", "메모"]);
    let rows: Vec<Vec<String>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["수입", "2025-03-05", "급여", "3,000,000원", "3월 급여"],
            vec!["고정지출", "2025-03-25", "월세", "800,000원", ""],
            vec!["변동지출", "2025-03-10", "식비", "150,000원", "장보기"],
        ]
    );
}

#[test]
fn currency_suffix_comes_from_settings() {
    let gw = seeded();
    let dir = tempdir().unwrap();
    let settings = Settings {
        currency_suffix: " KRW".into(),
        ..Settings::default()
    };
    let m = export_args("json", dir.path().to_str().unwrap());
    let path = exporter::export_month(&gw, &settings, m.subcommand_matches("export").unwrap()).unwrap();
    let v: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(v["sheets"][0]["rows"][0][2], "3,000,000 KRW");
}

#[test]
fn empty_month_writes_header_only() {
    let gw = Gateway::new(MemoryStore::new());
    let dir = tempdir().unwrap();
    let m = export_args("csv", dir.path().to_str().unwrap());
    let path = exporter::export_month(&gw, &Settings::default(), m.subcommand_matches("export").unwrap())
        .unwrap();
    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn unknown_format_writes_nothing() {
    let gw = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("exports");
    let m = export_args("xlsx", out.to_str().unwrap());
    let err = exporter::export_month(&gw, &Settings::default(), m.subcommand_matches("export").unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
