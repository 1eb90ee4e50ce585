// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use famledger::LedgerError;
use famledger::db::SqliteStore;
use famledger::gateway::Gateway;
use famledger::models::{
    Category, Direction, FixedExpenseDraft, FixedExpenseRecord, ScheduleDraft, ScheduleEvent,
    TransactionDraft, TransactionRecord,
};
use famledger::store::{Collection, MemoryStore, RecordStore};
use famledger::config::Settings;
use famledger::models::MAX_AMOUNT;
use famledger::{cli, commands::schedules, commands::transactions};
use serde_json::json;
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn food(amount: i64) -> TransactionDraft {
    TransactionDraft {
        date: d("2025-03-10"),
        direction: Direction::Expense,
        category: Category::Food,
        amount,
        description: "장보기".into(),
    }
}

#[test]
fn offline_reads_are_empty_and_writes_fail() {
    let store = MemoryStore::new();
    let gw = Gateway::new(store.clone());
    gw.add_transaction(&food(10_000)).unwrap();

    store.set_offline(true);
    assert!(gw.transactions().is_empty());
    assert!(gw.snapshot().schedules.is_empty());
    let err = gw.add_transaction(&food(5_000)).unwrap_err();
    assert!(err.is_unavailable());
    assert!(gw.try_list::<TransactionRecord>().is_err());

    store.set_offline(false);
    let all = gw.transactions();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, 10_000);
}

#[test]
fn malformed_documents_are_skipped() {
    let store = MemoryStore::new();
    let gw = Gateway::new(store.clone());
    gw.add_transaction(&food(12_000)).unwrap();
    store.insert_raw(Collection::Finances, "-bad1", json!({"date": "2025-03-02"}));
    store.insert_raw(
        Collection::Finances,
        "-bad2",
        json!({"date": "not a date", "category": "식비", "amount": 1}),
    );
    store.insert_raw(Collection::Finances, "-bad3", json!("just text"));
    store.insert_raw(
        Collection::Finances,
        "-legacy",
        json!({"date": "2025-03-03", "category": "급여", "amount": "1,500,000"}),
    );

    let txs = gw.transactions();
    let ids: Vec<&str> = txs.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"-legacy"));
    let legacy = txs.iter().find(|t| t.id == "-legacy").unwrap();
    assert_eq!(legacy.direction, Direction::Income);
    assert_eq!(legacy.amount, 1_500_000);
}

#[test]
fn invalid_drafts_never_reach_the_store() {
    let store = MemoryStore::new();
    let gw = Gateway::new(store.clone());

    let err = gw.add_transaction(&food(-1)).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let mismatched = TransactionDraft {
        direction: Direction::Income,
        ..food(1_000)
    };
    assert!(gw.add_transaction(&mismatched).is_err());

    let blank = ScheduleDraft {
        date: d("2025-03-01"),
        title: "   ".into(),
        description: String::new(),
    };
    assert!(gw.add_schedule(&blank).is_err());

    let bad_day = FixedExpenseDraft {
        title: "관리비".into(),
        category: Category::MaintenanceFee,
        amount: 100_000,
        payment_day: 32,
        description: String::new(),
    };
    assert!(gw.add_fixed_expense(&bad_day).is_err());

    for c in Collection::ALL {
        assert!(store.list(c).unwrap().is_empty());
    }
}

#[test]
fn update_replaces_whole_record() {
    let gw = Gateway::new(MemoryStore::new());
    let id = gw
        .add_fixed_expense(&FixedExpenseDraft {
            title: "넷플릭스".into(),
            category: Category::Subscription,
            amount: 17_000,
            payment_day: 5,
            description: "가족 요금제".into(),
        })
        .unwrap();

    gw.update_fixed_expense(
        &id,
        &FixedExpenseDraft {
            title: "넷플릭스".into(),
            category: Category::Subscription,
            amount: 13_500,
            payment_day: 20,
            description: String::new(),
        },
    )
    .unwrap();

    let rec: FixedExpenseRecord = gw.find(&id).unwrap();
    assert_eq!(rec.amount, 13_500);
    assert_eq!(rec.payment_day, 20);
    assert_eq!(rec.description, "");
    assert_eq!(gw.fixed_expenses().len(), 1);
}

#[test]
fn find_reports_missing_ids() {
    let gw = Gateway::new(MemoryStore::new());
    let err = gw.find::<ScheduleEvent>("-nope").unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
    assert!(gw.delete_schedule("-nope").is_ok());
    assert!(gw.delete_schedule(" ").is_err());
}

#[test]
fn schedule_edit_keeps_untouched_fields() {
    let gw = Gateway::new(MemoryStore::new());
    let id = gw
        .add_schedule(&ScheduleDraft {
            date: d("2025-05-05"),
            title: "어린이날".into(),
            description: "놀이공원".into(),
        })
        .unwrap();

    let m = cli::build_cli().get_matches_from([
        "famledger",
        "schedule",
        "edit",
        id.as_str(),
        "--date",
        "2025-05-06",
    ]);
    schedules::handle(&gw, m.subcommand_matches("schedule").unwrap()).unwrap();

    let ev: ScheduleEvent = gw.find(&id).unwrap();
    assert_eq!(ev.date, d("2025-05-06"));
    assert_eq!(ev.title, "어린이날");
    assert_eq!(ev.description, "놀이공원");

    let m = cli::build_cli().get_matches_from(["famledger", "schedule", "edit", "-missing", "--title", "x"]);
    assert!(schedules::handle(&gw, m.subcommand_matches("schedule").unwrap()).is_err());
    assert_eq!(gw.schedules().len(), 1);
}

#[test]
fn schedule_list_filters_month_newest_first() {
    let gw = Gateway::new(MemoryStore::new());
    for (date, title) in [("2025-03-02", "a"), ("2025-03-20", "b"), ("2025-04-01", "c"), ("2025-03-20", "d")] {
        gw.add_schedule(&ScheduleDraft {
            date: d(date),
            title: title.into(),
            description: String::new(),
        })
        .unwrap();
    }
    let m = cli::build_cli().get_matches_from(["famledger", "schedule", "list", "--month", "2025-03"]);
    let sub = m
        .subcommand_matches("schedule")
        .and_then(|s| s.subcommand_matches("list"))
        .unwrap();
    let titles: Vec<String> = schedules::query_events(&gw, sub)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, ["b", "d", "a"]);
}

#[test]
fn sqlite_backend_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    let id = {
        let gw = Gateway::new(SqliteStore::open(&path).unwrap());
        gw.add_transaction(&TransactionDraft {
            date: d("2025-03-05"),
            direction: Direction::Income,
            category: Category::Salary,
            amount: 3_000_000,
            description: String::new(),
        })
        .unwrap();
        gw.add_transaction(&food(150_000)).unwrap()
    };

    let gw = Gateway::new(SqliteStore::open(&path).unwrap());
    let txs = gw.transactions();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].category, Category::Salary);
    assert_eq!(txs[1].id, id);

    gw.delete_transaction(&id).unwrap();
    gw.delete_transaction(&id).unwrap();
    assert_eq!(gw.transactions().len(), 1);
}

#[test]
fn largest_stored_amount_survives_an_edit() {
    let store = MemoryStore::new();
    let gw = Gateway::new(store.clone());
    store.insert_raw(
        Collection::Finances,
        "-big",
        json!({"date": "2025-03-10", "category": "식비", "amount": MAX_AMOUNT, "type": "expense"}),
    );
    store.insert_raw(
        Collection::Finances,
        "-huge",
        json!({"date": "2025-03-11", "category": "식비", "amount": u64::MAX, "type": "expense"}),
    );

    let m = cli::build_cli().get_matches_from(["famledger", "tx", "edit", "-big", "--memo", "가전"]);
    transactions::handle(&gw, &Settings::default(), m.subcommand_matches("tx").unwrap()).unwrap();

    let rec: TransactionRecord = gw.find("-big").unwrap();
    assert_eq!(rec.amount, MAX_AMOUNT);
    assert_eq!(rec.description, "가전");
    assert!(matches!(
        gw.find::<TransactionRecord>("-huge"),
        Err(LedgerError::NotFound { .. })
    ));
}
