// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Two family members working on the same shared store without locking.

use chrono::NaiveDate;
use famledger::gateway::Gateway;
use famledger::models::{Category, Direction, TransactionDraft, TransactionRecord};
use famledger::store::MemoryStore;

fn draft(amount: i64, memo: &str) -> TransactionDraft {
    TransactionDraft {
        date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        direction: Direction::Expense,
        category: Category::Food,
        amount,
        description: memo.into(),
    }
}

fn pair() -> (Gateway<MemoryStore>, Gateway<MemoryStore>) {
    let shared = MemoryStore::new();
    (Gateway::new(shared.clone()), Gateway::new(shared))
}

#[test]
fn writes_from_one_client_are_visible_to_the_other() {
    let (mom, dad) = pair();
    let id = mom.add_transaction(&draft(20_000, "외식")).unwrap();
    let seen: TransactionRecord = dad.find(&id).unwrap();
    assert_eq!(seen.amount, 20_000);
}

#[test]
fn last_write_wins() {
    let (mom, dad) = pair();
    let id = mom.add_transaction(&draft(20_000, "외식")).unwrap();

    // both read the same version, then edit it independently
    let mine: TransactionRecord = mom.find(&id).unwrap();
    let theirs: TransactionRecord = dad.find(&id).unwrap();
    assert_eq!(mine, theirs);

    mom.update_transaction(&id, &draft(25_000, "외식 + 디저트")).unwrap();
    dad.update_transaction(&id, &draft(18_000, "외식")).unwrap();

    let all = mom.transactions();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, 18_000);
    assert_eq!(all[0].description, "외식");
}

#[test]
fn edit_after_delete_brings_the_record_back() {
    let (mom, dad) = pair();
    let id = mom.add_transaction(&draft(9_000, "커피")).unwrap();

    mom.delete_transaction(&id).unwrap();
    assert!(dad.transactions().is_empty());

    // a stale edit from the other client upserts
    dad.update_transaction(&id, &draft(9_500, "커피")).unwrap();
    let back: TransactionRecord = mom.find(&id).unwrap();
    assert_eq!(back.amount, 9_500);
}

#[test]
fn double_delete_is_harmless() {
    let (mom, dad) = pair();
    let id = mom.add_transaction(&draft(1_000, "")).unwrap();
    mom.delete_transaction(&id).unwrap();
    dad.delete_transaction(&id).unwrap();
    assert!(mom.transactions().is_empty());
}
