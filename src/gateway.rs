// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed CRUD over the document store.
//!
//! Documents are decoded into the record types here; malformed entries are
//! coerced where the intent is unambiguous (numeric strings, whole floats) and
//! otherwise skipped with a warning, so the aggregation engine only ever sees
//! typed records.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value, json};

use crate::error::LedgerError;
use crate::models::{
    Category, Direction, FixedExpenseDraft, FixedExpenseRecord, MAX_AMOUNT, ScheduleDraft,
    ScheduleEvent, TransactionDraft, TransactionRecord,
};
use crate::store::{Collection, RecordStore};

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A record type persisted in one collection.
pub trait StoredRecord: Sized {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn decode(id: &str, doc: &Value) -> Result<Self, LedgerError>;
}

/// Everything the pure core needs for one interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub transactions: Vec<TransactionRecord>,
    pub fixed_expenses: Vec<FixedExpenseRecord>,
    pub schedules: Vec<ScheduleEvent>,
}

pub struct Gateway<S = Box<dyn RecordStore>> {
    store: S,
}

impl<S: RecordStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Gateway { store }
    }

    /// Reads and decodes one collection; malformed documents are dropped.
    pub fn try_list<T: StoredRecord>(&self) -> Result<Vec<T>, LedgerError> {
        let docs = self.store.list(T::COLLECTION)?;
        let mut out = Vec::with_capacity(docs.len());
        for (id, doc) in docs {
            match T::decode(&id, &doc) {
                Ok(rec) => out.push(rec),
                Err(e) => {
                    tracing::warn!(collection = %T::COLLECTION, %id, error = %e, "skipping malformed record")
                }
            }
        }
        Ok(out)
    }

    /// Like [`Gateway::try_list`] but a failed read yields an empty collection.
    pub fn list<T: StoredRecord>(&self) -> Vec<T> {
        self.try_list().unwrap_or_else(|e| {
            tracing::warn!(collection = %T::COLLECTION, error = %e, "read failed; treating collection as empty");
            Vec::new()
        })
    }

    pub fn find<T: StoredRecord>(&self, id: &str) -> Result<T, LedgerError> {
        self.try_list::<T>()?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| LedgerError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            })
    }

    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.list()
    }

    pub fn fixed_expenses(&self) -> Vec<FixedExpenseRecord> {
        self.list()
    }

    pub fn schedules(&self) -> Vec<ScheduleEvent> {
        self.list()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            transactions: self.transactions(),
            fixed_expenses: self.fixed_expenses(),
            schedules: self.schedules(),
        }
    }

    pub fn add_transaction(&self, draft: &TransactionDraft) -> Result<String, LedgerError> {
        let doc = encode_transaction(draft)?;
        self.create(Collection::Finances, &doc)
    }

    pub fn update_transaction(&self, id: &str, draft: &TransactionDraft) -> Result<(), LedgerError> {
        let doc = encode_transaction(draft)?;
        self.replace(Collection::Finances, id, &doc)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<(), LedgerError> {
        self.remove(Collection::Finances, id)
    }

    pub fn add_fixed_expense(&self, draft: &FixedExpenseDraft) -> Result<String, LedgerError> {
        let doc = encode_fixed_expense(draft)?;
        self.create(Collection::FixedExpenses, &doc)
    }

    pub fn update_fixed_expense(
        &self,
        id: &str,
        draft: &FixedExpenseDraft,
    ) -> Result<(), LedgerError> {
        let doc = encode_fixed_expense(draft)?;
        self.replace(Collection::FixedExpenses, id, &doc)
    }

    pub fn delete_fixed_expense(&self, id: &str) -> Result<(), LedgerError> {
        self.remove(Collection::FixedExpenses, id)
    }

    pub fn add_schedule(&self, draft: &ScheduleDraft) -> Result<String, LedgerError> {
        let doc = encode_schedule(draft)?;
        self.create(Collection::Schedules, &doc)
    }

    pub fn update_schedule(&self, id: &str, draft: &ScheduleDraft) -> Result<(), LedgerError> {
        let doc = encode_schedule(draft)?;
        self.replace(Collection::Schedules, id, &doc)
    }

    pub fn delete_schedule(&self, id: &str) -> Result<(), LedgerError> {
        self.remove(Collection::Schedules, id)
    }

    fn create(&self, collection: Collection, doc: &Value) -> Result<String, LedgerError> {
        match self.store.create(collection, doc) {
            Ok(id) => {
                tracing::info!(%collection, %id, "record created");
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(%collection, error = %e, "create not applied");
                Err(e)
            }
        }
    }

    fn replace(&self, collection: Collection, id: &str, doc: &Value) -> Result<(), LedgerError> {
        if id.trim().is_empty() {
            return Err(LedgerError::validation("record id is required"));
        }
        self.store
            .update(collection, id, doc)
            .inspect(|_| tracing::info!(%collection, %id, "record replaced"))
            .inspect_err(|e| tracing::warn!(%collection, %id, error = %e, "update not applied"))
    }

    fn remove(&self, collection: Collection, id: &str) -> Result<(), LedgerError> {
        if id.trim().is_empty() {
            return Err(LedgerError::validation("record id is required"));
        }
        self.store
            .delete(collection, id)
            .inspect(|_| tracing::info!(%collection, %id, "record deleted"))
            .inspect_err(|e| tracing::warn!(%collection, %id, error = %e, "delete not applied"))
    }
}

/// Sorts by date, latest first; records sharing a date keep their store order.
pub fn newest_first<T, F>(mut items: Vec<T>, date: F) -> Vec<T>
where
    F: Fn(&T) -> NaiveDate,
{
    items.sort_by(|a, b| date(b).cmp(&date(a)));
    items
}

fn now_stamp() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}

fn encode_transaction(draft: &TransactionDraft) -> Result<Value, LedgerError> {
    let amount = draft.validate()?;
    Ok(json!({
        "date": draft.date.format("%Y-%m-%d").to_string(),
        "category": draft.category.label(),
        "amount": amount,
        "description": draft.description,
        "type": draft.direction.as_str(),
        "timestamp": now_stamp(),
    }))
}

fn encode_fixed_expense(draft: &FixedExpenseDraft) -> Result<Value, LedgerError> {
    let amount = draft.validate()?;
    Ok(json!({
        "title": draft.title.trim(),
        "category": draft.category.label(),
        "amount": amount,
        "payment_day": draft.payment_day,
        "description": draft.description,
        "created_at": now_stamp(),
    }))
}

fn encode_schedule(draft: &ScheduleDraft) -> Result<Value, LedgerError> {
    draft.validate()?;
    Ok(json!({
        "date": draft.date.format("%Y-%m-%d").to_string(),
        "title": draft.title.trim(),
        "description": draft.description,
        "timestamp": now_stamp(),
    }))
}

impl StoredRecord for TransactionRecord {
    const COLLECTION: Collection = Collection::Finances;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode(id: &str, doc: &Value) -> Result<Self, LedgerError> {
        let doc = object(doc)?;
        let category: Category = required_text(doc, "category")?.parse()?;
        // older documents may lack `type`; the category implies it
        let direction = match doc.get("type").and_then(Value::as_str) {
            Some(t) => t.parse::<Direction>()?,
            None => category.direction(),
        };
        if category.direction() != direction {
            return Err(LedgerError::validation(format!(
                "Category '{category}' does not match type '{direction}'"
            )));
        }
        Ok(TransactionRecord {
            id: id.to_string(),
            date: date_field(doc, "date")?,
            direction,
            category,
            amount: amount_field(doc, "amount")?,
            description: text(doc, "description"),
            recorded_at: stamp_field(doc, "timestamp"),
        })
    }
}

impl StoredRecord for FixedExpenseRecord {
    const COLLECTION: Collection = Collection::FixedExpenses;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode(id: &str, doc: &Value) -> Result<Self, LedgerError> {
        let doc = object(doc)?;
        let category: Category = required_text(doc, "category")?.parse()?;
        if category.direction() != Direction::Expense {
            return Err(LedgerError::validation(format!(
                "Category '{category}' is not an expense category"
            )));
        }
        let payment_day = amount_field(doc, "payment_day")?;
        if !(1..=31).contains(&payment_day) {
            return Err(LedgerError::validation(format!(
                "Payment day {payment_day} out of range 1-31"
            )));
        }
        Ok(FixedExpenseRecord {
            id: id.to_string(),
            title: required_text(doc, "title")?,
            category,
            amount: amount_field(doc, "amount")?,
            payment_day: payment_day as u32,
            description: text(doc, "description"),
            recorded_at: stamp_field(doc, "created_at"),
        })
    }
}

impl StoredRecord for ScheduleEvent {
    const COLLECTION: Collection = Collection::Schedules;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode(id: &str, doc: &Value) -> Result<Self, LedgerError> {
        let doc = object(doc)?;
        Ok(ScheduleEvent {
            id: id.to_string(),
            date: date_field(doc, "date")?,
            title: required_text(doc, "title")?,
            description: text(doc, "description"),
            recorded_at: stamp_field(doc, "timestamp"),
        })
    }
}

fn object(doc: &Value) -> Result<&Map<String, Value>, LedgerError> {
    doc.as_object()
        .ok_or_else(|| LedgerError::validation("document is not an object"))
}

fn text(doc: &Map<String, Value>, key: &str) -> String {
    match doc.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn required_text(doc: &Map<String, Value>, key: &str) -> Result<String, LedgerError> {
    let v = text(doc, key);
    if v.trim().is_empty() {
        return Err(LedgerError::validation(format!("{key} is missing")));
    }
    Ok(v.trim().to_string())
}

fn date_field(doc: &Map<String, Value>, key: &str) -> Result<NaiveDate, LedgerError> {
    let raw = required_text(doc, key)?;
    // tolerate a time suffix such as `2025-03-05T00:00:00`
    let day_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| LedgerError::validation(format!("Invalid {key} '{raw}', expected YYYY-MM-DD")))
}

/// Non-negative integer from a JSON number or a numeric string (`"150,000"`).
fn amount_field(doc: &Map<String, Value>, key: &str) -> Result<u64, LedgerError> {
    let bad = |raw: &Value| LedgerError::validation(format!("Invalid {key} {raw}"));
    let raw = doc
        .get(key)
        .ok_or_else(|| LedgerError::validation(format!("{key} is missing")))?;
    let value = match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else if let Some(f) = n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0) {
                f as u64
            } else {
                return Err(bad(raw));
            }
        }
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().map_err(|_| bad(raw))?,
        _ => return Err(bad(raw)),
    };
    if value > MAX_AMOUNT {
        return Err(bad(raw));
    }
    Ok(value)
}

fn stamp_field(doc: &Map<String, Value>, key: &str) -> Option<NaiveDateTime> {
    doc.get(key)
        .and_then(Value::as_str)
        .and_then(|s| NaiveDateTime::parse_from_str(s, STAMP_FORMAT).ok())
}
