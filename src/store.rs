// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The document-store boundary: named collections of JSON documents keyed by
//! store-generated ids.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Schedules,
    Finances,
    FixedExpenses,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Schedules,
        Collection::Finances,
        Collection::FixedExpenses,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Collection::Schedules => "schedules",
            Collection::Finances => "finances",
            Collection::FixedExpenses => "fixed_expenses",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Request/response access to the shared store.
///
/// `list` returns documents in store order. `update` replaces the whole
/// document at `id` (creating it if absent) and `delete` of an unknown id
/// succeeds, matching the REST backend. There is no cross-client locking.
pub trait RecordStore {
    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, LedgerError>;
    fn create(&self, collection: Collection, record: &Value) -> Result<String, LedgerError>;
    fn update(&self, collection: Collection, id: &str, record: &Value) -> Result<(), LedgerError>;
    fn delete(&self, collection: Collection, id: &str) -> Result<(), LedgerError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, LedgerError> {
        (**self).list(collection)
    }

    fn create(&self, collection: Collection, record: &Value) -> Result<String, LedgerError> {
        (**self).create(collection, record)
    }

    fn update(&self, collection: Collection, id: &str, record: &Value) -> Result<(), LedgerError> {
        (**self).update(collection, id, record)
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), LedgerError> {
        (**self).delete(collection, id)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    next_id: u64,
    offline: bool,
    collections: HashMap<Collection, Vec<(String, Value)>>,
}

/// In-process store. Clones share the same documents, so two clones behave
/// like two clients of one remote database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with `RemoteUnavailable`.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.offline = offline;
        }
    }

    /// Stores a raw document under a caller-chosen id, bypassing validation.
    pub fn insert_raw(&self, collection: Collection, id: &str, record: Value) {
        if let Ok(mut inner) = self.inner.lock() {
            inner
                .collections
                .entry(collection)
                .or_default()
                .push((id.to_string(), record));
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, MemoryInner>, LedgerError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| LedgerError::RemoteUnavailable("memory store poisoned".into()))?;
        if inner.offline {
            return Err(LedgerError::RemoteUnavailable("memory store offline".into()));
        }
        Ok(inner)
    }
}

impl RecordStore for MemoryStore {
    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, LedgerError> {
        let inner = self.guard()?;
        Ok(inner
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    fn create(&self, collection: Collection, record: &Value) -> Result<String, LedgerError> {
        let mut inner = self.guard()?;
        inner.next_id += 1;
        // zero-padded so lexical order matches creation order
        let id = format!("-m{:012}", inner.next_id);
        inner
            .collections
            .entry(collection)
            .or_default()
            .push((id.clone(), record.clone()));
        Ok(id)
    }

    fn update(&self, collection: Collection, id: &str, record: &Value) -> Result<(), LedgerError> {
        let mut inner = self.guard()?;
        let docs = inner.collections.entry(collection).or_default();
        match docs.iter_mut().find(|(k, _)| k == id) {
            Some((_, doc)) => *doc = record.clone(),
            None => docs.push((id.to_string(), record.clone())),
        }
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), LedgerError> {
        let mut inner = self.guard()?;
        if let Some(docs) = inner.collections.get_mut(&collection) {
            docs.retain(|(k, _)| k != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_documents() {
        let a = MemoryStore::new();
        let b = a.clone();
        let id = a.create(Collection::Schedules, &json!({"title": "x"})).unwrap();
        let listed = b.list(Collection::Schedules).unwrap();
        assert_eq!(listed, vec![(id, json!({"title": "x"}))]);
        assert!(b.list(Collection::Finances).unwrap().is_empty());
    }

    #[test]
    fn update_replaces_in_place_and_delete_is_idempotent() {
        let s = MemoryStore::new();
        let first = s.create(Collection::Finances, &json!({"n": 1})).unwrap();
        let second = s.create(Collection::Finances, &json!({"n": 2})).unwrap();
        s.update(Collection::Finances, &first, &json!({"n": 3})).unwrap();
        let ids: Vec<_> = s
            .list(Collection::Finances)
            .unwrap()
            .into_iter()
            .map(|(k, v)| (k, v["n"].as_i64().unwrap()))
            .collect();
        assert_eq!(ids, vec![(first.clone(), 3), (second, 2)]);
        s.delete(Collection::Finances, &first).unwrap();
        s.delete(Collection::Finances, &first).unwrap();
        assert_eq!(s.list(Collection::Finances).unwrap().len(), 1);
    }

    #[test]
    fn offline_store_reports_unavailable() {
        let s = MemoryStore::new();
        s.set_offline(true);
        assert!(s.list(Collection::Schedules).unwrap_err().is_unavailable());
        assert!(s.create(Collection::Schedules, &json!({})).is_err());
        s.set_offline(false);
        assert!(s.list(Collection::Schedules).is_ok());
    }
}
