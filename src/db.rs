// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::project_dirs;
use crate::error::LedgerError;
use crate::store::{Collection, RecordStore};

pub fn db_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("famledger.sqlite"))
}

pub fn open_or_init() -> Result<SqliteStore> {
    let path = db_path()?;
    SqliteStore::open(&path)
}

/// Local backend keeping each collection as JSON documents in one SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS documents(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        body TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(collection, id)
    );
    CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
    "#,
    )?;
    Ok(())
}

impl RecordStore for SqliteStore {
    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, LedgerError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM documents WHERE collection=?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![collection.path()], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, body) = row?;
            match serde_json::from_str::<Value>(&body) {
                Ok(v) => out.push((id, v)),
                Err(e) => tracing::warn!(%collection, %id, error = %e, "skipping unreadable document"),
            }
        }
        Ok(out)
    }

    fn create(&self, collection: Collection, record: &Value) -> Result<String, LedgerError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.conn.execute(
            "INSERT INTO documents(collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection.path(), id, record.to_string()],
        )?;
        Ok(id)
    }

    fn update(&self, collection: Collection, id: &str, record: &Value) -> Result<(), LedgerError> {
        self.conn.execute(
            "INSERT INTO documents(collection, id, body) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET body=excluded.body, updated_at=datetime('now')",
            params![collection.path(), id, record.to_string()],
        )?;
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), LedgerError> {
        self.conn.execute(
            "DELETE FROM documents WHERE collection=?1 AND id=?2",
            params![collection.path(), id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn documents_round_trip_in_creation_order() {
        let s = SqliteStore::open_in_memory().unwrap();
        let a = s.create(Collection::Finances, &json!({"n": 1})).unwrap();
        let b = s.create(Collection::Finances, &json!({"n": 2})).unwrap();
        s.create(Collection::Schedules, &json!({"n": 9})).unwrap();
        s.update(Collection::Finances, &a, &json!({"n": 3})).unwrap();
        let docs = s.list(Collection::Finances).unwrap();
        assert_eq!(docs, vec![(a.clone(), json!({"n": 3})), (b, json!({"n": 2}))]);
        s.delete(Collection::Finances, &a).unwrap();
        assert_eq!(s.list(Collection::Finances).unwrap().len(), 1);
        assert_eq!(s.list(Collection::Schedules).unwrap().len(), 1);
    }
}
