// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::LedgerError;
use crate::store::{Collection, RecordStore};
use crate::utils::http_client;

/// Realtime-database style REST backend: every collection lives at
/// `{base}/{collection}.json` and every document at `{base}/{collection}/{id}.json`.
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PushReply {
    name: String,
}

impl RemoteStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(LedgerError::validation(format!(
                "Remote URL '{base_url}' must start with http:// or https://"
            )));
        }
        Ok(RemoteStore {
            client: http_client(timeout)?,
            base_url,
        })
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}.json", self.base_url, collection.path())
    }

    fn document_url(&self, collection: Collection, id: &str) -> Result<String, LedgerError> {
        if id.is_empty() || id.contains(['/', '.', '#', '$', '[', ']']) {
            return Err(LedgerError::validation(format!("Invalid record id '{id}'")));
        }
        Ok(format!("{}/{}/{}.json", self.base_url, collection.path(), id))
    }
}

/// Turns a collection payload into ordered `(id, document)` pairs. `null`
/// means the collection does not exist yet.
fn documents_from_payload(payload: Value) -> Result<Vec<(String, Value)>, LedgerError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(LedgerError::RemoteUnavailable(format!(
            "unexpected collection payload: {other}"
        ))),
    }
}

impl RecordStore for RemoteStore {
    fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, LedgerError> {
        let resp = self
            .client
            .get(self.collection_url(collection))
            .send()?
            .error_for_status()?;
        documents_from_payload(resp.json()?)
    }

    fn create(&self, collection: Collection, record: &Value) -> Result<String, LedgerError> {
        let resp = self
            .client
            .post(self.collection_url(collection))
            .json(record)
            .send()?
            .error_for_status()?;
        let reply: PushReply = resp.json()?;
        Ok(reply.name)
    }

    fn update(&self, collection: Collection, id: &str, record: &Value) -> Result<(), LedgerError> {
        self.client
            .put(self.document_url(collection, id)?)
            .json(record)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), LedgerError> {
        self.client
            .delete(self.document_url(collection, id)?)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}
