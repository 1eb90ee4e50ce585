// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::store::Collection;

/// Failures surfaced by the ledger core and its store backends.
///
/// Payment-day overflow is deliberately absent: projections clamp instead of failing.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The store could not be reached or answered with a non-success status.
    #[error("record store unavailable: {0}")]
    RemoteUnavailable(String),
    /// Input rejected before any write was attempted.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: Collection, id: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, LedgerError::RemoteUnavailable(_))
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(e: rusqlite::Error) -> Self {
        LedgerError::RemoteUnavailable(format!("sqlite: {e}"))
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::RemoteUnavailable(format!("http: {e}"))
    }
}
