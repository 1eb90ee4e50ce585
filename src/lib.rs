// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Family ledger core: typed access to a shared document store, month rollups
//! that fold recurring fixed expenses into one-off transactions, a
//! weekday-aligned month calendar, and a sheet-per-group export.

pub mod aggregate;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod gateway;
pub mod models;
pub mod period;
pub mod remote;
pub mod store;
pub mod utils;

pub use error::LedgerError;

/// Installs logging once; safe to call repeatedly.
pub fn init() {
    utils::init_tracing();
}
