// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calendar;
pub mod categories;
pub mod exporter;
pub mod fixed;
pub mod importer;
pub mod reports;
pub mod schedules;
pub mod settings;
pub mod transactions;

/// Optional string argument, trimmed, owned.
pub(crate) fn opt_arg(m: &clap::ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).map(|s| s.trim().to_string())
}

/// Required string argument; clap enforces presence, so absence is reported as a usage error.
pub(crate) fn req_arg(m: &clap::ArgMatches, id: &str) -> anyhow::Result<String> {
    opt_arg(m, id).ok_or_else(|| anyhow::anyhow!("--{} is required", id))
}
