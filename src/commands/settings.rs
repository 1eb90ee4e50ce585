// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, config_path};
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            println!("{}", pretty_table(&["Key", "Value"], settings.rows()));
        }
        Some(("set", sub)) => {
            let path = config_path()?;
            set_key(&path, sub)?;
        }
        _ => {}
    }
    Ok(())
}

/// Updates one key in the file at `path`. Environment overrides are not persisted.
pub fn set_key(path: &Path, sub: &clap::ArgMatches) -> Result<Settings> {
    let key = sub.get_one::<String>("key").map(String::as_str).unwrap_or("");
    let value = sub.get_one::<String>("value").map(String::as_str).unwrap_or("");
    let mut on_disk = Settings::from_file(path)?;
    on_disk.set(key, value)?;
    on_disk.save(path)?;
    println!("Set {} = {} in {}", key, value, path.display());
    Ok(on_disk)
}
