// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use famledger::config::{Backend, Settings};
use famledger::gateway::Gateway;
use famledger::remote::RemoteStore;
use famledger::store::RecordStore;
use famledger::{cli, commands, db};

fn open_store(settings: &Settings) -> Result<Box<dyn RecordStore>> {
    match settings.backend {
        Backend::Local => Ok(Box::new(db::open_or_init()?)),
        Backend::Remote => {
            let url = settings
                .remote_url
                .as_deref()
                .context("backend is 'remote' but remote_url is not set")?;
            Ok(Box::new(RemoteStore::new(url, settings.timeout())?))
        }
    }
}

fn main() -> Result<()> {
    famledger::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings = Settings::load()?;
    match matches.subcommand() {
        Some(("config", sub)) => return commands::settings::handle(&settings, sub),
        Some(("categories", _)) => return commands::categories::handle(),
        _ => {}
    }

    let gw: Gateway = Gateway::new(open_store(&settings)?);

    match matches.subcommand() {
        Some(("init", _)) => match settings.backend {
            Backend::Local => println!("Store initialized at {}", db::db_path()?.display()),
            Backend::Remote => println!("Using remote store; nothing to initialize"),
        },
        Some(("schedule", sub)) => commands::schedules::handle(&gw, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&gw, &settings, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&gw, &settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(&gw, &settings, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle(&gw, &settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&gw, &settings, sub)?,
        Some(("import", sub)) => commands::importer::handle(&gw, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
