// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Target month (defaults to the current month)")
}

fn id_arg() -> Arg {
    // store-generated ids may start with '-'
    Arg::new("id")
        .required(true)
        .value_name("ID")
        .allow_hyphen_values(true)
}

fn amount_arg(required: bool) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(required)
        .allow_hyphen_values(true)
        .help("Whole currency units")
}

fn schedule_cmd() -> Command {
    Command::new("schedule")
        .about("Shared family schedule")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an event")
                .arg(Arg::new("date").long("date").required(true).value_name("YYYY-MM-DD"))
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("memo").long("memo")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List events, newest first")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of an event")
                .arg(id_arg())
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("memo").long("memo")),
        )
        .subcommand(Command::new("rm").about("Delete an event").arg(id_arg()))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Income and expense records")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record income or an expense")
                .arg(Arg::new("date").long("date").required(true).value_name("YYYY-MM-DD"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_name("income|expense"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(amount_arg(true))
                .arg(Arg::new("memo").long("memo")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List records, newest first")
                .arg(month_arg())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of a record")
                .arg(id_arg())
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                .arg(Arg::new("type").long("type").value_name("income|expense"))
                .arg(Arg::new("category").long("category"))
                .arg(amount_arg(false))
                .arg(Arg::new("memo").long("memo")),
        )
        .subcommand(Command::new("rm").about("Delete a record").arg(id_arg()))
}

fn fixed_cmd() -> Command {
    let day = |required: bool| {
        Arg::new("day")
            .long("day")
            .required(required)
            .value_parser(value_parser!(u32))
            .help("Payment day of month (1-31)")
    };
    Command::new("fixed")
        .about("Recurring monthly expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a fixed expense")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(amount_arg(true))
                .arg(day(true))
                .arg(Arg::new("memo").long("memo")),
        )
        .subcommand(json_flags(Command::new("list").about("List fixed expenses")))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of a fixed expense")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("category").long("category"))
                .arg(amount_arg(false))
                .arg(day(false))
                .arg(Arg::new("memo").long("memo")),
        )
        .subcommand(Command::new("rm").about("Delete a fixed expense").arg(id_arg()))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Monthly statistics")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("month")
                .about("Income, expense, balance and category split for one month")
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("history")
                .about("Rollups for the trailing months")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(u16).range(1..=1200))
                        .default_value("6"),
                )
                .arg(
                    Arg::new("until")
                        .long("until")
                        .value_name("YYYY-MM")
                        .help("Last month of the range (defaults to the current month)"),
                )
                .arg(
                    Arg::new("observed")
                        .long("observed")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["months", "until"])
                        .help("Every month that has at least one transaction"),
                ),
        ))
}

pub fn build_cli() -> Command {
    Command::new("famledger")
        .about("Shared family ledger and schedule")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the local store"))
        .subcommand(schedule_cmd())
        .subcommand(tx_cmd())
        .subcommand(fixed_cmd())
        .subcommand(report_cmd())
        .subcommand(json_flags(
            Command::new("calendar")
                .about("Month grid with events")
                .arg(month_arg())
                .arg(
                    Arg::new("week-start")
                        .long("week-start")
                        .value_name("sunday|monday"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export a month as income / fixed / variable sheets")
                .arg(month_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_name("csv|json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value(".")
                        .value_name("DIR"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Bulk import")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("CSV with date,type,category,amount,description")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("categories").about("List categories by type"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true).allow_hyphen_values(true)),
                ),
        )
}
