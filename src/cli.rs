// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const KINDS: [&str; 3] = ["income", "spend", "investment"];

fn kind() -> Arg {
    Arg::new("kind")
        .long("kind")
        .short('k')
        .required(true)
        .value_parser(KINDS)
        .help("Entry kind: income, spend or investment")
}

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

fn period() -> Arg {
    Arg::new("period")
        .long("period")
        .short('p')
        .default_value("all")
        .help("all, a month (YYYY-MM) or a financial year (YYYY-YYYY)")
}

fn month() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .help("Month YYYY-MM (defaults to the current month)")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Track income, spend, investments and receivables; report by month and financial year")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("SQLite database path (overrides FINTRACK_DB)"),
        )
        .arg(
            Arg::new("owner")
                .long("owner")
                .global(true)
                .help("Owner whose data to use (overrides FINTRACK_OWNER and the stored default)"),
        )
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("category")
                .about("Income sources, spend categories and investment assets")
                .subcommand(
                    Command::new("add")
                        .arg(kind())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(kind())))
                .subcommand(
                    Command::new("rename")
                        .arg(kind())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a category and every entry filed under it")
                        .arg(kind())
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income, spend and investment entries")
                .subcommand(
                    Command::new("add")
                        .arg(kind())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").short('c').required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
                        .arg(month().conflicts_with("date"))
                        .arg(Arg::new("label").long("label").help("Required for spend and investment")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(kind())
                        .arg(period())
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .default_value("all"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(kind())
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("label").long("label")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(kind())
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("receivable")
                .about("Money owed to you")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("purpose").long("purpose").required(true))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("purpose").long("purpose"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and breakdowns")
                .subcommand(json_flags(
                    Command::new("dashboard")
                        .about("Monthly income, spend and investment plus outstanding receivables")
                        .arg(month()),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Every category with its total, largest first")
                        .arg(kind())
                        .arg(period()),
                ))
                .subcommand(json_flags(
                    Command::new("years")
                        .about("Financial years with their totals")
                        .arg(kind()),
                ))
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Totals per calendar month, most recent first")
                        .arg(kind())
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .default_value("12"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("statement")
                        .about("Entries for one month, optionally for one category")
                        .arg(kind())
                        .arg(month())
                        .arg(Arg::new("category").long("category").short('c')),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write entries to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(kind())
                        .arg(period())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check for orphaned entries and unreadable dates"))
        .subcommand(
            Command::new("config")
                .about("Show or change stored defaults")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set-owner").arg(Arg::new("name").required(true)),
                ),
        )
}
