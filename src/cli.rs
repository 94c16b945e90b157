// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Reference month (defaults to the current month)")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .help("living-expense | liability | investment")
}

fn class_arg() -> Arg {
    Arg::new("class")
        .long("class")
        .value_name("CLASS")
        .help("fixed | variable")
}

pub fn build_cli() -> Command {
    Command::new("badbudget")
        .version(crate_version!())
        .about("Personal budgeting: income, costs, daily expenses, and investment goals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite file to use instead of the platform data dir"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .arg(
            Arg::new("remote_url")
                .long("remote-url")
                .global(true)
                .env("BADBUDGET_REMOTE_URL")
                .value_name("URL")
                .help("Base URL of the hosted record store"),
        )
        .arg(
            Arg::new("remote_key")
                .long("remote-key")
                .global(true)
                .env("BADBUDGET_REMOTE_KEY")
                .hide_env_values(true)
                .value_name("KEY")
                .help("API key for the hosted record store"),
        )
        .subcommand(
            Command::new("init")
                .about("Set up a new budget")
                .arg(Arg::new("income").long("income").required(true))
                .arg(Arg::new("invest_min").long("invest-min").required(true))
                .arg(Arg::new("invest_max").long("invest-max").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("email").long("email"))
                .arg(
                    Arg::new("cost")
                        .long("cost")
                        .action(ArgAction::Append)
                        .value_name("NAME:AMOUNT:TYPE:CLASS:SUBCATEGORY")
                        .help("Recurring cost to start with; repeat for more"),
                )
                .arg(month_arg())
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Replace an existing budget"),
                ),
        )
        .subcommand(json_flags(
            Command::new("show")
                .about("Dashboard summary for a month")
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("breakdown")
                .about("Totals per subcategory for a month")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("income")
                .about("Monthly income")
                .subcommand(
                    Command::new("set").arg(Arg::new("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("goals")
                .about("Investment target range")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("min").long("min").required(true))
                        .arg(Arg::new("max").long("max").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Declared allocations for the active month")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("variable").long("variable").required(true))
                        .arg(Arg::new("investment").long("investment").required(true))
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("cost")
                .about("Recurring costs")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(type_arg().required(true))
                        .arg(class_arg().default_value("fixed"))
                        .arg(Arg::new("subcategory").long("subcategory").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(type_arg()).arg(class_arg()),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(type_arg())
                        .arg(class_arg())
                        .arg(Arg::new("subcategory").long("subcategory")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("expense")
                .about("Daily expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("subcategory").long("subcategory").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("Living Expenses")
                                .help("Living Expenses | Liabilities | Investments"),
                        )
                        .arg(class_arg().default_value("variable")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(month_arg()).arg(class_arg()),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(month_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(class_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true))
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("subcategory")
                .about("Built-in and custom subcategories")
                .subcommand(json_flags(
                    Command::new("list").arg(type_arg().required(true)).arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include hidden custom subcategories"),
                    ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(type_arg().required(true))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("toggle").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("rename")
                        .about("Rename a subcategory on every cost and expense")
                        .arg(Arg::new("old").required(true))
                        .arg(Arg::new("new").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Display preferences")
                .subcommand(Command::new("get"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("theme").long("theme").help("light | dark")),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Copy the record to or from the hosted store")
                .subcommand(Command::new("push"))
                .subcommand(Command::new("pull")),
        )
        .subcommand(
            Command::new("export")
                .about("Write the record or its expenses to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json | csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(Command::new("doctor").about("Check the record for inconsistencies"))
        .subcommand(Command::new("reset").about("Delete the stored budget"))
}
