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
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn extra_arg() -> Arg {
    Arg::new("extra")
        .long("extra")
        .help("Extra monthly budget on top of minimums (defaults to config extra_budget)")
}

fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .help("First plan month, YYYY-MM (defaults to the current month)")
}

fn strategy_arg() -> Arg {
    Arg::new("strategy")
        .long("strategy")
        .required(true)
        .value_parser(["snowball", "avalanche"])
}

pub fn build_cli() -> Command {
    Command::new("payoff")
        .version(crate_version!())
        .about("Debt snowball and avalanche planner")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log output (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("debt")
                .about("Manage debts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .required(true)
                                .help("Annual interest rate in percent"),
                        )
                        .arg(Arg::new("min_payment").long("min-payment").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set-balance")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("import").about("Import data from CSV").subcommand(
                Command::new("debts")
                    .about("CSV with header name,balance,rate,min_payment")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("plan")
                .about("Simulate payoff plans")
                .subcommand(json_flags(
                    Command::new("schedule")
                        .about("Amortization schedule for one debt")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(extra_arg())
                        .arg(start_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("run")
                        .about("Pay off every debt with one strategy")
                        .arg(strategy_arg())
                        .arg(extra_arg())
                        .arg(start_arg()),
                ))
                .subcommand(
                    Command::new("compare")
                        .about("Snowball versus avalanche")
                        .arg(extra_arg())
                        .arg(start_arg())
                        .arg(
                            Arg::new("threshold")
                                .long("threshold")
                                .help("Minimum interest savings before avalanche is recommended"),
                        )
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue)
                                .help("Print pretty JSON"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").about("Export plan ledgers").subcommand(
                Command::new("schedule")
                    .arg(strategy_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .value_parser(["csv", "json"]),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(extra_arg())
                    .arg(start_arg()),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("key")
                                .long("key")
                                .required(true)
                                .value_parser([
                                    "base_currency",
                                    "extra_budget",
                                    "max_months",
                                    "savings_threshold",
                                ]),
                        )
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Find debts that can never be paid off"))
}
