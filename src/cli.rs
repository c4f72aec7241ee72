// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (defaults to the current month)")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn transaction_fields() -> [Arg; 5] {
    [
        Arg::new("date").long("date").required(true).help("YYYY-MM-DD"),
        Arg::new("type")
            .long("type")
            .required(true)
            .help("income | expense"),
        Arg::new("platform")
            .long("platform")
            .required(true)
            .help("BRI | BCA | Flazz | Wallet"),
        Arg::new("category").long("category").required(true),
        Arg::new("amount").long("amount").required(true),
    ]
}

fn transfer_fields() -> [Arg; 4] {
    [
        Arg::new("date").long("date").required(true).help("YYYY-MM-DD"),
        Arg::new("from").long("from").required(true).help("Source account"),
        Arg::new("to").long("to").required(true).help("Target account"),
        Arg::new("amount").long("amount").required(true),
    ]
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .version(crate_version!())
        .about("Personal finance tracker: transactions, transfers and a shopping list")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .args(transaction_fields()),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace every field of a transaction")
                        .arg(id_arg())
                        .args(transaction_fields()),
                )
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
                .subcommand(
                    Command::new("list")
                        .about("Transactions of one month, newest first")
                        .arg(month_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("transfer")
                .about("Money moved between accounts")
                .subcommand(
                    Command::new("add")
                        .about("Record a transfer")
                        .args(transfer_fields()),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace every field of a transfer")
                        .arg(id_arg())
                        .args(transfer_fields()),
                )
                .subcommand(Command::new("rm").about("Delete a transfer").arg(id_arg()))
                .subcommand(
                    Command::new("list")
                        .about("Transfers of one month, newest first")
                        .arg(month_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("shop")
                .about("Shopping list")
                .subcommand(
                    Command::new("add")
                        .about("Plan a purchase")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("item").long("item").required(true))
                        .arg(Arg::new("estimate").long("estimate").required(true)),
                )
                .subcommand(Command::new("check").about("Mark as purchased").arg(id_arg()))
                .subcommand(
                    Command::new("uncheck")
                        .about("Mark as not purchased")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("actual")
                        .about("Set the price actually paid")
                        .arg(id_arg())
                        .arg(Arg::new("price").long("price").required(true)),
                )
                .subcommand(Command::new("rm").about("Delete an item").arg(id_arg()))
                .subcommand(Command::new("list").about("Items and projection").args(json_args())),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Balances, breakdowns and shopping projection for one month")
                .arg(month_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the whole result bundle as JSON"),
                ),
        )
        .subcommand(Command::new("doctor").about("Report records the engine cannot use"))
        .subcommand(
            Command::new("export")
                .about("Export records")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .help("csv | json"),
                )
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("collection")
                        .long("collection")
                        .default_value("transactions")
                        .help("transactions | transfers | shopping (csv only)"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Stored settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
