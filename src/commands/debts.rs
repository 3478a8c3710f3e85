// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Debt;
use crate::planner::amortization::validate_debt;
use crate::planner::monthly_interest;
use crate::utils::{
    fmt_money, get_base_currency, load_debts, maybe_print_json, parse_decimal, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use log::info;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-balance", sub)) => set_balance(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Parse and validate a debt before it reaches the table.
pub fn parse_debt(name: &str, balance: &str, rate: &str, min_payment: &str) -> Result<Debt> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Debt name must not be empty"));
    }
    let debt = Debt::new(
        0,
        name,
        parse_decimal(balance)?,
        parse_decimal(rate)?,
        parse_decimal(min_payment)?,
    );
    validate_debt(&debt)?;
    Ok(debt)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let debt = parse_debt(
        sub.get_one::<String>("name").unwrap(),
        sub.get_one::<String>("balance").unwrap(),
        sub.get_one::<String>("rate").unwrap(),
        sub.get_one::<String>("min_payment").unwrap(),
    )?;
    conn.execute(
        "INSERT INTO debts(name, balance, rate, min_payment) VALUES (?1,?2,?3,?4)",
        params![
            debt.name,
            debt.principal.to_string(),
            debt.annual_rate_percent.to_string(),
            debt.minimum_payment.to_string()
        ],
    )
    .with_context(|| format!("Could not add debt '{}'", debt.name))?;
    let ccy = get_base_currency(conn)?;
    info!("stored debt '{}'", debt.name);
    println!(
        "Added debt '{}' ({} at {}% APR, minimum {})",
        debt.name,
        fmt_money(&debt.principal, &ccy),
        debt.annual_rate_percent,
        fmt_money(&debt.minimum_payment, &ccy)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let debts = load_debts(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &debts)? {
        return Ok(());
    }
    let ccy = get_base_currency(conn)?;
    let rows = debts
        .iter()
        .map(|d| {
            vec![
                d.name.clone(),
                fmt_money(&d.principal, &ccy),
                format!("{}%", d.annual_rate_percent),
                fmt_money(&d.minimum_payment, &ccy),
                fmt_money(&monthly_interest(d.principal, d.annual_rate_percent), &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Name", "Balance", "APR", "Minimum", "Interest / month"],
            rows
        )
    );
    Ok(())
}

fn set_balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let mut debt = crate::utils::debt_by_name(conn, name)?;
    debt.principal = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    validate_debt(&debt)?;
    conn.execute(
        "UPDATE debts SET balance=?1 WHERE id=?2",
        params![debt.principal.to_string(), debt.id],
    )?;
    println!(
        "Balance of '{}' set to {}",
        debt.name,
        fmt_money(&debt.principal, &get_base_currency(conn)?)
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let n = conn.execute("DELETE FROM debts WHERE name=?1", params![name])?;
    if n == 0 {
        return Err(anyhow!("Debt '{}' not found", name));
    }
    println!("Removed debt '{}'", name);
    Ok(())
}
