// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::planner::{
    DebtPlanInput, DebtSimulationInput, SavingsThreshold, Strategy, StrategyResult,
    compare_strategies_with, simulate_schedule, simulate_strategy,
};
use crate::utils::{
    current_month, debt_by_name, fmt_money, get_base_currency, get_extra_budget, get_limits,
    get_savings_threshold, load_debts, maybe_print_json, month_label, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("schedule", sub)) => schedule(conn, sub)?,
        Some(("run", sub)) => run(conn, sub)?,
        Some(("compare", sub)) => compare(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// One line of a month-by-month ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub month: String,
    pub period: u32,
    pub debt: String,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub capitalized_interest: Decimal,
    pub balance: Decimal,
}

pub(crate) fn extra_budget(conn: &Connection, sub: &clap::ArgMatches) -> Result<Decimal> {
    match sub.get_one::<String>("extra") {
        Some(raw) => parse_decimal(raw),
        None => get_extra_budget(conn),
    }
}

pub(crate) fn start_month(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("start") {
        Some(raw) => parse_month(raw),
        None => Ok(current_month()),
    }
}

pub(crate) fn parse_strategy(sub: &clap::ArgMatches) -> Result<Strategy> {
    Ok(sub.get_one::<String>("strategy").unwrap().parse::<Strategy>()?)
}

pub fn plan_input(conn: &Connection, sub: &clap::ArgMatches) -> Result<DebtPlanInput> {
    let debts = load_debts(conn)?;
    if debts.is_empty() {
        return Err(anyhow!("No debts stored; add one with `payoff debt add`"));
    }
    Ok(DebtPlanInput {
        debts,
        extra_monthly_budget: extra_budget(conn, sub)?,
    })
}

/// Flatten a strategy run into calendar-ordered ledger rows.
pub fn ledger_rows(
    input: &DebtPlanInput,
    result: &StrategyResult,
    start: NaiveDate,
) -> Result<Vec<LedgerRow>> {
    let names: HashMap<i64, &str> = input
        .debts
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();
    let mut rows = Vec::new();
    for debt in &result.debts {
        let name = names.get(&debt.debt_id).copied().unwrap_or("?");
        for p in &debt.periods {
            rows.push(LedgerRow {
                month: month_label(start, p.period)?,
                period: p.period,
                debt: name.to_string(),
                payment: p.total_paid,
                interest: p.interest_accrued,
                principal: p.principal_paid,
                capitalized_interest: p.capitalized_interest,
                balance: p.remaining_balance,
            });
        }
    }
    rows.sort_by_key(|r| r.period);
    Ok(rows)
}

fn schedule(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let debt = debt_by_name(conn, name)?;
    let input = DebtSimulationInput {
        debt,
        extra_monthly_payment: extra_budget(conn, sub)?,
        limits: get_limits(conn)?,
    };
    let start = start_month(sub)?;
    let result =
        simulate_schedule(&input).with_context(|| format!("Cannot schedule debt '{}'", name))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }

    let ccy = get_base_currency(conn)?;
    let mut rows = Vec::new();
    for p in &result.periods {
        rows.push(vec![
            month_label(start, p.period)?,
            fmt_money(&p.total_paid, &ccy),
            fmt_money(&p.interest_accrued, &ccy),
            fmt_money(&p.principal_paid, &ccy),
            fmt_money(&p.remaining_balance, &ccy),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Month", "Payment", "Interest", "Principal", "Balance"], rows)
    );
    if result.months_to_payoff == 0 {
        println!("'{}' is already paid off", name);
    } else {
        println!(
            "'{}' paid off in {} months ({}), total interest {}",
            name,
            result.months_to_payoff,
            month_label(start, result.months_to_payoff)?,
            fmt_money(&result.total_interest_paid, &ccy)
        );
    }
    Ok(())
}

fn run(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let strategy = parse_strategy(sub)?;
    let input = plan_input(conn, sub)?;
    let start = start_month(sub)?;
    let result = simulate_strategy(&input, strategy, get_limits(conn)?)
        .with_context(|| format!("Cannot complete the {} plan", strategy))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }

    let ccy = get_base_currency(conn)?;
    let mut rows = Vec::new();
    for id in &result.payoff_order {
        let (Some(debt), Some(ledger)) = (
            input.debts.iter().find(|d| d.id == *id),
            result.debt(*id),
        ) else {
            continue;
        };
        rows.push(vec![
            debt.name.clone(),
            month_label(start, ledger.months_to_payoff)?,
            ledger.months_to_payoff.to_string(),
            fmt_money(&ledger.total_interest_paid, &ccy),
            fmt_money(&ledger.total_paid, &ccy),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["Debt", "Paid off", "Months", "Interest", "Total paid"],
            rows
        )
    );
    println!(
        "{}: debt-free in {} months, total interest {}",
        strategy,
        result.total_months,
        fmt_money(&result.total_interest_paid, &ccy)
    );
    Ok(())
}

fn compare(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let input = plan_input(conn, sub)?;
    let start = start_month(sub)?;
    let rule = SavingsThreshold {
        min_interest_savings: match sub.get_one::<String>("threshold") {
            Some(raw) => parse_decimal(raw)?,
            None => get_savings_threshold(conn)?,
        },
    };
    let cmp = compare_strategies_with(&input, get_limits(conn)?, &rule)
        .context("Cannot compare payoff strategies")?;
    if maybe_print_json(sub.get_flag("json"), false, &cmp)? {
        return Ok(());
    }

    let ccy = get_base_currency(conn)?;
    let mut rows = Vec::new();
    for r in [&cmp.snowball, &cmp.avalanche] {
        rows.push(vec![
            r.strategy.to_string(),
            r.total_months.to_string(),
            if r.total_months == 0 {
                "-".to_string()
            } else {
                month_label(start, r.total_months)?
            },
            fmt_money(&r.total_interest_paid, &ccy),
            fmt_money(&r.total_paid, &ccy),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["Strategy", "Months", "Debt-free", "Interest", "Total paid"],
            rows
        )
    );
    println!(
        "Avalanche saves {} in interest and {} months",
        fmt_money(&cmp.interest_savings, &ccy),
        cmp.months_savings
    );
    println!("Recommended: {}", cmp.recommended_strategy);
    Ok(())
}
