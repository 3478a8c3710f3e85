// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::planner::money::is_minor_unit;
use crate::utils::{
    KEY_BASE_CURRENCY, KEY_EXTRA_BUDGET, KEY_MAX_MONTHS, KEY_SAVINGS_THRESHOLD, get_base_currency,
    get_extra_budget, get_limits, get_savings_threshold, parse_decimal, pretty_table, set_setting,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            let stored = set(conn, key, value)?;
            println!("{} = {}", key, stored);
        }
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let rows = vec![
        vec![KEY_BASE_CURRENCY.to_string(), get_base_currency(conn)?],
        vec![
            KEY_EXTRA_BUDGET.to_string(),
            format!("{:.2}", get_extra_budget(conn)?),
        ],
        vec![
            KEY_MAX_MONTHS.to_string(),
            get_limits(conn)?.max_periods.to_string(),
        ],
        vec![
            KEY_SAVINGS_THRESHOLD.to_string(),
            format!("{:.2}", get_savings_threshold(conn)?),
        ],
    ];
    println!("{}", pretty_table(&["Key", "Value"], rows));
    Ok(())
}

fn non_negative_amount(key: &str, raw: &str) -> Result<String> {
    let v = parse_decimal(raw)?;
    if v < Decimal::ZERO || !is_minor_unit(v) {
        return Err(anyhow!(
            "{} must be a non-negative amount with at most two decimals, got {}",
            key,
            raw.trim()
        ));
    }
    Ok(v.to_string())
}

/// Validate and store one setting; returns the normalized stored value.
pub fn set(conn: &Connection, key: &str, raw: &str) -> Result<String> {
    let value = match key {
        KEY_BASE_CURRENCY => {
            let ccy = raw.trim().to_uppercase();
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency code '{}'", raw.trim()));
            }
            ccy
        }
        KEY_EXTRA_BUDGET | KEY_SAVINGS_THRESHOLD => non_negative_amount(key, raw)?,
        KEY_MAX_MONTHS => {
            let n = raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid month count '{}'", raw.trim()))?;
            if n == 0 {
                return Err(anyhow!("{} must be at least 1", key));
            }
            n.to_string()
        }
        other => return Err(anyhow!("Unknown setting '{}'", other)),
    };
    set_setting(conn, key, &value)?;
    Ok(value)
}
