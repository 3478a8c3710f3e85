// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Months, NaiveDate, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::Debt;
use crate::planner::{DEFAULT_MAX_PERIODS, DEFAULT_NEGLIGIBLE_SAVINGS, SimulationLimits};

pub const KEY_BASE_CURRENCY: &str = "base_currency";
pub const KEY_EXTRA_BUDGET: &str = "extra_budget";
pub const KEY_MAX_MONTHS: &str = "max_months";
pub const KEY_SAVINGS_THRESHOLD: &str = "savings_threshold";

pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// First day of the current month.
pub fn current_month() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.with_day(1).unwrap_or(today)
}

/// Calendar label for plan month `period` (1-based) counted from `start`.
pub fn month_label(start: NaiveDate, period: u32) -> Result<String> {
    let offset = period.saturating_sub(1);
    let d = start
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| anyhow!("Month {} after {} is out of range", period, start))?;
    Ok(d.format("%Y-%m").to_string())
}

// Settings

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_base_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, KEY_BASE_CURRENCY)?.unwrap_or_else(|| "USD".to_string()))
}

fn decimal_setting(conn: &Connection, key: &str, default: Decimal) -> Result<Decimal> {
    match get_setting(conn, key)? {
        Some(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid value '{}' for setting {}", s, key)),
        None => Ok(default),
    }
}

pub fn get_extra_budget(conn: &Connection) -> Result<Decimal> {
    decimal_setting(conn, KEY_EXTRA_BUDGET, Decimal::ZERO)
}

pub fn get_savings_threshold(conn: &Connection) -> Result<Decimal> {
    decimal_setting(conn, KEY_SAVINGS_THRESHOLD, DEFAULT_NEGLIGIBLE_SAVINGS)
}

pub fn get_limits(conn: &Connection) -> Result<SimulationLimits> {
    let max_periods = match get_setting(conn, KEY_MAX_MONTHS)? {
        Some(s) => s
            .parse::<u32>()
            .with_context(|| format!("Invalid value '{}' for setting {}", s, KEY_MAX_MONTHS))?,
        None => DEFAULT_MAX_PERIODS,
    };
    Ok(SimulationLimits { max_periods })
}

// Debts

type DebtRow = (i64, String, String, String, String);

fn debt_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<DebtRow> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
}

fn into_debt(row: DebtRow) -> Result<Debt> {
    let (id, name, balance, rate, min_payment) = row;
    let principal = balance
        .parse::<Decimal>()
        .with_context(|| format!("Invalid balance '{}' for debt {}", balance, name))?;
    let annual_rate_percent = rate
        .parse::<Decimal>()
        .with_context(|| format!("Invalid rate '{}' for debt {}", rate, name))?;
    let minimum_payment = min_payment
        .parse::<Decimal>()
        .with_context(|| format!("Invalid minimum payment '{}' for debt {}", min_payment, name))?;
    Ok(Debt::new(id, name, principal, annual_rate_percent, minimum_payment))
}

pub fn load_debts(conn: &Connection) -> Result<Vec<Debt>> {
    let mut stmt =
        conn.prepare("SELECT id, name, balance, rate, min_payment FROM debts ORDER BY id")?;
    let rows = stmt.query_map([], debt_from_row)?;
    let mut debts = Vec::new();
    for row in rows {
        debts.push(into_debt(row?)?);
    }
    Ok(debts)
}

pub fn debt_by_name(conn: &Connection, name: &str) -> Result<Debt> {
    let row = conn
        .query_row(
            "SELECT id, name, balance, rate, min_payment FROM debts WHERE name=?1",
            params![name],
            debt_from_row,
        )
        .with_context(|| format!("Debt '{}' not found", name))?;
    into_debt(row)
}
