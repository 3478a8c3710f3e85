// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::plan::{ledger_rows, parse_strategy, plan_input, start_month};
use crate::planner::simulate_strategy;
use crate::utils::get_limits;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("schedule", sub)) => export_schedule(conn, sub),
        _ => Ok(()),
    }
}

fn export_schedule(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let strategy = parse_strategy(sub)?;
    let input = plan_input(conn, sub)?;
    let result = simulate_strategy(&input, strategy, get_limits(conn)?)
        .with_context(|| format!("Cannot complete the {} plan", strategy))?;
    let rows = ledger_rows(&input, &result, start_month(sub)?)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!(
        "Exported {} {} ledger rows to {}",
        rows.len(),
        strategy,
        out
    );
    Ok(())
}
