// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::debts::parse_debt;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use log::debug;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("debts", sub)) => import_debts(conn, sub),
        _ => Ok(()),
    }
}

/// Columns: name, balance, rate, min_payment. Existing names are updated in place.
fn import_debts(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let name = rec.get(0).context("name missing")?;
        let balance = rec.get(1).context("balance missing")?;
        let rate = rec.get(2).context("rate missing")?;
        let min_payment = rec.get(3).context("min_payment missing")?;
        let debt = parse_debt(name, balance, rate, min_payment)
            .with_context(|| format!("Row {} of {}", line + 2, path))?;

        tx.execute(
            "INSERT INTO debts(name, balance, rate, min_payment) VALUES (?1,?2,?3,?4)
             ON CONFLICT(name) DO UPDATE SET balance=excluded.balance, rate=excluded.rate,
             min_payment=excluded.min_payment",
            params![
                debt.name,
                debt.principal.to_string(),
                debt.annual_rate_percent.to_string(),
                debt.minimum_payment.to_string()
            ],
        )?;
        debug!("imported debt '{}'", debt.name);
        count += 1;
    }
    tx.commit()?;
    println!("Imported {} debts from {}", count, path);
    Ok(())
}
