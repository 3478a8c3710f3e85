// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PlanError;
use crate::planner::{
    DebtPlanInput, DebtSimulationInput, Strategy, monthly_interest, simulate_schedule,
    simulate_strategy,
};
use crate::utils::{
    fmt_money, get_base_currency, get_extra_budget, get_limits, load_debts, pretty_table,
};
use anyhow::Result;
use log::warn;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Issues found in the stored debts, as (issue, detail) pairs.
pub fn diagnose(conn: &Connection) -> Result<Vec<(String, String)>> {
    let ccy = get_base_currency(conn)?;
    let limits = get_limits(conn)?;
    let debts = load_debts(conn)?;
    let mut issues = Vec::new();

    // 1) Debts the minimum payment alone never clears
    for debt in debts.iter().filter(|d| !d.is_settled()) {
        let interest = monthly_interest(debt.principal, debt.annual_rate_percent);
        let input = DebtSimulationInput {
            debt: debt.clone(),
            extra_monthly_payment: Decimal::ZERO,
            limits,
        };
        match simulate_schedule(&input) {
            Ok(_) => {}
            Err(PlanError::NonConvergence { .. }) if debt.minimum_payment <= interest => issues
                .push((
                    "never_paid_at_minimum".to_string(),
                    format!(
                        "{}: minimum {} vs first-month interest {}",
                        debt.name,
                        fmt_money(&debt.minimum_payment, &ccy),
                        fmt_money(&interest, &ccy)
                    ),
                )),
            Err(PlanError::NonConvergence { periods, .. }) => issues.push((
                "exceeds_max_months".to_string(),
                format!(
                    "{}: minimum {} leaves a balance after {} months",
                    debt.name,
                    fmt_money(&debt.minimum_payment, &ccy),
                    periods
                ),
            )),
            Err(e) => issues.push(("invalid_debt".to_string(), e.to_string())),
        }
    }

    // 2) The configured budget cannot clear everything
    if !debts.is_empty() && issues.is_empty() {
        let input = DebtPlanInput {
            debts,
            extra_monthly_budget: get_extra_budget(conn)?,
        };
        if let Err(e) = simulate_strategy(&input, Strategy::Avalanche, limits) {
            issues.push(("plan_does_not_converge".to_string(), e.to_string()));
        }
    }
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = diagnose(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        warn!("doctor found {} issue(s)", issues.len());
        let rows = issues.into_iter().map(|(i, d)| vec![i, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
