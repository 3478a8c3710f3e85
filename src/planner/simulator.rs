// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-by-month simulation of several debts sharing one extra budget.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amortization::{
    DebtSimulationResult, PeriodResult, SimulationLimits, payoff_amount, step_period,
    validate_debt, validate_extra, verify_period,
};
use super::money::{Money, monthly_interest};
use super::policy::{ActiveDebt, Strategy};
use crate::error::{PlanError, Result};
use crate::models::Debt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPlanInput {
    pub debts: Vec<Debt>,
    pub extra_monthly_budget: Money,
}

/// Outcome of running every debt to payoff under one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub total_months: u32,
    pub total_interest_paid: Money,
    pub total_paid: Money,
    /// Debt ids in the order they reached zero.
    pub payoff_order: Vec<i64>,
    /// Per-debt ledgers, in input order.
    pub debts: Vec<DebtSimulationResult>,
}

impl StrategyResult {
    pub fn debt(&self, id: i64) -> Option<&DebtSimulationResult> {
        self.debts.iter().find(|d| d.debt_id == id)
    }
}

struct Slot<'a> {
    debt: &'a Debt,
    balance: Money,
    periods: Vec<PeriodResult>,
}

pub(crate) fn validate_plan(input: &DebtPlanInput) -> Result<()> {
    validate_extra(input.extra_monthly_budget)?;
    let mut seen = HashSet::new();
    for debt in &input.debts {
        validate_debt(debt)?;
        if !seen.insert(debt.id) {
            return Err(PlanError::invalid_input(format!(
                "debt id {} appears more than once",
                debt.id
            )));
        }
    }
    Ok(())
}

/// Run all debts to payoff, routing the extra budget and freed minimums by `strategy`.
pub fn simulate_strategy(
    input: &DebtPlanInput,
    strategy: Strategy,
    limits: SimulationLimits,
) -> Result<StrategyResult> {
    validate_plan(input)?;

    let mut slots: Vec<Slot> = input
        .debts
        .iter()
        .map(|debt| Slot {
            debt,
            balance: debt.principal,
            periods: Vec::new(),
        })
        .collect();
    let index: HashMap<i64, usize> = slots
        .iter()
        .enumerate()
        .map(|(i, s)| (s.debt.id, i))
        .collect();

    // Nothing a single debt can ever receive exceeds this.
    let total_outlay = input.extra_monthly_budget
        + slots
            .iter()
            .filter(|s| !s.balance.is_zero())
            .map(|s| s.debt.minimum_payment)
            .sum::<Decimal>();

    let mut freed_minimums = Decimal::ZERO;
    let mut payoff_order = Vec::new();
    let mut period = 0u32;

    loop {
        let active: Vec<ActiveDebt> = slots
            .iter()
            .filter(|s| !s.balance.is_zero())
            .map(|s| ActiveDebt {
                id: s.debt.id,
                balance: s.balance,
                annual_rate_percent: s.debt.annual_rate_percent,
            })
            .collect();
        let ranking = strategy.rank(&active);
        let Some(&top) = ranking.first() else {
            break;
        };

        period += 1;
        if period > limits.max_periods {
            return Err(PlanError::non_convergence(top, limits.max_periods));
        }
        for d in &active {
            if monthly_interest(d.balance, d.annual_rate_percent) >= total_outlay {
                return Err(PlanError::non_convergence(d.id, period));
            }
        }

        let mut pool = input.extra_monthly_budget + freed_minimums;
        let mut payment = vec![Decimal::ZERO; slots.len()];
        let mut room = vec![Decimal::ZERO; slots.len()];
        for d in &active {
            let i = index[&d.id];
            let payoff = payoff_amount(d.balance, d.annual_rate_percent);
            let minimum = slots[i].debt.minimum_payment;
            let applied = minimum.min(payoff);
            pool += minimum - applied;
            payment[i] = applied;
            room[i] = payoff - applied;
        }

        for id in &ranking {
            if pool.is_zero() {
                break;
            }
            let i = index[id];
            let give = room[i].min(pool);
            payment[i] += give;
            pool -= give;
        }

        let mut moved = false;
        let mut cleared_minimums = Decimal::ZERO;
        for id in &ranking {
            let i = index[id];
            let slot = &mut slots[i];
            let mut step = step_period(slot.balance, slot.debt.annual_rate_percent, payment[i])?;
            step.period = period;
            verify_period(*id, slot.balance, &step)?;
            moved |= !step.principal_paid.is_zero() || !step.capitalized_interest.is_zero();
            slot.balance = step.remaining_balance;
            if slot.balance.is_zero() {
                debug!(
                    "{}: debt {} ('{}') cleared in month {}",
                    strategy, id, slot.debt.name, period
                );
                cleared_minimums += slot.debt.minimum_payment;
                payoff_order.push(*id);
            }
            slot.periods.push(step);
        }
        if !moved {
            // Every payment met its interest exactly: next month is this month again.
            return Err(PlanError::non_convergence(top, period));
        }
        if !pool.is_zero() {
            debug!("{}: {} of budget unused in month {}", strategy, pool, period);
        }
        freed_minimums += cleared_minimums;
    }

    let debts: Vec<DebtSimulationResult> = slots
        .into_iter()
        .map(|s| DebtSimulationResult::from_periods(s.debt.id, s.periods))
        .collect();
    let result = StrategyResult {
        strategy,
        total_months: period,
        total_interest_paid: debts.iter().map(|d| d.total_interest_paid).sum(),
        total_paid: debts.iter().map(|d| d.total_paid).sum(),
        payoff_order,
        debts,
    };
    info!(
        "{}: {} debts cleared in {} months, interest {}",
        strategy,
        result.payoff_order.len(),
        result.total_months,
        result.total_interest_paid
    );
    Ok(result)
}
