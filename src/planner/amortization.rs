// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Single-debt amortization: one monthly step and the full payoff schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{Money, Rate, is_minor_unit, monthly_interest};
use crate::error::{PlanError, Result};
use crate::models::Debt;

/// 100 years of monthly periods.
pub const DEFAULT_MAX_PERIODS: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationLimits {
    pub max_periods: u32,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }
}

/// What happened to one debt in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    pub period: u32,
    pub interest_accrued: Money,
    pub principal_paid: Money,
    pub total_paid: Money,
    /// Interest the payment failed to cover, added back onto the balance.
    pub capitalized_interest: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSimulationInput {
    pub debt: Debt,
    pub extra_monthly_payment: Money,
    #[serde(default)]
    pub limits: SimulationLimits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSimulationResult {
    pub debt_id: i64,
    pub periods: Vec<PeriodResult>,
    pub months_to_payoff: u32,
    pub total_interest_paid: Money,
    pub total_paid: Money,
}

impl DebtSimulationResult {
    pub(crate) fn from_periods(debt_id: i64, periods: Vec<PeriodResult>) -> Self {
        let total_interest_paid = periods.iter().map(|p| p.interest_accrued).sum();
        let total_paid = periods.iter().map(|p| p.total_paid).sum();
        Self {
            debt_id,
            months_to_payoff: periods.last().map_or(0, |p| p.period),
            periods,
            total_interest_paid,
            total_paid,
        }
    }
}

/// Apply one month of interest and one payment to `balance`.
///
/// A payment below the accrued interest pays nothing off; the uncovered
/// interest is capitalized so the balance grows. Callers treat a step with
/// zero `principal_paid` as a sign the plan may never converge.
pub fn step_period(
    balance: Money,
    annual_rate_percent: Rate,
    payment: Money,
) -> Result<PeriodResult> {
    if balance <= Decimal::ZERO {
        return Err(PlanError::invalid_input(format!(
            "balance must be positive for a payment step, got {}",
            balance
        )));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(PlanError::invalid_input(format!(
            "annual rate must not be negative, got {}",
            annual_rate_percent
        )));
    }
    if payment < Decimal::ZERO {
        return Err(PlanError::invalid_input(format!(
            "payment must not be negative, got {}",
            payment
        )));
    }

    let interest = monthly_interest(balance, annual_rate_percent);
    if payment < interest {
        let capitalized = interest - payment;
        return Ok(PeriodResult {
            period: 0,
            interest_accrued: interest,
            principal_paid: Decimal::ZERO,
            total_paid: payment,
            capitalized_interest: capitalized,
            remaining_balance: balance + capitalized,
        });
    }

    let principal = (payment - interest).min(balance);
    Ok(PeriodResult {
        period: 0,
        interest_accrued: interest,
        principal_paid: principal,
        total_paid: interest + principal,
        capitalized_interest: Decimal::ZERO,
        remaining_balance: balance - principal,
    })
}

/// Amount that clears `balance` this month, interest included.
pub fn payoff_amount(balance: Money, annual_rate_percent: Rate) -> Money {
    balance + monthly_interest(balance, annual_rate_percent)
}

/// Check the per-period accounting identities.
pub(crate) fn verify_period(debt_id: i64, opening: Money, p: &PeriodResult) -> Result<()> {
    if p.interest_accrued + p.principal_paid != p.total_paid + p.capitalized_interest {
        return Err(PlanError::rounding_drift(
            debt_id,
            format!(
                "period {}: interest {} + principal {} != paid {} + capitalized {}",
                p.period,
                p.interest_accrued,
                p.principal_paid,
                p.total_paid,
                p.capitalized_interest
            ),
        ));
    }
    if p.remaining_balance < Decimal::ZERO {
        return Err(PlanError::rounding_drift(
            debt_id,
            format!("period {}: negative balance {}", p.period, p.remaining_balance),
        ));
    }
    if opening - p.principal_paid + p.capitalized_interest != p.remaining_balance {
        return Err(PlanError::rounding_drift(
            debt_id,
            format!(
                "period {}: opening {} does not reconcile to closing {}",
                p.period, opening, p.remaining_balance
            ),
        ));
    }
    if !is_minor_unit(p.total_paid) || !is_minor_unit(p.remaining_balance) {
        return Err(PlanError::rounding_drift(
            debt_id,
            format!("period {}: sub-cent amount in ledger", p.period),
        ));
    }
    Ok(())
}

pub(crate) fn validate_amount(what: &str, debt: &Debt, v: Decimal) -> Result<()> {
    if v < Decimal::ZERO {
        return Err(PlanError::invalid_input(format!(
            "{} of debt {} ('{}') must not be negative, got {}",
            what, debt.id, debt.name, v
        )));
    }
    if !is_minor_unit(v) {
        return Err(PlanError::invalid_input(format!(
            "{} of debt {} ('{}') has sub-cent precision: {}",
            what, debt.id, debt.name, v
        )));
    }
    Ok(())
}

pub(crate) fn validate_debt(debt: &Debt) -> Result<()> {
    validate_amount("balance", debt, debt.principal)?;
    validate_amount("minimum payment", debt, debt.minimum_payment)?;
    if debt.annual_rate_percent < Decimal::ZERO {
        return Err(PlanError::invalid_input(format!(
            "rate of debt {} ('{}') must not be negative, got {}",
            debt.id, debt.name, debt.annual_rate_percent
        )));
    }
    if !debt.is_settled() && debt.minimum_payment.is_zero() {
        return Err(PlanError::invalid_input(format!(
            "debt {} ('{}') has a balance but no minimum payment",
            debt.id, debt.name
        )));
    }
    Ok(())
}

pub(crate) fn validate_extra(extra: Money) -> Result<()> {
    if extra < Decimal::ZERO {
        return Err(PlanError::invalid_input(format!(
            "extra monthly payment must not be negative, got {}",
            extra
        )));
    }
    if !is_minor_unit(extra) {
        return Err(PlanError::invalid_input(format!(
            "extra monthly payment has sub-cent precision: {}",
            extra
        )));
    }
    Ok(())
}

/// Project one debt to payoff with a fixed monthly payment of
/// minimum plus `extra_monthly_payment`.
pub fn simulate_schedule(input: &DebtSimulationInput) -> Result<DebtSimulationResult> {
    let debt = &input.debt;
    validate_debt(debt)?;
    validate_extra(input.extra_monthly_payment)?;

    let payment = debt.minimum_payment + input.extra_monthly_payment;
    let mut balance = debt.principal;
    let mut periods = Vec::new();

    while !balance.is_zero() {
        let period = periods.len() as u32 + 1;
        if period > input.limits.max_periods {
            return Err(PlanError::non_convergence(debt.id, input.limits.max_periods));
        }
        let mut step = step_period(balance, debt.annual_rate_percent, payment)?;
        step.period = period;
        verify_period(debt.id, balance, &step)?;
        if step.principal_paid.is_zero() {
            // Fixed payment and a balance that did not shrink: every later month repeats this one.
            return Err(PlanError::non_convergence(debt.id, period));
        }
        balance = step.remaining_balance;
        periods.push(step);
    }

    Ok(DebtSimulationResult::from_periods(debt.id, periods))
}
