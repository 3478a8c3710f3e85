// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::amortization::SimulationLimits;
use super::money::Money;
use super::policy::Strategy;
use super::simulator::{DebtPlanInput, StrategyResult, simulate_strategy};
use crate::error::{PlanError, Result};

/// Interest savings below this are treated as a wash.
pub const DEFAULT_NEGLIGIBLE_SAVINGS: Decimal = dec!(1.00);

/// Snowball and avalanche side by side. Savings are signed so that a
/// positive value means avalanche comes out ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub snowball: StrategyResult,
    pub avalanche: StrategyResult,
    pub interest_savings: Money,
    pub months_savings: i64,
    pub recommended_strategy: Strategy,
}

/// Business rule that turns two finished runs into a recommendation.
pub trait RecommendationRule {
    fn recommend(&self, snowball: &StrategyResult, avalanche: &StrategyResult) -> Strategy;
}

/// Prefer avalanche once it saves at least `min_interest_savings`;
/// otherwise keep the motivational snowball. A tie always goes to snowball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsThreshold {
    pub min_interest_savings: Money,
}

impl Default for SavingsThreshold {
    fn default() -> Self {
        Self {
            min_interest_savings: DEFAULT_NEGLIGIBLE_SAVINGS,
        }
    }
}

impl RecommendationRule for SavingsThreshold {
    fn recommend(&self, snowball: &StrategyResult, avalanche: &StrategyResult) -> Strategy {
        let savings = snowball.total_interest_paid - avalanche.total_interest_paid;
        if savings > Decimal::ZERO && savings >= self.min_interest_savings {
            Strategy::Avalanche
        } else {
            Strategy::Snowball
        }
    }
}

pub fn compare_strategies(input: &DebtPlanInput) -> Result<StrategyComparison> {
    compare_strategies_with(input, SimulationLimits::default(), &SavingsThreshold::default())
}

pub fn compare_strategies_with(
    input: &DebtPlanInput,
    limits: SimulationLimits,
    rule: &dyn RecommendationRule,
) -> Result<StrategyComparison> {
    if input.debts.is_empty() {
        return Err(PlanError::invalid_input("no debts to compare"));
    }

    let snowball = simulate_strategy(input, Strategy::Snowball, limits)?;
    let avalanche = simulate_strategy(input, Strategy::Avalanche, limits)?;

    let interest_savings = snowball.total_interest_paid - avalanche.total_interest_paid;
    let months_savings = i64::from(snowball.total_months) - i64::from(avalanche.total_months);
    let recommended_strategy = rule.recommend(&snowball, &avalanche);
    info!(
        "avalanche saves {} interest and {} months; recommending {}",
        interest_savings, months_savings, recommended_strategy
    );

    Ok(StrategyComparison {
        snowball,
        avalanche,
        interest_savings,
        months_savings,
        recommended_strategy,
    })
}
