// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure payoff planning: no I/O, no shared state. Every call builds its own
//! ledger from the inputs it is given.

pub mod amortization;
pub mod comparator;
pub mod money;
pub mod policy;
pub mod simulator;

pub use amortization::{
    DEFAULT_MAX_PERIODS, DebtSimulationInput, DebtSimulationResult, PeriodResult,
    SimulationLimits, payoff_amount, simulate_schedule, step_period,
};
pub use comparator::{
    DEFAULT_NEGLIGIBLE_SAVINGS, RecommendationRule, SavingsThreshold, StrategyComparison,
    compare_strategies, compare_strategies_with,
};
pub use money::{Money, Rate, monthly_interest, round_money};
pub use policy::{ActiveDebt, Strategy};
pub use simulator::{DebtPlanInput, StrategyResult, simulate_strategy};
