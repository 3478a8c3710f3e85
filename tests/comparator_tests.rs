// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use payoff::error::PlanError;
use payoff::models::Debt;
use payoff::planner::{
    DebtPlanInput, RecommendationRule, SavingsThreshold, SimulationLimits, Strategy,
    StrategyResult, compare_strategies, compare_strategies_with,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cards() -> DebtPlanInput {
    DebtPlanInput {
        debts: vec![
            Debt::new(1, "Store card", dec!(1000), dec!(5), dec!(30)),
            Debt::new(2, "Credit card", dec!(5000), dec!(24), dec!(100)),
        ],
        extra_monthly_budget: dec!(200),
    }
}

#[test]
fn same_first_target_gives_identical_plans() {
    let input = DebtPlanInput {
        debts: vec![
            Debt::new(1, "Debt1", dec!(500), dec!(20), dec!(25)),
            Debt::new(2, "Debt2", dec!(3000), dec!(5), dec!(60)),
        ],
        extra_monthly_budget: dec!(100),
    };
    let cmp = compare_strategies(&input).unwrap();

    let first = &cmp.snowball.debt(1).unwrap().periods[0];
    assert_eq!(first.total_paid, dec!(125));
    assert_eq!(cmp.avalanche.debt(1).unwrap().periods[0].total_paid, dec!(125));

    assert_eq!(cmp.snowball.debts, cmp.avalanche.debts);
    assert_eq!(cmp.snowball.payoff_order, vec![1, 2]);
    assert!(cmp.interest_savings.is_zero());
    assert_eq!(cmp.months_savings, 0);
    assert_eq!(cmp.recommended_strategy, Strategy::Snowball);

    // Debt2 picks up the whole 185 once Debt1 clears.
    let cleared = cmp.snowball.debt(1).unwrap().months_to_payoff as usize;
    let debt2 = &cmp.snowball.debt(2).unwrap().periods;
    assert_eq!(debt2[cleared].total_paid, dec!(185));
}

#[test]
fn avalanche_is_cheaper_with_differing_rates() {
    let cmp = compare_strategies(&cards()).unwrap();
    assert!(cmp.avalanche.total_interest_paid < cmp.snowball.total_interest_paid);
    assert_eq!(
        cmp.interest_savings,
        cmp.snowball.total_interest_paid - cmp.avalanche.total_interest_paid
    );
    assert_eq!(
        cmp.months_savings,
        i64::from(cmp.snowball.total_months) - i64::from(cmp.avalanche.total_months)
    );
    assert!(cmp.months_savings >= 0);
    assert_eq!(cmp.recommended_strategy, Strategy::Avalanche);
    assert_eq!(cmp.snowball.strategy, Strategy::Snowball);
    assert_eq!(cmp.avalanche.strategy, Strategy::Avalanche);
}

#[test]
fn threshold_keeps_snowball_for_small_savings() {
    let input = cards();
    let base = compare_strategies(&input).unwrap();
    let rule = SavingsThreshold {
        min_interest_savings: base.interest_savings + dec!(0.01),
    };
    let cmp = compare_strategies_with(&input, SimulationLimits::default(), &rule).unwrap();
    assert_eq!(cmp.recommended_strategy, Strategy::Snowball);

    let rule = SavingsThreshold {
        min_interest_savings: base.interest_savings,
    };
    let cmp = compare_strategies_with(&input, SimulationLimits::default(), &rule).unwrap();
    assert_eq!(cmp.recommended_strategy, Strategy::Avalanche);
}

#[test]
fn zero_threshold_still_sends_ties_to_snowball() {
    let input = DebtPlanInput {
        debts: vec![Debt::new(1, "Only", dec!(900), dec!(12), dec!(100))],
        extra_monthly_budget: dec!(50),
    };
    let rule = SavingsThreshold {
        min_interest_savings: Decimal::ZERO,
    };
    let cmp = compare_strategies_with(&input, SimulationLimits::default(), &rule).unwrap();
    assert!(cmp.interest_savings.is_zero());
    assert_eq!(cmp.recommended_strategy, Strategy::Snowball);
}

struct FewestMonths;

impl RecommendationRule for FewestMonths {
    fn recommend(&self, snowball: &StrategyResult, avalanche: &StrategyResult) -> Strategy {
        if avalanche.total_months < snowball.total_months {
            Strategy::Avalanche
        } else {
            Strategy::Snowball
        }
    }
}

#[test]
fn custom_rule_overrides_default() {
    let input = cards();
    let cmp = compare_strategies_with(&input, SimulationLimits::default(), &FewestMonths).unwrap();
    let expected = if cmp.months_savings > 0 {
        Strategy::Avalanche
    } else {
        Strategy::Snowball
    };
    assert_eq!(cmp.recommended_strategy, expected);
}

#[test]
fn empty_debt_list_is_invalid() {
    let input = DebtPlanInput {
        debts: Vec::new(),
        extra_monthly_budget: dec!(100),
    };
    let err = compare_strategies(&input).unwrap_err();
    assert!(matches!(err, PlanError::InvalidInput { .. }));
}

#[test]
fn non_convergence_propagates() {
    let input = DebtPlanInput {
        debts: vec![Debt::new(9, "Payday", dec!(100), dec!(50), dec!(1))],
        extra_monthly_budget: Decimal::ZERO,
    };
    let err = compare_strategies(&input).unwrap_err();
    assert!(matches!(err, PlanError::NonConvergence { debt_id: 9, .. }));
}

#[test]
fn comparison_is_repeatable() {
    let input = cards();
    let a = compare_strategies(&input).unwrap();
    let b = compare_strategies(&input).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
