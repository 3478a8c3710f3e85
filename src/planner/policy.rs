// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::money::{Money, Rate};
use crate::error::PlanError;

/// Payoff ordering for the shared extra budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Smallest remaining balance first.
    Snowball,
    /// Highest interest rate first.
    Avalanche,
}

/// A debt's state at the start of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDebt {
    pub id: i64,
    pub balance: Money,
    pub annual_rate_percent: Rate,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Snowball, Strategy::Avalanche];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
        }
    }

    /// Order debt ids by payoff priority. Recomputed every period since
    /// balances move at different speeds.
    pub fn rank(self, active: &[ActiveDebt]) -> Vec<i64> {
        let mut ordered: Vec<&ActiveDebt> = active.iter().collect();
        ordered.sort_by(|a, b| self.compare(a, b));
        ordered.into_iter().map(|d| d.id).collect()
    }

    fn compare(self, a: &ActiveDebt, b: &ActiveDebt) -> Ordering {
        match self {
            Strategy::Snowball => a.balance.cmp(&b.balance).then(a.id.cmp(&b.id)),
            Strategy::Avalanche => b
                .annual_rate_percent
                .cmp(&a.annual_rate_percent)
                .then(a.balance.cmp(&b.balance))
                .then(a.id.cmp(&b.id)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            other => Err(PlanError::invalid_input(format!(
                "unknown strategy '{}' (use snowball|avalanche)",
                other
            ))),
        }
    }
}
