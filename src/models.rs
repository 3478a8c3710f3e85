// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A debt as the planner sees it. Balances evolve outside this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub minimum_payment: Decimal,
}

impl Debt {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        principal: Decimal,
        annual_rate_percent: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            principal,
            annual_rate_percent,
            minimum_payment,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.principal.is_zero()
    }
}
