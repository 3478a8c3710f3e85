// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed-point currency helpers. Every amount the planner produces carries
//! at most two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Currency amount in major units with two minor-unit places.
pub type Money = Decimal;

/// Annual percentage rate, e.g. `dec!(19.99)`.
pub type Rate = Decimal;

pub const MINOR_UNIT_PLACES: u32 = 2;

/// Twelve periods a year, rates given in percent.
const MONTHLY_RATE_DIVISOR: Decimal = dec!(1200);

/// Banker's rounding to the minor unit.
pub fn round_money(v: Decimal) -> Money {
    v.round_dp_with_strategy(MINOR_UNIT_PLACES, RoundingStrategy::MidpointNearestEven)
}

pub fn is_minor_unit(v: Decimal) -> bool {
    v.normalize().scale() <= MINOR_UNIT_PLACES
}

/// One month of interest on `balance`, rounded to the minor unit.
pub fn monthly_interest(balance: Money, annual_rate_percent: Rate) -> Money {
    round_money(balance * annual_rate_percent / MONTHLY_RATE_DIVISOR)
}
