// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for the payoff planner.

use thiserror::Error;

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Failures reported by the simulation entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Input rejected before any simulation ran.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The payment plan never retires this debt within the period bound.
    #[error("Debt {debt_id} is not paid off within {periods} months under this plan")]
    NonConvergence { debt_id: i64, periods: u32 },

    /// Internal accounting invariant broken.
    #[error("Rounding drift on debt {debt_id}: {detail}")]
    RoundingDrift { debt_id: i64, detail: String },
}

impl PlanError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn non_convergence(debt_id: i64, periods: u32) -> Self {
        Self::NonConvergence { debt_id, periods }
    }

    pub fn rounding_drift(debt_id: i64, detail: impl Into<String>) -> Self {
        Self::RoundingDrift {
            debt_id,
            detail: detail.into(),
        }
    }
}
