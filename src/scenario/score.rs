//! Shared sub-score ladders. Every sub-score lands in [0, 1]; the weighted
//! combinations in the scenarios keep the final score there as well.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::domain::{Money, Status};

/// Six-band step function on the average monthly balance, parameterized by
/// the scenario's balance floor.
pub(crate) fn balance_band(balance: Money, floor: Money) -> f64 {
    if balance < floor {
        0.1
    } else if balance < floor * Decimal::TWO {
        0.3
    } else if balance < floor * Decimal::from(3) {
        0.5
    } else if balance < floor * Decimal::from(4) {
        0.7
    } else if balance < floor * Decimal::from(5) {
        0.85
    } else {
        1.0
    }
}

/// Five-step ladder over a category share of total spend.
pub(crate) fn share_ladder(share: f64) -> f64 {
    if share >= 0.30 {
        1.0
    } else if share >= 0.15 {
        0.8
    } else if share >= 0.08 {
        0.6
    } else if share >= 0.02 {
        0.4
    } else {
        0.2
    }
}

/// Bottom band of [`share_ladder`], used by activity disqualifiers.
pub(crate) const SHARE_LADDER_FLOOR: f64 = 0.2;

pub(crate) fn status_score(status: Status) -> f64 {
    match status {
        Status::Premium => 1.0,
        Status::Salary => 0.8,
        Status::Standard => 0.6,
        Status::Student => 0.4,
        Status::Unknown => 0.2,
    }
}

/// Five-band ladder over transfer counts (accumulation and credit activity).
pub(crate) fn count_band(count: u32) -> f64 {
    if count >= 10 {
        1.0
    } else if count >= 5 {
        0.8
    } else if count >= 3 {
        0.6
    } else if count >= 1 {
        0.4
    } else {
        0.1
    }
}

/// Weighted sum of (sub-score, weight) pairs, clamped into [0, 1].
pub(crate) fn weighted(parts: &[(f64, f64)]) -> f64 {
    parts
        .iter()
        .map(|(sub, weight)| sub * weight)
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// A score as a decimal factor for benefit math.
pub(crate) fn score_factor(score: f64) -> Decimal {
    Decimal::from_f64(score.clamp(0.0, 1.0))
        .unwrap_or_default()
        .round_dp(4)
}
