//! Ordering of scenario verdicts into the final recommendation list.

use rust_decimal_macros::dec;
use serde::Serialize;

use crate::domain::{ClientCode, Money};
use crate::engine::Scored;

/// Coarse urgency bucket derived from a verdict's score and expected benefit.
/// The bucket is the primary ranking key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

pub(crate) fn priority_for(score: f64, expected_benefit: Money) -> Priority {
    if score > 0.8 && expected_benefit > dec!(100_000) {
        Priority::High
    } else if score > 0.5 && expected_benefit > dec!(50_000) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

#[derive(Debug)]
pub(crate) struct Ranked {
    pub(crate) scored: Scored,
    pub(crate) priority: Priority,
}

/// Sorts verdicts descending by (priority, score), breaking ties on higher
/// expected benefit and finally on the stable registry order. The result is
/// deterministic for fixed inputs regardless of scenario completion order.
pub(crate) fn rank(results: Vec<Scored>) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = results
        .into_iter()
        .map(|scored| {
            let priority = priority_for(scored.result.score, scored.result.expected_benefit);
            Ranked { scored, priority }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.scored.result.score.total_cmp(&a.scored.result.score))
            .then_with(|| {
                b.scored
                    .result
                    .expected_benefit
                    .cmp(&a.scored.result.expected_benefit)
            })
            .then_with(|| a.scored.order.cmp(&b.scored.order))
    });
    ranked
}

/// A ranked product recommendation with the rendered push notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub client_code: ClientCode,
    pub product: String,
    pub score: f64,
    pub expected_benefit: Money,
    pub priority: Priority,
    pub reasons: Vec<String>,
    pub push_notification: String,
}
