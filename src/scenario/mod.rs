//! The product-scenario contract and the closed set of ten implementations.
//!
//! A scenario is a pure function from a customer view plus its precomputed
//! aggregates to a verdict. Scenarios never touch the store, never mutate
//! their inputs, and never fail: a customer with nothing to score yields a
//! zero verdict instead of an error.

pub(crate) mod score;

mod accumulation_deposit;
mod cash_credit;
mod credit_card;
mod currency_exchange;
mod gold_bars;
mod investments;
mod multi_currency_deposit;
mod premium_card;
mod savings_deposit;
mod travel_card;


use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{Aggregates, CustomerView, Money};

pub(crate) use accumulation_deposit::AccumulationDeposit;
pub(crate) use cash_credit::CashCredit;
pub(crate) use credit_card::CreditCard;
pub(crate) use currency_exchange::CurrencyExchange;
pub(crate) use gold_bars::GoldBars;
pub(crate) use investments::Investments;
pub(crate) use multi_currency_deposit::MultiCurrencyDeposit;
pub(crate) use premium_card::PremiumCard;
pub(crate) use savings_deposit::SavingsDeposit;
pub(crate) use travel_card::TravelCard;

pub(crate) const NO_DATA_REASON: &str = "нет данных";

/// A scoring strategy for one financial product.
pub(crate) trait Scenario: Send + Sync {
    /// Stable product identifier shown to the customer.
    fn product_name(&self) -> &'static str;

    /// Key of the message template rendered for this product.
    fn template_key(&self) -> &'static str;

    fn analyze(&self, view: &CustomerView, aggregates: &Aggregates) -> ScenarioResult;
}

/// A scenario's verdict over one customer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScenarioResult {
    /// Degree of product fit in [0, 1].
    pub(crate) score: f64,
    /// Estimated yearly advantage in KZT, never negative.
    pub(crate) expected_benefit: Money,
    /// Short Russian explanations, most significant first.
    pub(crate) reasons: Vec<String>,
    /// Named data points the renderer may interpolate into templates.
    pub(crate) facts: Facts,
}

pub(crate) type Facts = BTreeMap<&'static str, Fact>;

/// A typed fact published for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fact {
    Money(Money),
    Count(u64),
    Percent(u32),
    Text(String),
}

impl ScenarioResult {
    /// The zero verdict a scenario returns when there is nothing to score.
    pub(crate) fn no_data() -> Self {
        Self {
            score: 0.0,
            expected_benefit: Decimal::ZERO,
            reasons: vec![NO_DATA_REASON.to_string()],
            facts: Facts::new(),
        }
    }

    pub(crate) fn new(score: f64, expected_benefit: Money, reasons: Vec<String>, facts: Facts) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            expected_benefit: expected_benefit.round_dp(2).max(Decimal::ZERO),
            reasons,
            facts,
        }
    }
}

/// All ten scenarios in stable registry order. The order doubles as the final
/// ranking tie-break.
pub(crate) fn all_scenarios() -> Vec<Arc<dyn Scenario>> {
    vec![
        Arc::new(TravelCard),
        Arc::new(PremiumCard),
        Arc::new(CreditCard),
        Arc::new(CurrencyExchange),
        Arc::new(SavingsDeposit),
        Arc::new(AccumulationDeposit),
        Arc::new(MultiCurrencyDeposit),
        Arc::new(Investments),
        Arc::new(GoldBars),
        Arc::new(CashCredit),
    ]
}

/// The restricted set used by the fast pipeline variant (batch export).
pub(crate) fn fast_scenarios() -> Vec<Arc<dyn Scenario>> {
    vec![
        Arc::new(TravelCard),
        Arc::new(CreditCard),
        Arc::new(Investments),
        Arc::new(PremiumCard),
        Arc::new(CashCredit),
    ]
}
