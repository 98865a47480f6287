//! Currency exchange: frequent FX operations in the app.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money};
use crate::scenario::score::{balance_band, score_factor, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(50_000);
const SOFT_BALANCE: Money = dec!(100_000);
const SAVINGS_RATE: Money = dec!(0.01);

pub(crate) struct CurrencyExchange;

/// Ladder over the count share of FX-class transfers.
pub(crate) fn fx_share_band(share: f64, transfer_count: u32) -> f64 {
    if transfer_count == 0 {
        return 0.0;
    }
    if share >= 0.2 {
        1.0
    } else if share >= 0.1 {
        0.8
    } else if share >= 0.05 {
        0.6
    } else if share >= 0.02 {
        0.4
    } else {
        0.2
    }
}

fn fx_amount_sub(agg: &Aggregates) -> f64 {
    if agg.fx_count() == 0 {
        return 0.0;
    }
    let average = agg.fx_sum() / Decimal::from(agg.fx_count());
    if average >= dec!(500_000) {
        1.0
    } else if average >= dec!(200_000) {
        0.8
    } else if average >= dec!(100_000) {
        0.6
    } else if average >= dec!(50_000) {
        0.4
    } else {
        0.2
    }
}

impl Scenario for CurrencyExchange {
    fn product_name(&self) -> &'static str {
        "Обмен валют"
    }

    fn template_key(&self) -> &'static str {
        "currency_exchange"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;
        let fx_share = agg.fx_count_share();

        let stability_sub = balance_band(balance, BALANCE_FLOOR);
        let fx_sub = fx_share_band(fx_share, agg.transfer_count());
        let regularity_sub = agg.month_fraction_with_types(&[
            crate::domain::TransferType::FxBuy,
            crate::domain::TransferType::FxSell,
            crate::domain::TransferType::DepositFxTopupOut,
            crate::domain::TransferType::DepositFxWithdrawIn,
        ]);
        let amount_sub = fx_amount_sub(agg);

        let mut reasons = Vec::new();
        if fx_sub > 0.5 {
            reasons.push("Частые валютные операции".to_string());
        }
        if regularity_sub > 0.5 {
            reasons.push("Регулярная работа с валютой".to_string());
        }
        if amount_sub > 0.5 {
            reasons.push("Крупные суммы обмена".to_string());
        }

        let mut score = weighted(&[
            (stability_sub, 0.20),
            (fx_sub, 0.50),
            (regularity_sub, 0.20),
            (amount_sub, 0.10),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.3;
            reasons.push("Недостаточный баланс для обмена валют".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.6;
        }
        if fx_share >= 0.1 {
            score = (score * 1.2).min(1.0);
        }

        let savings = (SAVINGS_RATE * agg.fx_sum()).round_dp(2);
        let benefit = dec!(0.005) * balance * score_factor(score) + SAVINGS_RATE * agg.fx_sum();

        let mut facts = Facts::new();
        if agg.fx_sum() > Decimal::ZERO {
            facts.insert("amount", Fact::Money(agg.fx_sum()));
            facts.insert("savings", Fact::Money(savings));
        }
        facts.insert(
            "fx_curr",
            Fact::Text(
                agg.dominant_fx_currency()
                    .unwrap_or("USD")
                    .to_string(),
            ),
        );

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
