//! Multi-currency deposit: FX activity combined with a solid balance.

use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money};
use crate::scenario::currency_exchange::fx_share_band;
use crate::scenario::score::{balance_band, count_band, score_factor, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(500_000);
const SOFT_BALANCE: Money = dec!(1_000_000);
const INTEREST_RATE: Money = dec!(0.145);

pub(crate) struct MultiCurrencyDeposit;

/// How often the customer moves between currencies, a proxy for the need to
/// rebalance holdings.
fn rebalancing_sub(fx_share: f64, transfer_count: u32) -> f64 {
    if transfer_count == 0 {
        return 0.0;
    }
    if fx_share >= 0.2 {
        1.0
    } else if fx_share >= 0.1 {
        0.7
    } else if fx_share >= 0.05 {
        0.4
    } else if fx_share > 0.0 {
        0.1
    } else {
        0.0
    }
}

impl Scenario for MultiCurrencyDeposit {
    fn product_name(&self) -> &'static str {
        "Депозит Мультивалютный"
    }

    fn template_key(&self) -> &'static str {
        "multi_currency_deposit"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;
        let fx_share = agg.fx_count_share();

        let stability_sub = balance_band(balance, BALANCE_FLOOR);
        let fx_sub = fx_share_band(fx_share, agg.transfer_count());
        let rebalancing = rebalancing_sub(fx_share, agg.transfer_count());
        let saving_sub = count_band(agg.accumulation_count());

        let mut reasons = Vec::new();
        if stability_sub > 0.5 {
            reasons.push("Остаются свободные средства".to_string());
        }
        if fx_sub > 0.5 {
            reasons.push("Активная работа с валютами".to_string());
        }
        if saving_sub > 0.5 {
            reasons.push("Есть привычка откладывать".to_string());
        }

        let mut score = weighted(&[
            (stability_sub, 0.40),
            (fx_sub, 0.35),
            (rebalancing, 0.15),
            (saving_sub, 0.10),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.2;
            reasons.push("Баланс ниже порога мультивалютного вклада".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.6;
        }
        if fx_share >= 0.3 {
            score = (score * 1.2).min(1.0);
        }

        let benefit = INTEREST_RATE * balance * score_factor(score) + dec!(0.03) * balance;

        let mut facts = Facts::new();
        facts.insert("amount", Fact::Money(balance));
        facts.insert(
            "profit",
            Fact::Money((INTEREST_RATE * balance).round_dp(2)),
        );

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
