//! Gold bars: diversification behavior and long-term preservation intent.

use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, Status, TransferType};
use crate::scenario::score::{balance_band, count_band, score_factor, status_score, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(500_000);
const SOFT_BALANCE: Money = dec!(1_000_000);

const DIVERSIFICATION_TYPES: &[TransferType] = &[
    TransferType::InvestIn,
    TransferType::InvestOut,
    TransferType::FxBuy,
    TransferType::FxSell,
    TransferType::DepositTopupOut,
    TransferType::DepositFxTopupOut,
];

const LONG_TERM_TYPES: &[TransferType] = &[
    TransferType::DepositTopupOut,
    TransferType::DepositFxTopupOut,
    TransferType::InvestIn,
    TransferType::GoldBuyOut,
];

pub(crate) struct GoldBars;

fn diversification_sub(agg: &Aggregates) -> f64 {
    if agg.transfer_count() == 0 {
        return 0.0;
    }
    let share = agg.transfer_count_share(DIVERSIFICATION_TYPES);
    if share >= 0.4 {
        1.0
    } else if share >= 0.3 {
        0.8
    } else if share >= 0.2 {
        0.6
    } else if share >= 0.1 {
        0.4
    } else {
        0.1
    }
}

impl Scenario for GoldBars {
    fn product_name(&self) -> &'static str {
        "Золотые слитки"
    }

    fn template_key(&self) -> &'static str {
        "gold_bars"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;
        let diversification_share = agg.transfer_count_share(DIVERSIFICATION_TYPES);

        let readiness_sub = balance_band(balance, BALANCE_FLOOR);
        let diversification = diversification_sub(agg);
        let long_term_sub = count_band(agg.count_for(LONG_TERM_TYPES));
        let status_sub = status_score(view.customer.status);

        let mut reasons = Vec::new();
        if readiness_sub > 0.5 {
            reasons.push("Достаточно средств для покупки слитков".to_string());
        }
        if diversification > 0.5 {
            reasons.push("Активная диверсификация накоплений".to_string());
        }
        if long_term_sub > 0.5 {
            reasons.push("Долгосрочные вложения в портфеле".to_string());
        }

        let mut score = weighted(&[
            (readiness_sub, 0.40),
            (diversification, 0.30),
            (long_term_sub, 0.20),
            (status_sub, 0.10),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.2;
            reasons.push("Недостаточный баланс для золотых слитков".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.6;
        }
        if view.customer.status == Status::Unknown {
            score *= 0.3;
        }
        if diversification_share >= 0.3 {
            score = (score * 1.15).min(1.0);
        }

        let benefit = dec!(0.035) * balance * score_factor(score);

        let mut facts = Facts::new();
        facts.insert("amount", Fact::Money(balance));

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
