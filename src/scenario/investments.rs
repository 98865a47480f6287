//! Investments: financial activity plus tolerance for risk.

use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, Status, TransferType};
use crate::scenario::score::{balance_band, score_factor, status_score, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(50_000);
const SOFT_BALANCE: Money = dec!(100_000);

const INVESTMENT_TYPES: &[TransferType] = &[
    TransferType::InvestIn,
    TransferType::InvestOut,
    TransferType::DepositTopupOut,
    TransferType::DepositFxTopupOut,
];

const RISK_TYPES: &[TransferType] = &[
    TransferType::InvestIn,
    TransferType::InvestOut,
    TransferType::FxBuy,
    TransferType::FxSell,
    TransferType::GoldBuyOut,
    TransferType::GoldSellIn,
];

pub(crate) struct Investments;

fn potential_sub(agg: &Aggregates) -> f64 {
    let operations = agg.count_for(INVESTMENT_TYPES);
    let operations_score = match operations {
        n if n >= 5 => 1.0,
        n if n >= 3 => 0.8,
        n if n >= 1 => 0.6,
        _ => 0.2,
    };
    let diversity_score = match agg.distinct_categories() {
        n if n >= 8 => 1.0,
        n if n >= 5 => 0.8,
        n if n >= 3 => 0.6,
        n if n >= 2 => 0.4,
        _ => 0.1,
    };
    (operations_score + diversity_score) / 2.0
}

fn risk_sub(agg: &Aggregates) -> f64 {
    let risk_score = match agg.count_for(RISK_TYPES) {
        n if n >= 3 => 1.0,
        n if n >= 2 => 0.8,
        n if n >= 1 => 0.6,
        _ => 0.2,
    };
    let activity_score = match agg.transaction_count() {
        n if n >= 30 => 1.0,
        n if n >= 20 => 0.8,
        n if n >= 10 => 0.6,
        n if n >= 5 => 0.4,
        _ => 0.1,
    };
    (risk_score + activity_score) / 2.0
}

impl Scenario for Investments {
    fn product_name(&self) -> &'static str {
        "Инвестиции"
    }

    fn template_key(&self) -> &'static str {
        "investments"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;

        let readiness_sub = balance_band(balance, BALANCE_FLOOR);
        let potential = potential_sub(agg);
        let risk = risk_sub(agg);
        let status_sub = status_score(view.customer.status);

        let mut reasons = Vec::new();
        if readiness_sub > 0.5 {
            reasons.push("Есть свободные средства для старта".to_string());
        }
        if potential > 0.6 {
            reasons.push("Высокий инвестиционный потенциал".to_string());
        }
        if risk > 0.6 {
            reasons.push("Опыт операций с риском".to_string());
        }

        let mut score = weighted(&[
            (readiness_sub, 0.30),
            (potential, 0.35),
            (risk, 0.20),
            (status_sub, 0.15),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.3;
            reasons.push("Недостаточно средств для инвестиций".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.7;
        }
        if view.customer.status == Status::Unknown {
            score *= 0.3;
        }
        if balance >= SOFT_BALANCE {
            score = (score * 1.1).min(1.0);
        }

        let benefit = dec!(0.05) * balance * score_factor(score) + dec!(0.015) * balance;

        let mut facts = Facts::new();
        facts.insert("amount", Fact::Money(balance));

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
