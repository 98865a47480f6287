//! Accumulation deposit: regular top-ups into saving vehicles.

use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, Status, TransferType};
use crate::scenario::score::{balance_band, count_band, score_factor, status_score, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(200_000);
const SOFT_BALANCE: Money = dec!(500_000);
const INTEREST_RATE: Money = dec!(0.155);

const DEPOSIT_TYPES: &[TransferType] = &[
    TransferType::DepositTopupOut,
    TransferType::DepositFxTopupOut,
];

pub(crate) struct AccumulationDeposit;

impl Scenario for AccumulationDeposit {
    fn product_name(&self) -> &'static str {
        "Депозит Накопительный"
    }

    fn template_key(&self) -> &'static str {
        "accumulation_deposit"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;

        let stability_sub = balance_band(balance, BALANCE_FLOOR);
        let accumulation_sub = count_band(agg.accumulation_count());
        let regularity_sub = agg.month_fraction_with_types(DEPOSIT_TYPES);
        let status_sub = status_score(view.customer.status);

        let mut reasons = Vec::new();
        if stability_sub > 0.5 {
            reasons.push("Достаточный баланс для накоплений".to_string());
        }
        if accumulation_sub > 0.5 {
            reasons.push("Регулярные пополнения накоплений".to_string());
        }
        if regularity_sub > 0.5 {
            reasons.push("Пополнения в большинстве месяцев".to_string());
        }

        let mut score = weighted(&[
            (stability_sub, 0.35),
            (accumulation_sub, 0.40),
            (regularity_sub, 0.15),
            (status_sub, 0.10),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.2;
            reasons.push("Баланс ниже порога накопительного вклада".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.6;
        }
        if view.customer.status == Status::Unknown {
            score *= 0.3;
        }
        let months = agg.months_observed().max(1) as f64;
        if f64::from(agg.count_for(DEPOSIT_TYPES)) / months >= 2.0 {
            score = (score * 1.2).min(1.0);
            reasons.push("Частые пополнения вклада".to_string());
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
