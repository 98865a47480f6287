//! Savings deposit: a stable high balance the customer can afford to freeze.

use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, Status, TransferType};
use crate::scenario::score::{balance_band, count_band, score_factor, status_score, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(1_000_000);
const COMFORT_BALANCE: Money = dec!(2_000_000);
const INTEREST_RATE: Money = dec!(0.165);

const LONG_TERM_TYPES: &[TransferType] = &[
    TransferType::DepositTopupOut,
    TransferType::DepositFxTopupOut,
    TransferType::InvestIn,
];

pub(crate) struct SavingsDeposit;

/// Fewer withdrawals mean the customer can lock funds away.
fn withdrawal_absence_sub(agg: &Aggregates) -> f64 {
    let withdrawals = agg.count_for(&[
        TransferType::DepositWithdrawIn,
        TransferType::DepositFxWithdrawIn,
        TransferType::AtmWithdrawal,
    ]);
    match withdrawals {
        0 => 1.0,
        1..=2 => 0.8,
        3..=5 => 0.5,
        _ => 0.2,
    }
}

impl Scenario for SavingsDeposit {
    fn product_name(&self) -> &'static str {
        "Депозит Сберегательный"
    }

    fn template_key(&self) -> &'static str {
        "savings_deposit"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;

        let stability_sub = balance_band(balance, BALANCE_FLOOR);
        let freeze_sub = (stability_sub
            + withdrawal_absence_sub(agg)
            + count_band(agg.count_for(LONG_TERM_TYPES)))
            / 3.0;
        let saving_sub = count_band(agg.accumulation_count());
        let status_sub = status_score(view.customer.status);

        let mut reasons = Vec::new();
        if stability_sub > 0.7 {
            reasons.push("Стабильно крупный остаток на счетах".to_string());
        }
        if freeze_sub > 0.6 {
            reasons.push("Готовность разместить средства на срок".to_string());
        }
        if saving_sub > 0.5 {
            reasons.push("Есть привычка откладывать".to_string());
        }

        let mut score = weighted(&[
            (stability_sub, 0.50),
            (freeze_sub, 0.30),
            (saving_sub, 0.15),
            (status_sub, 0.05),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.1;
            reasons.push("Баланс ниже порога сберегательного вклада".to_string());
        } else if balance < COMFORT_BALANCE {
            score *= 0.5;
        }
        if view.customer.status == Status::Unknown {
            score *= 0.3;
        }
        if stability_sub >= 0.85 {
            score = (score * 1.15).min(1.0);
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
