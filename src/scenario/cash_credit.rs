//! Cash credit: financing-need signals plus existing credit history.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, Status, category};
use crate::scenario::score::{balance_band, count_band, score_factor, status_score, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(100_000);
const SOFT_BALANCE: Money = dec!(300_000);
const LIMIT_CAP: Money = dec!(2_000_000);

pub(crate) struct CashCredit;

/// Big-ticket spending relative to the customer's outflows points at a need
/// for external financing.
fn need_sub(view: &CustomerView, agg: &Aggregates) -> f64 {
    use rust_decimal::prelude::ToPrimitive;

    if view.transactions.is_empty() && view.transfers.is_empty() {
        return 0.0;
    }
    if agg.total_spend() <= Decimal::ZERO {
        return 0.0;
    }

    let high_value_share = agg.category_share(category::HIGH_VALUE_SET);
    let consumption = if agg.out_sum() > Decimal::ZERO {
        (agg.total_spend() / agg.out_sum()).to_f64().unwrap_or(0.0)
    } else {
        0.0
    };

    let high_value_score = (high_value_share * 2.0).min(1.0);
    let consumption_score = (consumption * 0.5).min(1.0);
    (high_value_score + consumption_score) / 2.0
}

impl Scenario for CashCredit {
    fn product_name(&self) -> &'static str {
        "Кредит наличными"
    }

    fn template_key(&self) -> &'static str {
        "cash_credit"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;
        let credit_share = agg.transfer_count_share(&[
            crate::domain::TransferType::LoanPaymentOut,
            crate::domain::TransferType::CcRepaymentOut,
            crate::domain::TransferType::InstallmentPaymentOut,
        ]);

        let stability_sub = balance_band(balance, BALANCE_FLOOR);
        let credit_sub = count_band(agg.credit_activity_count());
        let need = need_sub(view, agg);
        let status_sub = status_score(view.customer.status);

        let mut reasons = Vec::new();
        if stability_sub > 0.5 {
            reasons.push("Стабильное финансовое положение".to_string());
        }
        if credit_sub > 0.5 {
            reasons.push("Положительная кредитная история".to_string());
        }
        if need > 0.5 {
            reasons.push("Крупные траты, где поможет запас наличных".to_string());
        }

        let mut score = weighted(&[
            (stability_sub, 0.40),
            (credit_sub, 0.30),
            (need, 0.20),
            (status_sub, 0.10),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.2;
            reasons.push("Низкий баланс для кредита наличными".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.6;
        }
        if view.customer.status == Status::Unknown {
            score *= 0.3;
        }
        if credit_share >= 0.3 {
            score = (score * 1.2).min(1.0);
        }

        let benefit = dec!(0.10) * balance * score_factor(score) + dec!(0.03) * balance;

        let mut facts = Facts::new();
        let limit = (balance * Decimal::TWO).min(LIMIT_CAP).round_dp(2);
        if limit > Decimal::ZERO {
            facts.insert("limit", Fact::Money(limit));
        }

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
