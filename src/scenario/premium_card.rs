//! Premium card: high balance plus spend in premium categories.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, Status, category};
use crate::scenario::score::{balance_band, score_factor, share_ladder, status_score, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(500_000);
const TARGET_BALANCE: Money = dec!(800_000);
const ELEVATED_BALANCE: Money = dec!(1_000_000);
const VIP_BALANCE: Money = dec!(6_000_000);

pub(crate) struct PremiumCard;

/// Cashback rate by balance band: 2% base, 3% from 1 mln, 4% from 6 mln.
fn cashback_rate(balance: Money) -> Money {
    if balance >= VIP_BALANCE {
        dec!(0.04)
    } else if balance >= ELEVATED_BALANCE {
        dec!(0.03)
    } else {
        dec!(0.02)
    }
}

fn income_sub(agg: &Aggregates) -> f64 {
    if agg.income_count() == 0 {
        return 0.0;
    }
    let average = agg.income_sum() / Decimal::from(agg.income_count());
    let base: f64 = if average >= dec!(500_000) {
        0.8
    } else if average >= dec!(200_000) {
        0.5
    } else if average >= dec!(100_000) {
        0.3
    } else {
        0.1
    };
    // A salary stream is the strongest inflow signal.
    let salary_bump: f64 = if agg.salary_in_count() > 0 { 0.2 } else { 0.0 };
    (base + salary_bump).min(1.0)
}

fn activity_sub(agg: &Aggregates) -> f64 {
    let monthly = agg.monthly_transaction_rate();
    if monthly >= 20.0 {
        1.0
    } else if monthly >= 15.0 {
        0.8
    } else if monthly >= 10.0 {
        0.6
    } else if monthly >= 5.0 {
        0.4
    } else {
        0.2
    }
}

impl Scenario for PremiumCard {
    fn product_name(&self) -> &'static str {
        "Премиальная карта"
    }

    fn template_key(&self) -> &'static str {
        "premium_card"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;

        let balance_sub = balance_band(balance, BALANCE_FLOOR);
        let status_sub = status_score(view.customer.status);
        let premium_sub = if agg.transaction_count() == 0 {
            0.0
        } else {
            share_ladder(agg.category_share(category::PREMIUM_SET))
        };
        let income = income_sub(agg);
        let activity = activity_sub(agg);

        let mut reasons = Vec::new();
        if balance_sub > 0.9 {
            reasons.push("Очень высокий баланс - идеально для премиальной карты".to_string());
        } else if balance_sub > 0.5 {
            reasons.push("Достаточный баланс для премиальной карты".to_string());
        }
        if status_sub > 0.8 {
            reasons.push("Премиальный статус клиента".to_string());
        }
        if premium_sub > 0.7 {
            reasons.push("Активные траты в премиальных категориях".to_string());
        } else if premium_sub > 0.4 {
            reasons.push("Умеренные траты в премиальных категориях".to_string());
        }
        if income > 0.7 {
            reasons.push("Регулярные крупные поступления".to_string());
        }
        if activity > 0.7 {
            reasons.push("Высокая активность операций".to_string());
        }

        let mut score = weighted(&[
            (balance_sub, 0.40),
            (status_sub, 0.20),
            (premium_sub, 0.20),
            (income, 0.10),
            (activity, 0.10),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.3;
            reasons.push("Недостаточный баланс для премиальной карты".to_string());
        } else if balance < TARGET_BALANCE {
            score *= 0.6;
            reasons.push("Баланс ниже рекомендуемого для премиальной карты".to_string());
        }
        if view.customer.status == Status::Premium {
            score = (score * 1.2).min(1.0);
        }

        let monthly_cashback = (cashback_rate(balance) * agg.monthly_spend_average()).round_dp(2);
        let benefit = cashback_rate(balance) * agg.monthly_spend_average() * score_factor(score);

        let mut facts = Facts::new();
        if balance > Decimal::ZERO {
            facts.insert("balance", Fact::Money(balance));
        }
        if monthly_cashback > Decimal::ZERO {
            facts.insert("cashback", Fact::Money(monthly_cashback));
        }

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
