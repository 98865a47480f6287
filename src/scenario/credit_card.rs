//! Credit card: diverse category spend plus online services.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, category};
use crate::scenario::score::{balance_band, count_band, score_factor, share_ladder, weighted};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(100_000);
const SOFT_BALANCE: Money = dec!(200_000);
const ONLINE_CASHBACK_RATE: Money = dec!(0.10);

pub(crate) struct CreditCard;

/// Mix of popular-category coverage, diversity across the controlled list and
/// concentration in the top three categories.
fn category_mix_sub(agg: &Aggregates) -> f64 {
    if agg.transaction_count() == 0 {
        return 0.0;
    }

    let popular_sum = agg.spend_in(category::CONTROLLED);
    let popular_share = if agg.total_spend() > Decimal::ZERO {
        ratio(popular_sum, agg.total_spend())
    } else {
        0.0
    };

    let distinct: usize = category::CONTROLLED
        .iter()
        .copied()
        .filter(|label| agg.count_in(&[label]) > 0)
        .count();
    let diversity = distinct as f64 / category::CONTROLLED.len() as f64;

    let top3: Money = agg
        .top_by_amount()
        .iter()
        .filter(|(label, _)| *label != category::OTHER)
        .take(3)
        .map(|(_, sum)| *sum)
        .sum();
    let concentration = if popular_sum > Decimal::ZERO {
        ratio(top3, popular_sum)
    } else {
        0.0
    };

    let ratio_score = (popular_share * 2.0).min(1.0);
    let diversity_score = (diversity * 2.0).min(1.0);
    let concentration_score = (concentration * 1.5).min(1.0);
    (ratio_score + diversity_score + concentration_score) / 3.0
}

fn ratio(part: Money, whole: Money) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    (part / whole).to_f64().unwrap_or(0.0)
}

impl Scenario for CreditCard {
    fn product_name(&self) -> &'static str {
        "Кредитная карта"
    }

    fn template_key(&self) -> &'static str {
        "credit_card"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;
        let online_sum = agg.spend_in(category::ONLINE_SET);
        let online_share = agg.category_share(category::ONLINE_SET);

        let stability_sub = balance_band(balance, BALANCE_FLOOR);
        let mix_sub = category_mix_sub(agg);
        let online_sub = if agg.transaction_count() == 0 {
            0.0
        } else {
            share_ladder(online_share)
        };
        let regularity_sub = if agg.transaction_count() == 0 {
            0.0
        } else {
            agg.month_fraction_with_category(category::CONTROLLED)
        };
        let credit_exp_sub = count_band(agg.credit_activity_count());

        let mut reasons = Vec::new();
        if stability_sub > 0.5 {
            reasons.push("Стабильное финансовое положение".to_string());
        }
        if mix_sub > 0.6 {
            reasons.push("Разнообразные траты по категориям".to_string());
        }
        if online_sub > 0.5 {
            reasons.push("Активные траты на онлайн-сервисы".to_string());
        }
        if credit_exp_sub > 0.5 {
            reasons.push("Есть опыт кредитных продуктов".to_string());
        }

        let mut score = weighted(&[
            (stability_sub, 0.25),
            (mix_sub, 0.35),
            (online_sub, 0.20),
            (regularity_sub, 0.15),
            (credit_exp_sub, 0.05),
        ]);
        if balance < BALANCE_FLOOR {
            score *= 0.3;
            reasons.push("Низкий баланс для кредитной карты".to_string());
        } else if balance < SOFT_BALANCE {
            score *= 0.6;
        }
        if online_share >= 0.3 {
            score = (score * 1.15).min(1.0);
            reasons.push("Бонус за высокие онлайн траты".to_string());
        }

        let online_cashback = (ONLINE_CASHBACK_RATE * online_sum).round_dp(2);
        let benefit =
            dec!(0.05) * balance * score_factor(score) + online_cashback + dec!(0.02) * balance;

        let mut facts = Facts::new();
        let top: Vec<&'static str> = agg
            .top_by_amount()
            .iter()
            .filter(|(label, _)| *label != category::OTHER)
            .take(3)
            .map(|(label, _)| *label)
            .collect();
        if let [cat1, cat2, cat3] = top.as_slice() {
            facts.insert("cat1", Fact::Text((*cat1).to_string()));
            facts.insert("cat2", Fact::Text((*cat2).to_string()));
            facts.insert("cat3", Fact::Text((*cat3).to_string()));
        }
        if online_sum > Decimal::ZERO {
            facts.insert("amount", Fact::Money(online_sum));
            facts.insert("cashback", Fact::Money(online_cashback));
        }

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
