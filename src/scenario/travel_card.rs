//! Travel card: rewards spend on taxi, hotels and trips.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Aggregates, CustomerView, Money, category};
use crate::scenario::score::{
    SHARE_LADDER_FLOOR, balance_band, score_factor, share_ladder, status_score, weighted,
};
use crate::scenario::{Fact, Facts, Scenario, ScenarioResult};

const BALANCE_FLOOR: Money = dec!(100_000);
const STRONG_TRAVEL_SPEND: Money = dec!(100_000);
const CASHBACK_RATE: Money = dec!(0.04);

pub(crate) struct TravelCard;

impl Scenario for TravelCard {
    fn product_name(&self) -> &'static str {
        "Карта для путешествий"
    }

    fn template_key(&self) -> &'static str {
        "travel_card"
    }

    fn analyze(&self, view: &CustomerView, agg: &Aggregates) -> ScenarioResult {
        if view.is_blank() {
            return ScenarioResult::no_data();
        }

        let balance = view.customer.avg_monthly_balance;
        let travel_sum = agg.spend_in(category::TRAVEL_SET);

        let status_sub = status_score(view.customer.status);
        let balance_sub = balance_band(balance, BALANCE_FLOOR);
        let travel_sub = if agg.transaction_count() == 0 {
            0.0
        } else {
            share_ladder(agg.category_share(category::TRAVEL_SET))
        };
        let regularity_sub = agg.month_fraction_with_category(category::TRAVEL_SET);

        let mut reasons = Vec::new();
        if status_sub > 0.7 {
            reasons.push("Подходящий статус клиента для карты путешествий".to_string());
        }
        if balance_sub > 0.5 {
            reasons.push("Достаточный баланс для карты".to_string());
        }
        if travel_sub > 0.3 {
            reasons.push("Активные траты на путешествия и транспорт".to_string());
        }
        if regularity_sub > 0.5 {
            reasons.push("Регулярные поездки".to_string());
        }

        let mut score = weighted(&[
            (status_sub, 0.20),
            (balance_sub, 0.25),
            (travel_sub, 0.40),
            (regularity_sub, 0.15),
        ]);
        if travel_sub <= SHARE_LADDER_FLOOR {
            score *= 0.3;
            reasons.push("Низкая активность в путешествиях".to_string());
        }
        if travel_sum > STRONG_TRAVEL_SPEND {
            score = (score * 1.2).min(1.0);
            reasons.push("Высокие траты на путешествия".to_string());
        }

        let cashback = (CASHBACK_RATE * travel_sum).round_dp(2);
        let benefit = CASHBACK_RATE * travel_sum * score_factor(score) + dec!(0.02) * balance;

        let mut facts = Facts::new();
        if travel_sum > Decimal::ZERO {
            facts.insert("amount", Fact::Money(travel_sum));
            facts.insert("cashback", Fact::Money(cashback));
        }
        let trips = agg.count_in(category::TRAVEL_SET);
        if trips > 0 {
            facts.insert("trip_count", Fact::Count(u64::from(trips)));
        }

        ScenarioResult::new(score, benefit, reasons, facts)
    }
}
