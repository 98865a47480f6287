//! End-to-end seed scenarios over the in-memory pipeline.

use claims::{assert_ge, assert_le};
use rust_decimal::Decimal;

use reco_engine_rs::{AnalyzeOptions, Priority, analyze_view};

use crate::support::{fx_active_view, premium_heavy_view, student_view, travel_heavy_view};

fn options() -> AnalyzeOptions {
    AnalyzeOptions::full().with_month(8)
}

#[test]
fn travel_heavy_salary_client_gets_the_travel_card_first() {
    let recommendations = analyze_view(travel_heavy_view(), &options()).unwrap();

    let top = &recommendations[0];
    assert_eq!(top.product, "Карта для путешествий");
    assert_ge!(top.score, 0.8);

    let length = top.push_notification.chars().count();
    assert!((50..=220).contains(&length), "bad length {length}");
    assert!(top.push_notification.contains("такси"));
    assert!(top.push_notification.contains('₸'));
    assert!(top.push_notification.contains("августе"));
}

#[test]
fn high_balance_premium_client_gets_the_premium_card() {
    let recommendations = analyze_view(premium_heavy_view(), &options()).unwrap();

    let top = &recommendations[0];
    assert_eq!(top.product, "Премиальная карта");
    // 4% band over a 500k monthly spend
    assert_ge!(top.expected_benefit, rust_decimal_macros::dec!(15_000));
    assert!(top.push_notification.contains("млн"));
}

#[test]
fn fx_active_client_sees_currency_exchange_in_the_top_three() {
    let recommendations = analyze_view(fx_active_view(), &options().with_top(3)).unwrap();

    assert!(
        recommendations
            .iter()
            .any(|recommendation| recommendation.product == "Обмен валют"),
        "expected currency exchange in the top three, got {:?}",
        recommendations
            .iter()
            .map(|recommendation| recommendation.product.clone())
            .collect::<Vec<_>>()
    );
}

#[test]
fn inactive_student_never_scores_high() {
    let recommendations = analyze_view(student_view(), &options().with_top(10)).unwrap();

    assert!(!recommendations.is_empty());
    for recommendation in &recommendations {
        assert_le!(recommendation.score, 0.4);
        assert_eq!(recommendation.priority, Priority::Low);
        assert_ge!(recommendation.expected_benefit, Decimal::ZERO);
    }
}

#[test]
fn pipeline_is_deterministic() {
    let first = analyze_view(travel_heavy_view(), &options()).unwrap();
    let second = analyze_view(travel_heavy_view(), &options()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn full_run_returns_all_ten_verdicts_when_asked() {
    let recommendations = analyze_view(travel_heavy_view(), &options().with_top(10)).unwrap();
    assert_eq!(recommendations.len(), 10);
}

#[test]
fn fast_run_returns_five_verdicts() {
    let recommendations =
        analyze_view(travel_heavy_view(), &AnalyzeOptions::fast().with_month(8).with_top(5))
            .unwrap();
    assert_eq!(recommendations.len(), 5);
}

#[test]
fn ranked_output_is_monotone_in_priority_then_score() {
    let recommendations = analyze_view(travel_heavy_view(), &options().with_top(10)).unwrap();

    for pair in recommendations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority > b.priority || (a.priority == b.priority && a.score >= b.score),
            "ranking violated between {} and {}",
            a.product,
            b.product
        );
    }
}

#[test]
fn reasons_are_populated_for_strong_matches() {
    let recommendations = analyze_view(travel_heavy_view(), &options()).unwrap();
    assert!(!recommendations[0].reasons.is_empty());
}
