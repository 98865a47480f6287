//! Property tests over randomly generated customer views: the universal
//! pipeline invariants must hold for any input shape.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use reco_engine_rs::{
    AnalyzeOptions, CTA_VERBS, ClientCode, Customer, CustomerView, Direction, Status, Transaction,
    Transfer, TransferType, analyze_view, category,
};

const CATEGORIES: [&str; 6] = [
    category::TAXI,
    category::HOTELS,
    category::GROCERIES,
    category::RESTAURANTS,
    category::CINEMA,
    "Зоотовары",
];

const TRANSFER_SHAPES: [(TransferType, Direction); 8] = [
    (TransferType::SalaryIn, Direction::In),
    (TransferType::CardIn, Direction::In),
    (TransferType::P2pOut, Direction::Out),
    (TransferType::FxBuy, Direction::Out),
    (TransferType::FxSell, Direction::In),
    (TransferType::DepositTopupOut, Direction::Out),
    (TransferType::LoanPaymentOut, Direction::Out),
    (TransferType::InvestIn, Direction::In),
];

/// Names from a couple of characters up to far beyond what any template can
/// absorb without truncation.
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Ия".to_string()),
        Just("Айгерим".to_string()),
        "[А-Яа-яё]{1,140}",
    ]
}

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Premium),
        Just(Status::Salary),
        Just(Status::Standard),
        Just(Status::Student),
        Just(Status::Unknown),
    ]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=90).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .checked_sub_days(chrono::Days::new(u64::from(offset)))
            .unwrap()
    })
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (date_strategy(), 0..CATEGORIES.len(), 1u64..=400_000).prop_map(|(date, index, amount)| {
        Transaction {
            client_code: ClientCode::new(1),
            date,
            category: CATEGORIES[index].to_string(),
            amount: Decimal::from(amount),
            currency: "KZT".to_string(),
        }
    })
}

fn transfer_strategy() -> impl Strategy<Value = Transfer> {
    (date_strategy(), 0..TRANSFER_SHAPES.len(), 1u64..=2_000_000).prop_map(
        |(date, index, amount)| {
            let (kind, direction) = TRANSFER_SHAPES[index];
            Transfer {
                client_code: ClientCode::new(1),
                date,
                kind,
                direction,
                amount: Decimal::from(amount),
                currency: "KZT".to_string(),
            }
        },
    )
}

fn view_strategy() -> impl Strategy<Value = CustomerView> {
    (
        0u64..=20_000_000,
        name_strategy(),
        status_strategy(),
        prop::collection::vec(transaction_strategy(), 0..40),
        prop::collection::vec(transfer_strategy(), 0..20),
    )
        .prop_map(|(balance, name, status, transactions, transfers)| {
            CustomerView::new(
                Customer {
                    client_code: ClientCode::new(1),
                    name,
                    status,
                    age: None,
                    city: "Алматы".to_string(),
                    avg_monthly_balance: Decimal::from(balance),
                },
                transactions,
                transfers,
            )
        })
}

fn options() -> AnalyzeOptions {
    AnalyzeOptions::full().with_month(8).with_top(10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scores_and_benefits_are_always_in_range(view in view_strategy()) {
        let recommendations = analyze_view(view, &options()).unwrap();
        prop_assert_eq!(recommendations.len(), 10);
        for recommendation in &recommendations {
            prop_assert!((0.0..=1.0).contains(&recommendation.score));
            prop_assert!(recommendation.expected_benefit >= Decimal::ZERO);
        }
    }

    #[test]
    fn pipeline_is_deterministic(view in view_strategy()) {
        let first = analyze_view(view.clone(), &options()).unwrap();
        let second = analyze_view(view, &options()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ranking_is_monotone(view in view_strategy()) {
        let recommendations = analyze_view(view, &options()).unwrap();
        for pair in recommendations.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.priority > b.priority
                    || (a.priority == b.priority && a.score >= b.score),
                "ranking violated: {:?} before {:?}",
                (a.priority, a.score),
                (b.priority, b.score)
            );
        }
    }

    #[test]
    fn every_message_satisfies_the_tov_contract(view in view_strategy()) {
        let recommendations = analyze_view(view, &options()).unwrap();
        for recommendation in &recommendations {
            let message = &recommendation.push_notification;
            let length = message.chars().count();
            prop_assert!(
                (50..=220).contains(&length),
                "message out of window: {:?}",
                message
            );
            let lowered = message.to_lowercase();
            prop_assert!(
                CTA_VERBS.iter().any(|verb| lowered.contains(verb)),
                "no call to action in {:?}",
                message
            );
            prop_assert!(message.matches('!').count() <= 1);
        }
    }
}
