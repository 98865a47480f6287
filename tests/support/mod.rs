//! Shared builders for the integration suite.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use reco_engine_rs::{
    ClientCode, Customer, CustomerView, Direction, Money, Status, Transaction, Transfer,
    TransferType, category,
};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

pub fn customer(code: i64, balance: Money, status: Status) -> Customer {
    Customer {
        client_code: ClientCode::new(code),
        name: "Айгерим".to_string(),
        status,
        age: Some(31),
        city: "Алматы".to_string(),
        avg_monthly_balance: balance,
    }
}

pub fn tx(code: i64, month: u32, day: u32, category_label: &str, amount: Money) -> Transaction {
    Transaction {
        client_code: ClientCode::new(code),
        date: date(month, day),
        category: category_label.to_string(),
        amount,
        currency: "KZT".to_string(),
    }
}

pub fn transfer(
    code: i64,
    month: u32,
    day: u32,
    kind: TransferType,
    direction: Direction,
    amount: Money,
) -> Transfer {
    Transfer {
        client_code: ClientCode::new(code),
        date: date(month, day),
        kind,
        direction,
        amount,
        currency: "KZT".to_string(),
    }
}

/// Seed scenario 1: a salary client whose card activity is dominated by taxi
/// and hotels.
pub fn travel_heavy_view() -> CustomerView {
    let mut transactions = Vec::new();
    for day in 1..=8 {
        transactions.push(tx(1, day % 3 + 5, day, category::TAXI, dec!(7500)));
    }
    transactions.push(tx(1, 5, 20, category::HOTELS, dec!(90_000)));
    transactions.push(tx(1, 7, 21, category::HOTELS, dec!(90_000)));
    for day in 1..=10 {
        transactions.push(tx(1, day % 3 + 5, day + 10, category::GROCERIES, dec!(14_000)));
    }
    CustomerView::new(
        customer(1, dec!(240_000), Status::Salary),
        transactions,
        vec![transfer(1, 6, 5, TransferType::SalaryIn, Direction::In, dec!(320_000))],
    )
}

/// Seed scenario 2: high balance, premium status, premium-category spend.
pub fn premium_heavy_view() -> CustomerView {
    let mut transactions = Vec::new();
    for day in 1..=10 {
        transactions.push(tx(2, day % 3 + 5, day, category::RESTAURANTS, dec!(90_000)));
        transactions.push(tx(2, day % 3 + 5, day, category::JEWELRY, dec!(45_000)));
        transactions.push(tx(2, day % 3 + 5, day, category::GIFTS, dec!(15_000)));
    }
    CustomerView::new(customer(2, dec!(8_000_000), Status::Premium), transactions, vec![])
}

/// Seed scenario 3: six FX operations across three months.
pub fn fx_active_view() -> CustomerView {
    let transfers = vec![
        transfer(3, 5, 2, TransferType::FxBuy, Direction::Out, dec!(200_000)),
        transfer(3, 5, 20, TransferType::FxSell, Direction::In, dec!(200_000)),
        transfer(3, 6, 2, TransferType::FxBuy, Direction::Out, dec!(200_000)),
        transfer(3, 6, 20, TransferType::FxSell, Direction::In, dec!(200_000)),
        transfer(3, 7, 2, TransferType::FxBuy, Direction::Out, dec!(200_000)),
        transfer(3, 7, 20, TransferType::FxSell, Direction::In, dec!(200_000)),
    ];
    CustomerView::new(customer(3, dec!(600_000), Status::Standard), vec![], transfers)
}

/// Seed scenario 4: a student with a 40k balance and three purchases.
pub fn student_view() -> CustomerView {
    CustomerView::new(
        customer(4, dec!(40_000), Status::Student),
        vec![
            tx(4, 6, 1, category::GROCERIES, dec!(5_000)),
            tx(4, 6, 14, category::GROCERIES, dec!(4_000)),
            tx(4, 7, 2, category::CLOTHES, dec!(9_000)),
        ],
        vec![],
    )
}

pub fn blank_customer_view() -> CustomerView {
    CustomerView::new(customer(5, Decimal::ZERO, Status::Unknown), vec![], vec![])
}
