//! Module for the (crate-internal) types defining the customer-analytics domain.

pub mod category;

mod aggregates;
mod transaction;
mod transfer;
mod view;

pub use aggregates::{Aggregates, YearMonth};
pub use transaction::Transaction;
pub use transfer::{Direction, Transfer, TransferType};
pub use view::{CustomerView, DEFAULT_WINDOW_DAYS};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type Money = Decimal;

/// Stable integer identifier of a customer across all inputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ClientCode(i64);

impl ClientCode {
    pub fn new(code: i64) -> Self {
        Self(code)
    }
}

impl From<ClientCode> for i64 {
    fn from(code: ClientCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for ClientCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Official customer status. Parsed from the canonical Russian labels; anything
/// outside the enumerated set is carried as [`Status::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[serde(rename = "Премиальный клиент")]
    Premium,
    #[serde(rename = "Зарплатный клиент")]
    Salary,
    #[serde(rename = "Стандартный клиент")]
    Standard,
    #[serde(rename = "Студент")]
    Student,
    #[default]
    #[serde(other, rename = "Неизвестный")]
    Unknown,
}

impl Status {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Премиальный клиент" => Status::Premium,
            "Зарплатный клиент" => Status::Salary,
            "Стандартный клиент" => Status::Standard,
            "Студент" => Status::Student,
            _ => Status::Unknown,
        }
    }
}

/// Identity and static context of a customer. Created by an upstream system;
/// the pipeline treats it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub client_code: ClientCode,
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "avg_monthly_balance_KZT")]
    pub avg_monthly_balance: Money,
}
