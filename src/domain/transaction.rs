//! Module defining the domain type for a single card purchase

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ClientCode, Money};

/// A single card purchase. The amount is an outflow from the customer's
/// perspective and is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub client_code: ClientCode,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Money,
    #[serde(default = "default_currency")]
    pub currency: String,
}

pub(crate) fn default_currency() -> String {
    "KZT".to_string()
}
