//! In-memory composition of a customer with the activity inside the analysis window

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Customer, Transaction, Transfer};
use crate::error::{Error, validation_error};

/// Days of activity considered by default.
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// The customer plus the transactions and transfers inside the analysis
/// window. This is the sole input of every scoring scenario; scenarios never
/// reach back into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub customer: Customer,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    #[serde(default = "default_window")]
    pub window_days: u32,
}

fn default_window() -> u32 {
    DEFAULT_WINDOW_DAYS
}

impl CustomerView {
    pub fn new(customer: Customer, transactions: Vec<Transaction>, transfers: Vec<Transfer>) -> Self {
        Self {
            customer,
            transactions,
            transfers,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Checks the invariants the scenarios rely on. Returns a field-level
    /// error for the first violation, so a transport can report the offending
    /// field to its caller.
    pub fn validate(&self) -> Result<(), Error> {
        for tx in &self.transactions {
            if tx.amount < Decimal::ZERO {
                return Err(validation_error(
                    "transactions.amount",
                    format!("negative amount {} for customer {}", tx.amount, tx.client_code),
                ));
            }
        }
        for transfer in &self.transfers {
            if transfer.amount < Decimal::ZERO {
                return Err(validation_error(
                    "transfers.amount",
                    format!(
                        "negative amount {} for customer {}",
                        transfer.amount, transfer.client_code
                    ),
                ));
            }
            if let Some(expected) = transfer.kind.expected_direction()
                && expected != transfer.direction
            {
                return Err(validation_error(
                    "transfers.direction",
                    format!(
                        "direction {} is inconsistent with the transfer type",
                        transfer.direction
                    ),
                ));
            }
        }
        Ok(())
    }

    /// True when there is nothing to score at all: no activity and a zero balance.
    pub(crate) fn is_blank(&self) -> bool {
        self.transactions.is_empty()
            && self.transfers.is_empty()
            && self.customer.avg_monthly_balance <= Decimal::ZERO
    }
}
