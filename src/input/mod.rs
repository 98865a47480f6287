//! Module defining the parsing logic used to convert the CSV dataset into
//! validated domain rows that can be loaded into a store.

use std::io::Read;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{
    ClientCode, Customer, Direction, Status, Transaction, Transfer, TransferType,
};
use crate::error::{Error, validation_error};


/// The three-table dataset backing an in-memory store.
#[derive(Debug, Default)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    pub transfers: Vec<Transfer>,
}

/// Parses the three CSV readers into a dataset. Rows that fail to parse or
/// violate domain invariants are reported to `on_error` and skipped; the load
/// continues with the remaining rows.
pub fn load_dataset(
    clients: impl Read,
    transactions: impl Read,
    transfers: impl Read,
    mut on_error: impl FnMut(Error),
) -> Dataset {
    let mut dataset = Dataset::default();

    for result in csv_reader(clients).into_deserialize::<RawClient>() {
        match result.map_err(Error::from).map(Customer::from) {
            Ok(customer) => dataset.customers.push(customer),
            Err(error) => on_error(error),
        }
    }
    for result in csv_reader(transactions).into_deserialize::<RawTransaction>() {
        match result.map_err(Error::from).and_then(Transaction::try_from) {
            Ok(tx) => dataset.transactions.push(tx),
            Err(error) => on_error(error),
        }
    }
    for result in csv_reader(transfers).into_deserialize::<RawTransfer>() {
        match result.map_err(Error::from).and_then(Transfer::try_from) {
            Ok(transfer) => dataset.transfers.push(transfer),
            Err(error) => on_error(error),
        }
    }

    dataset
}

fn csv_reader(reader: impl Read) -> csv::Reader<impl Read> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

// Intermediate types mirroring the CSV columns

#[derive(Deserialize)]
struct RawClient {
    client_code: i64,
    name: String,
    status: String,
    age: Option<u32>,
    city: String,
    #[serde(rename = "avg_monthly_balance_KZT")]
    avg_monthly_balance: Decimal,
}

impl From<RawClient> for Customer {
    fn from(raw: RawClient) -> Self {
        Customer {
            client_code: ClientCode::new(raw.client_code),
            name: raw.name,
            status: Status::from_label(&raw.status),
            age: raw.age,
            city: raw.city,
            avg_monthly_balance: raw.avg_monthly_balance.round_dp(2),
        }
    }
}

#[derive(Deserialize)]
struct RawTransaction {
    client_code: i64,
    date: NaiveDate,
    category: String,
    amount: Decimal,
    #[serde(default)]
    currency: Option<String>,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = Error;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        if raw.amount < Decimal::ZERO {
            return Err(validation_error(
                "transactions.amount",
                format!(
                    "negative amount {} for customer {}",
                    raw.amount, raw.client_code
                ),
            ));
        }
        Ok(Transaction {
            client_code: ClientCode::new(raw.client_code),
            date: raw.date,
            category: raw.category,
            amount: raw.amount.round_dp(2),
            currency: raw.currency.unwrap_or_else(|| "KZT".to_string()),
        })
    }
}

#[derive(Deserialize)]
struct RawTransfer {
    client_code: i64,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransferType,
    direction: Direction,
    amount: Decimal,
    #[serde(default)]
    currency: Option<String>,
}

impl TryFrom<RawTransfer> for Transfer {
    type Error = Error;

    fn try_from(raw: RawTransfer) -> Result<Self, Self::Error> {
        if raw.amount < Decimal::ZERO {
            return Err(validation_error(
                "transfers.amount",
                format!(
                    "negative amount {} for customer {}",
                    raw.amount, raw.client_code
                ),
            ));
        }
        if let Some(expected) = raw.kind.expected_direction()
            && expected != raw.direction
        {
            return Err(validation_error(
                "transfers.direction",
                format!(
                    "direction {} is inconsistent with the transfer type for customer {}",
                    raw.direction, raw.client_code
                ),
            ));
        }
        Ok(Transfer {
            client_code: ClientCode::new(raw.client_code),
            date: raw.date,
            kind: raw.kind,
            direction: raw.direction,
            amount: raw.amount.round_dp(2),
            currency: raw.currency.unwrap_or_else(|| "KZT".to_string()),
        })
    }
}
