//! Batch CSV export, including the diagnostic rows and an RFC 4180 round-trip.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use reco_engine_rs::{
    ClientCode, Customer, CustomerStore, Error, InMemoryStore, Status, Transaction, Transfer,
    category, export_csv, export_csv_for_client,
};

use crate::support::customer;

/// Delegates to an in-memory store but advertises one extra customer code the
/// store cannot actually serve.
struct GhostingStore {
    inner: InMemoryStore,
    ghost: ClientCode,
}

impl CustomerStore for GhostingStore {
    fn customer(&self, code: ClientCode) -> Result<Customer, Error> {
        self.inner.customer(code)
    }

    fn transactions(&self, code: ClientCode, since_days: u32) -> Result<Vec<Transaction>, Error> {
        self.inner.transactions(code, since_days)
    }

    fn transfers(&self, code: ClientCode, since_days: u32) -> Result<Vec<Transfer>, Error> {
        self.inner.transfers(code, since_days)
    }

    fn random_customer_code(&self) -> Result<Option<ClientCode>, Error> {
        self.inner.random_customer_code()
    }

    fn customer_codes(&self, limit: usize) -> Result<Vec<ClientCode>, Error> {
        let mut codes = self.inner.customer_codes(limit)?;
        codes.insert(1, self.ghost);
        Ok(codes.into_iter().take(limit).collect())
    }
}

fn seeded_store() -> InMemoryStore {
    let mut store = InMemoryStore::new().with_today(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    store.insert_customer(customer(1, dec!(240_000), Status::Salary));
    store.insert_customer(customer(3, dec!(8_000_000), Status::Premium));
    for day in 1..=9 {
        store.insert_transaction(Transaction {
            client_code: ClientCode::new(1),
            date: NaiveDate::from_ymd_opt(2025, 5 + day % 3, day).unwrap(),
            category: category::TAXI.to_string(),
            amount: dec!(9_000),
            currency: "KZT".to_string(),
        });
    }
    store
}

#[test]
fn missing_customer_produces_a_diagnostic_row_and_the_stream_continues() {
    let store: Arc<dyn CustomerStore> = Arc::new(GhostingStore {
        inner: seeded_store(),
        ghost: ClientCode::new(2),
    });

    let mut buffer = Vec::new();
    export_csv(&store, &mut buffer).unwrap();
    let out = String::from_utf8(buffer).unwrap();

    let mut reader = csv::ReaderBuilder::new().from_reader(out.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[1][0], "2");
    assert_eq!(&rows[1][1], "Ошибка анализа");
    assert_eq!(&rows[2][0], "3");
    assert_ne!(&rows[0][1], "Ошибка анализа");
}

#[test]
fn round_trip_preserves_the_triples_exactly() {
    let store: Arc<dyn CustomerStore> = Arc::new(seeded_store());

    let mut buffer = Vec::new();
    export_csv(&store, &mut buffer).unwrap();
    let out = String::from_utf8(buffer).unwrap();

    let mut reader = csv::ReaderBuilder::new().from_reader(out.as_bytes());
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec!["client_code", "product", "push_notification"])
    );
    for row in reader.records() {
        let row = row.unwrap();
        assert_eq!(row.len(), 3);
        let length = row[2].chars().count();
        assert!((50..=220).contains(&length), "bad message length {length}");
    }
}

#[test]
fn single_client_export_carries_up_to_three_rows() {
    let store: Arc<dyn CustomerStore> = Arc::new(seeded_store());

    let mut buffer = Vec::new();
    export_csv_for_client(&store, ClientCode::new(1), &mut buffer).unwrap();
    let out = String::from_utf8(buffer).unwrap();

    let mut reader = csv::ReaderBuilder::new().from_reader(out.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| &row[0] == "1"));

    let products: Vec<&str> = rows.iter().map(|row| &row[1]).map(|s| s as &str).collect();
    assert!(products.contains(&"Карта для путешествий"));
}

#[test]
fn export_uses_crlf_and_no_bom() {
    let store: Arc<dyn CustomerStore> = Arc::new(seeded_store());

    let mut buffer = Vec::new();
    export_csv(&store, &mut buffer).unwrap();

    assert_ne!(&buffer[..3], [0xEF, 0xBB, 0xBF]);
    let out = String::from_utf8(buffer).unwrap();
    assert!(out.starts_with("client_code,product,push_notification\r\n"));
    assert!(out.ends_with("\r\n"));
}
