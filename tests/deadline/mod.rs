//! Deadline behavior with a stalling store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reco_engine_rs::{
    AnalyzeOptions, ClientCode, Customer, CustomerStore, Error, Status, Transaction, Transfer,
    analyze,
};
use rust_decimal_macros::dec;

/// A store whose transfer read hangs far beyond any reasonable deadline.
struct StarvingStore {
    sleep: Duration,
}

impl CustomerStore for StarvingStore {
    fn customer(&self, code: ClientCode) -> Result<Customer, Error> {
        Ok(Customer {
            client_code: code,
            name: "Медленный".to_string(),
            status: Status::Standard,
            age: None,
            city: "Алматы".to_string(),
            avg_monthly_balance: dec!(500_000),
        })
    }

    fn transactions(&self, _code: ClientCode, _since_days: u32) -> Result<Vec<Transaction>, Error> {
        Ok(Vec::new())
    }

    fn transfers(&self, _code: ClientCode, _since_days: u32) -> Result<Vec<Transfer>, Error> {
        std::thread::sleep(self.sleep);
        Ok(Vec::new())
    }

    fn random_customer_code(&self) -> Result<Option<ClientCode>, Error> {
        Ok(Some(ClientCode::new(1)))
    }

    fn customer_codes(&self, limit: usize) -> Result<Vec<ClientCode>, Error> {
        Ok(vec![ClientCode::new(1)].into_iter().take(limit).collect())
    }
}

#[test]
fn starved_store_reads_yield_an_empty_result_not_an_error() {
    let store: Arc<dyn CustomerStore> = Arc::new(StarvingStore {
        sleep: Duration::from_secs(5),
    });
    let options = AnalyzeOptions::full().with_deadline(Duration::from_millis(200));

    let started = Instant::now();
    let recommendations = analyze(&store, ClientCode::new(1), &options).unwrap();

    assert!(recommendations.is_empty());
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "the caller must not wait for the stalled read"
    );
}

/// A store that fails outright.
struct BrokenStore;

impl CustomerStore for BrokenStore {
    fn customer(&self, _code: ClientCode) -> Result<Customer, Error> {
        Err(Error::StoreUnavailable {
            message: "connection refused".to_string(),
        })
    }

    fn transactions(&self, _code: ClientCode, _since_days: u32) -> Result<Vec<Transaction>, Error> {
        Err(Error::StoreUnavailable {
            message: "connection refused".to_string(),
        })
    }

    fn transfers(&self, _code: ClientCode, _since_days: u32) -> Result<Vec<Transfer>, Error> {
        Err(Error::StoreUnavailable {
            message: "connection refused".to_string(),
        })
    }

    fn random_customer_code(&self) -> Result<Option<ClientCode>, Error> {
        Err(Error::StoreUnavailable {
            message: "connection refused".to_string(),
        })
    }

    fn customer_codes(&self, _limit: usize) -> Result<Vec<ClientCode>, Error> {
        Err(Error::StoreUnavailable {
            message: "connection refused".to_string(),
        })
    }
}

#[test]
fn unavailable_store_is_a_terminal_error_for_the_customer() {
    let store: Arc<dyn CustomerStore> = Arc::new(BrokenStore);
    let result = analyze(&store, ClientCode::new(1), &AnalyzeOptions::full());

    assert!(matches!(result, Err(Error::StoreUnavailable { .. })));
}

#[test]
fn missing_customer_surfaces_not_found() {
    let store: Arc<dyn CustomerStore> =
        Arc::new(reco_engine_rs::InMemoryStore::new());
    let result = analyze(&store, ClientCode::new(404), &AnalyzeOptions::full());

    assert!(matches!(result, Err(Error::NotFound { client_code: 404 })));
}
