//! In-memory store backing the CLI batch runs and the test suite.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Days, NaiveDate};

use crate::domain::{ClientCode, Customer, Transaction, Transfer};
use crate::error::Error;
use crate::input::Dataset;
use crate::store::CustomerStore;

/// A [`CustomerStore`] holding the whole dataset in memory. The window filter
/// is applied relative to a fixed `today`, which tests pin for deterministic
/// results.
pub struct InMemoryStore {
    customers: BTreeMap<ClientCode, Customer>,
    transactions: HashMap<ClientCode, Vec<Transaction>>,
    transfers: HashMap<ClientCode, Vec<Transfer>>,
    today: NaiveDate,
    cursor: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            customers: BTreeMap::new(),
            transactions: HashMap::new(),
            transfers: HashMap::new(),
            today: chrono::Local::now().date_naive(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut store = Self::new();
        for customer in dataset.customers {
            store.customers.insert(customer.client_code, customer);
        }
        for tx in dataset.transactions {
            store.transactions.entry(tx.client_code).or_default().push(tx);
        }
        for transfer in dataset.transfers {
            store.transfers.entry(transfer.client_code).or_default().push(transfer);
        }
        for rows in store.transactions.values_mut() {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
        }
        for rows in store.transfers.values_mut() {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
        }
        store
    }

    /// Pins the reference date used by the window filter.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn insert_customer(&mut self, customer: Customer) {
        self.customers.insert(customer.client_code, customer);
    }

    pub fn insert_transaction(&mut self, tx: Transaction) {
        let rows = self.transactions.entry(tx.client_code).or_default();
        rows.push(tx);
        rows.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn insert_transfer(&mut self, transfer: Transfer) {
        let rows = self.transfers.entry(transfer.client_code).or_default();
        rows.push(transfer);
        rows.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    fn window_start(&self, since_days: u32) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(u64::from(since_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for InMemoryStore {
    fn customer(&self, code: ClientCode) -> Result<Customer, Error> {
        self.customers.get(&code).cloned().ok_or(Error::NotFound {
            client_code: code.into(),
        })
    }

    fn transactions(&self, code: ClientCode, since_days: u32) -> Result<Vec<Transaction>, Error> {
        let start = self.window_start(since_days);
        Ok(self
            .transactions
            .get(&code)
            .map(|rows| {
                rows.iter()
                    .filter(|tx| tx.date >= start)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn transfers(&self, code: ClientCode, since_days: u32) -> Result<Vec<Transfer>, Error> {
        let start = self.window_start(since_days);
        Ok(self
            .transfers
            .get(&code)
            .map(|rows| {
                rows.iter()
                    .filter(|transfer| transfer.date >= start)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn random_customer_code(&self) -> Result<Option<ClientCode>, Error> {
        if self.customers.is_empty() {
            return Ok(None);
        }
        // Rotating pick keeps repeated probes spread over the population
        // without pulling in a randomness dependency.
        let nth = self.cursor.fetch_add(1, Ordering::Relaxed) % self.customers.len();
        Ok(self.customers.keys().nth(nth).copied())
    }

    fn customer_codes(&self, limit: usize) -> Result<Vec<ClientCode>, Error> {
        Ok(self.customers.keys().take(limit).copied().collect())
    }
}
