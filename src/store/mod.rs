//! Read-only store interface consumed by the pipeline. The relational store
//! itself lives behind this trait; implementations manage their own
//! connections and are expected to keep reads snapshot-consistent for one
//! customer within a single call sequence.

mod memory;

pub use memory::InMemoryStore;

use crate::domain::{ClientCode, Customer, Transaction, Transfer};
use crate::error::Error;

/// Read access to customer data. The pipeline issues at most three reads per
/// customer run (customer, transactions, transfers) and holds no connection
/// between runs.
pub trait CustomerStore: Send + Sync {
    /// Fetches the customer record. `Error::NotFound` when the code is unknown,
    /// `Error::StoreUnavailable` when the backend failed.
    fn customer(&self, code: ClientCode) -> Result<Customer, Error>;

    /// Card transactions within the last `since_days`, newest first.
    /// Rows are always complete; the store never returns partially populated rows.
    fn transactions(&self, code: ClientCode, since_days: u32) -> Result<Vec<Transaction>, Error>;

    /// Transfers within the last `since_days`, newest first.
    fn transfers(&self, code: ClientCode, since_days: u32) -> Result<Vec<Transfer>, Error>;

    /// Picks some stored customer code, `None` when the store is empty.
    fn random_customer_code(&self) -> Result<Option<ClientCode>, Error>;

    /// Up to `limit` customer codes in stable order.
    fn customer_codes(&self, limit: usize) -> Result<Vec<ClientCode>, Error>;
}
