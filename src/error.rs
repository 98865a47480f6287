//! Module defining the errors which are exposed to the users of the crate

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store connection is down or a read failed. Terminal for the affected customer.
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The requested customer code does not exist in the store.
    #[error("customer {client_code} not found")]
    NotFound { client_code: i64 },

    /// Input violating domain invariants, e.g. a transaction with a negative amount
    #[error("validation error, field {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A scenario raised an unexpected condition. Recovered by the evaluator: the
    /// result is dropped and the remaining scenarios continue.
    #[error("scenario fault: {scenario}")]
    ScenarioFault { scenario: &'static str },

    /// The per-request wall-clock budget ran out. Completed results are still returned.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Invalid CSV on the dataset or export path
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while streaming an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn store_unavailable(message: impl Into<String>) -> Error {
    Error::StoreUnavailable {
        message: message.into(),
    }
}

pub(crate) fn validation_error(field: &'static str, message: impl Into<String>) -> Error {
    Error::Validation {
        field,
        message: message.into(),
    }
}
