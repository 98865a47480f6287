use std::sync::Arc;
use std::{env, fs::File};

use anyhow::{Context, Result};
use reco_engine_rs::{CustomerStore, InMemoryStore, export_csv, load_dataset, setup_logging};

fn main() -> Result<()> {
    setup_logging();

    let (clients, transactions, transfers) = dataset_paths()?;
    let dataset = load_dataset(
        open(&clients)?,
        open(&transactions)?,
        open(&transfers)?,
        |error| tracing::warn!("skipped row: {error}"),
    );
    tracing::info!(
        customers = dataset.customers.len(),
        transactions = dataset.transactions.len(),
        transfers = dataset.transfers.len(),
        "dataset loaded"
    );

    let store: Arc<dyn CustomerStore> = Arc::new(InMemoryStore::from_dataset(dataset));
    export_csv(&store, std::io::stdout().lock())?;

    Ok(())
}

fn dataset_paths() -> Result<(String, String, String)> {
    let mut args = env::args().skip(1);
    match (args.next(), args.next(), args.next()) {
        (Some(clients), Some(transactions), Some(transfers)) => {
            Ok((clients, transactions, transfers))
        }
        _ => anyhow::bail!("Usage: reco-engine-rs <clients.csv> <transactions.csv> <transfers.csv>"),
    }
}

fn open(path: &str) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open {path}"))
}
