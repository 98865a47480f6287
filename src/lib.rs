//! Per-customer product recommendations with localized push notifications.
//!
//! The pipeline reads a customer's activity through the read-only
//! [`CustomerStore`] interface, derives [`Aggregates`] in one pass, fans out
//! ten independent product scenarios under a wall-clock deadline, ranks the
//! verdicts and renders a tone-of-voice-validated push message per
//! recommendation. Batch consumers stream the results as CSV without holding
//! more than one customer in memory.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use reco_engine_rs::{AnalyzeOptions, CustomerStore, InMemoryStore, ClientCode, analyze};
//!
//! let store: Arc<dyn CustomerStore> = Arc::new(InMemoryStore::new());
//! let recommendations =
//!     analyze(&store, ClientCode::new(1), &AnalyzeOptions::full()).unwrap();
//! for recommendation in recommendations {
//!     println!("{}: {}", recommendation.product, recommendation.push_notification);
//! }
//! ```

mod domain;
mod engine;
mod error;
mod input;
mod notify;
mod output;
mod scenario;
mod store;
mod telemetry;

use std::sync::Arc;

pub use domain::{
    Aggregates, ClientCode, Customer, CustomerView, Direction, Money, Status, Transaction,
    Transfer, TransferType, YearMonth, category,
};
pub use engine::rank::{Priority, Recommendation};
pub use engine::{AnalyzeOptions, DEFAULT_WINDOW_DAYS, FAST_DEADLINE, FULL_DEADLINE};
pub use error::Error;
pub use input::{Dataset, load_dataset};
pub use notify::{CTA_VERBS, enforce_tov, format_kzt};
pub use output::{EXPORT_CUSTOMER_CAP, export_csv, export_csv_for_client};
pub use store::{CustomerStore, InMemoryStore};
pub use telemetry::setup_logging;

use engine::Evaluation;
use notify::Renderer;

/// Runs the recommendation pipeline for one stored customer and returns the
/// ranked, rendered recommendations, best first.
///
/// A deadline expiring mid-run is not an error: whatever completed in time is
/// ranked and returned, possibly an empty list. `Error::NotFound` and
/// `Error::StoreUnavailable` abort the run for this customer.
pub fn analyze(
    store: &Arc<dyn CustomerStore>,
    code: ClientCode,
    options: &AnalyzeOptions,
) -> Result<Vec<Recommendation>, Error> {
    match engine::evaluate_customer(store, code, options)? {
        Some(evaluation) => Ok(finish(code, evaluation, options)),
        None => Ok(Vec::new()),
    }
}

/// Runs the pipeline over an inline [`CustomerView`], the transport's
/// analyze-body path. The view is validated first; a missing or malformed
/// field surfaces as [`Error::Validation`] naming the field.
pub fn analyze_view(
    view: CustomerView,
    options: &AnalyzeOptions,
) -> Result<Vec<Recommendation>, Error> {
    let code = view.customer.client_code;
    let evaluation = engine::evaluate_view(view, options)?;
    Ok(finish(code, evaluation, options))
}

/// Picks some stored customer and runs the full pipeline. `Ok(None)` when the
/// store holds no customers.
pub fn analyze_random(
    store: &Arc<dyn CustomerStore>,
    options: &AnalyzeOptions,
) -> Result<Option<(ClientCode, Vec<Recommendation>)>, Error> {
    let Some(code) = store.random_customer_code()? else {
        return Ok(None);
    };
    analyze(store, code, options).map(|recommendations| Some((code, recommendations)))
}

fn finish(code: ClientCode, evaluation: Evaluation, options: &AnalyzeOptions) -> Vec<Recommendation> {
    let renderer = match options.month {
        Some(month) => Renderer::new(month),
        None => Renderer::for_current_month(),
    };

    engine::rank::rank(evaluation.results)
        .into_iter()
        .take(options.top)
        .map(|ranked| {
            let push_notification = renderer.render(&ranked.scored, &evaluation.customer_name);
            Recommendation {
                client_code: code,
                product: ranked.scored.product.to_string(),
                score: ranked.scored.result.score,
                expected_benefit: ranked.scored.result.expected_benefit,
                priority: ranked.priority,
                reasons: ranked.scored.result.reasons,
                push_notification,
            }
        })
        .collect()
}
