//! Evaluation pipeline: view materialization, scenario fan-out under a
//! wall-clock deadline, and collection of partial results.

pub(crate) mod rank;


use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::{Aggregates, ClientCode, CustomerView};
use crate::error::{Error, store_unavailable};
use crate::scenario::{Scenario, ScenarioResult, all_scenarios, fast_scenarios};
use crate::store::CustomerStore;

pub use crate::domain::DEFAULT_WINDOW_DAYS;

/// Wall-clock budget of the full ten-scenario pipeline.
pub const FULL_DEADLINE: Duration = Duration::from_secs(30);
/// Wall-clock budget of the restricted fast pipeline.
pub const FAST_DEADLINE: Duration = Duration::from_secs(15);

/// Knobs of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub window_days: u32,
    pub deadline: Duration,
    /// How many ranked recommendations to return.
    pub top: usize,
    /// Restrict the run to the fast scenario subset.
    pub fast: bool,
    /// Month (1..=12) used for the notification month label; the current
    /// month when unset.
    pub month: Option<u32>,
}

impl AnalyzeOptions {
    /// Full pipeline: all ten scenarios, up to four recommendations.
    pub fn full() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            deadline: FULL_DEADLINE,
            top: 4,
            fast: false,
            month: None,
        }
    }

    /// Fast pipeline: five scenarios, the single best recommendation.
    pub fn fast() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            deadline: FAST_DEADLINE,
            top: 1,
            fast: true,
            month: None,
        }
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }
}

/// One scenario's verdict tagged with its product identity and registry slot.
#[derive(Debug)]
pub(crate) struct Scored {
    pub(crate) product: &'static str,
    pub(crate) template_key: &'static str,
    pub(crate) order: usize,
    pub(crate) result: ScenarioResult,
}

/// The outcome of one customer's pipeline run.
pub(crate) struct Evaluation {
    pub(crate) customer_name: String,
    pub(crate) results: Vec<Scored>,
}

/// Materializes the view from the store and fans the scenarios out.
/// `Ok(None)` means the deadline expired before the store reads finished;
/// the caller turns that into an empty recommendation list.
pub(crate) fn evaluate_customer(
    store: &Arc<dyn CustomerStore>,
    code: ClientCode,
    options: &AnalyzeOptions,
) -> Result<Option<Evaluation>, Error> {
    let deadline = Instant::now() + options.deadline;
    let Some(view) = fetch_view(Arc::clone(store), code, options.window_days, deadline)? else {
        return Ok(None);
    };
    Ok(Some(evaluate(view, scenario_set(options.fast), deadline)))
}

/// Runs the pipeline over an already materialized view (the inline-body
/// analyze path). Validates the view first.
pub(crate) fn evaluate_view(
    view: CustomerView,
    options: &AnalyzeOptions,
) -> Result<Evaluation, Error> {
    view.validate()?;
    let deadline = Instant::now() + options.deadline;
    Ok(evaluate(view, scenario_set(options.fast), deadline))
}

fn scenario_set(fast: bool) -> Vec<Arc<dyn Scenario>> {
    if fast { fast_scenarios() } else { all_scenarios() }
}

fn evaluate(view: CustomerView, scenarios: Vec<Arc<dyn Scenario>>, deadline: Instant) -> Evaluation {
    let customer_name = view.customer.name.clone();
    let view = Arc::new(view);
    let aggregates = Arc::new(Aggregates::build(&view));
    let results = run_scenarios(view, aggregates, scenarios, deadline);
    Evaluation {
        customer_name,
        results,
    }
}

enum WorkerEvent {
    Completed(Scored),
    Faulted(&'static str),
    Skipped(&'static str),
}

/// Fans the scenarios out over a small worker pool. Workers check the
/// deadline before starting each scenario; scenarios already running are
/// allowed to finish. A panicking scenario is dropped without aborting the
/// run. Collection stops at the deadline; stragglers are abandoned.
fn run_scenarios(
    view: Arc<CustomerView>,
    aggregates: Arc<Aggregates>,
    scenarios: Vec<Arc<dyn Scenario>>,
    deadline: Instant,
) -> Vec<Scored> {
    let expected = scenarios.len();
    if expected == 0 {
        return Vec::new();
    }

    let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>();
    let (job_tx, job_rx) = mpsc::channel::<(usize, Arc<dyn Scenario>)>();
    let job_rx = Arc::new(Mutex::new(job_rx));

    for _ in 0..num_workers(expected) {
        let job_rx = Arc::clone(&job_rx);
        let event_tx = event_tx.clone();
        let view = Arc::clone(&view);
        let aggregates = Arc::clone(&aggregates);

        thread::spawn(move || {
            loop {
                let job = {
                    let Ok(guard) = job_rx.lock() else { break };
                    guard.recv()
                };
                let Ok((order, scenario)) = job else { break };

                if Instant::now() >= deadline {
                    let _ = event_tx.send(WorkerEvent::Skipped(scenario.product_name()));
                    continue;
                }

                let outcome =
                    catch_unwind(AssertUnwindSafe(|| scenario.analyze(&view, &aggregates)));
                let event = match outcome {
                    Ok(result) => WorkerEvent::Completed(Scored {
                        product: scenario.product_name(),
                        template_key: scenario.template_key(),
                        order,
                        result,
                    }),
                    Err(_) => WorkerEvent::Faulted(scenario.product_name()),
                };
                // A send fails only when the collector already gave up on the
                // deadline; the verdict is abandoned either way.
                let _ = event_tx.send(event);
            }
        });
    }

    for (order, scenario) in scenarios.into_iter().enumerate() {
        let _ = job_tx.send((order, scenario));
    }
    drop(job_tx);
    drop(event_tx);

    let mut completed = Vec::with_capacity(expected);
    let mut seen = 0;
    while seen < expected {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match event_rx.recv_timeout(remaining) {
            Ok(WorkerEvent::Completed(scored)) => {
                seen += 1;
                completed.push(scored);
            }
            Ok(WorkerEvent::Faulted(product)) => {
                seen += 1;
                tracing::warn!(scenario = product, "scenario fault: verdict dropped");
            }
            Ok(WorkerEvent::Skipped(product)) => {
                seen += 1;
                tracing::debug!(scenario = product, "scenario skipped at deadline");
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    completed = completed.len(),
                    expected,
                    "deadline expired, returning partial results"
                );
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    completed
}

fn num_workers(jobs: usize) -> usize {
    thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1).max(1))
        .unwrap_or(1)
        .min(jobs)
}

/// Runs the three store reads on a worker thread so the deadline also covers
/// a stalled store. On expiry the in-flight read is abandoned; the store is
/// expected to enforce its own statement timeouts.
fn fetch_view(
    store: Arc<dyn CustomerStore>,
    code: ClientCode,
    window_days: u32,
    deadline: Instant,
) -> Result<Option<CustomerView>, Error> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(materialize_view(store.as_ref(), code, window_days));
    });

    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
        Ok(result) => result.map(Some),
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!(%code, "deadline expired during store reads");
            Ok(None)
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(store_unavailable("store worker terminated unexpectedly"))
        }
    }
}

fn materialize_view(
    store: &dyn CustomerStore,
    code: ClientCode,
    window_days: u32,
) -> Result<CustomerView, Error> {
    let customer = store.customer(code)?;
    let transactions = store.transactions(code, window_days)?;
    let transfers = store.transfers(code, window_days)?;
    Ok(CustomerView {
        customer,
        transactions,
        transfers,
        window_days,
    })
}
