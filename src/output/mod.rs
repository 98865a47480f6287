//! Streaming CSV export of per-customer recommendations.
//!
//! The exporter holds at most one customer's worth of intermediate state: each
//! row is written and flushed before the next customer is analyzed, so a slow
//! consumer naturally backpressures the producer.

use std::io::Write;
use std::sync::Arc;

use crate::domain::ClientCode;
use crate::engine::AnalyzeOptions;
use crate::error::Error;
use crate::store::CustomerStore;


/// Cap on customers per batch export run.
pub const EXPORT_CUSTOMER_CAP: usize = 50;

const HEADER: [&str; 3] = ["client_code", "product", "push_notification"];
const NO_PRODUCT: &str = "Нет подходящих продуктов";
const NO_PRODUCT_MESSAGE: &str =
    "У вас пока нет подходящих продуктов. Мы уведомим, когда появятся новые предложения.";
const ANALYSIS_FAILED: &str = "Ошибка анализа";
const ANALYSIS_FAILED_MESSAGE: &str = "Произошла ошибка при анализе. Попробуйте позже.";

/// Streams the top recommendation of up to [`EXPORT_CUSTOMER_CAP`] customers
/// as CSV rows. Runs the fast pipeline variant per customer; a pipeline
/// failure produces a diagnostic row and the stream continues.
pub fn export_csv<W: Write>(store: &Arc<dyn CustomerStore>, writer: W) -> Result<(), Error> {
    let codes = store.customer_codes(EXPORT_CUSTOMER_CAP)?;
    export_rows(store, codes, AnalyzeOptions::fast(), writer)
}

/// Streams the top-3 recommendations of a single customer.
pub fn export_csv_for_client<W: Write>(
    store: &Arc<dyn CustomerStore>,
    code: ClientCode,
    writer: W,
) -> Result<(), Error> {
    export_rows(store, vec![code], AnalyzeOptions::full().with_top(3), writer)
}

fn export_rows<W: Write>(
    store: &Arc<dyn CustomerStore>,
    codes: Vec<ClientCode>,
    options: AnalyzeOptions,
    writer: W,
) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    csv_writer.flush()?;

    for code in codes {
        match crate::analyze(store, code, &options) {
            Ok(recommendations) if recommendations.is_empty() => {
                csv_writer.write_record([
                    code.to_string().as_str(),
                    NO_PRODUCT,
                    NO_PRODUCT_MESSAGE,
                ])?;
            }
            Ok(recommendations) => {
                for recommendation in recommendations {
                    csv_writer.write_record([
                        code.to_string().as_str(),
                        recommendation.product.as_str(),
                        recommendation.push_notification.as_str(),
                    ])?;
                }
            }
            Err(error) => {
                tracing::warn!(%code, %error, "analysis failed, writing a diagnostic row");
                csv_writer.write_record([
                    code.to_string().as_str(),
                    ANALYSIS_FAILED,
                    ANALYSIS_FAILED_MESSAGE,
                ])?;
            }
        }
        csv_writer.flush()?;
    }

    Ok(())
}
