//! The enrichment pipeline: for each input record in order, locate the
//! page, fetch it, extract the job's fields and merge them into an
//! output record. One record's failure never aborts the batch, and
//! exactly one fetch is in flight at any time.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::extract::extract_fields;
use crate::jobs::EnrichJob;
use crate::network::{FetchError, Fetcher};
use crate::table::Record;

/// Timing parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Politeness pause between successive records (not after the
    /// last one).
    pub delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }
}

/// Sequential enricher with constructor-injected fetch dependency.
pub struct Enricher {
    fetcher: Arc<dyn Fetcher>,
    job: EnrichJob,
    config: PipelineConfig,
}

impl Enricher {
    pub fn new(fetcher: Arc<dyn Fetcher>, job: EnrichJob, config: PipelineConfig) -> Self {
        Self {
            fetcher,
            job,
            config,
        }
    }

    /// Process every input record, strictly in order.
    ///
    /// Post-conditions: one output record per input record, input
    /// order preserved, and every output record carries all original
    /// columns plus every column the job declares (empty string when
    /// extraction failed or found nothing).
    pub async fn run(&self, records: &[Record]) -> Vec<Record> {
        let mut out: Vec<Record> = Vec::with_capacity(records.len());
        let mut failures = 0usize;

        for (i, record) in records.iter().enumerate() {
            let id = record
                .get(&self.job.id_column)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("row {}", i + 1));

            let locator = self.job.locator.locate(record);
            let mut merged = record.clone();
            if let Some(column) = self.job.locator_column {
                merged.merge_absent(column, locator.clone());
            }

            // Offline job: nothing to fetch, nothing to throttle.
            if self.job.fields.is_empty() {
                out.push(merged);
                continue;
            }

            let outcome = self.attempt(&locator).await;
            let extracted = match outcome {
                Ok(fields) => {
                    info!("{}: extracted", id);
                    fields
                }
                Err(e) => {
                    failures += 1;
                    warn!("{}: fetch failed: {}", id, e);
                    Vec::new()
                }
            };

            // Merge every declared field, absent ones as empty string,
            // so the output schema never depends on a record's outcome.
            for spec in &self.job.fields {
                let value = extracted
                    .iter()
                    .find(|(name, _)| *name == spec.name())
                    .and_then(|(_, v)| v.clone())
                    .unwrap_or_default();
                merged.merge_absent(spec.name(), value);
            }
            out.push(merged);

            if i + 1 != records.len() {
                sleep(self.config.delay).await;
            }
        }

        info!("processed {} records, {} failed", out.len(), failures);
        out
    }

    /// Fetch one record's page and run the field specs over it. The
    /// timeout wraps the trait call, so no `Fetcher` implementation
    /// can stall the batch past it.
    async fn attempt(
        &self,
        locator: &str,
    ) -> Result<Vec<(&'static str, Option<String>)>, FetchError> {
        let body = match timeout(self.job.timeout, self.fetcher.fetch(locator)).await {
            Ok(result) => result?,
            Err(_) => return Err(FetchError::Timeout),
        };
        Ok(extract_fields(&body, &self.job.fields))
    }
}
