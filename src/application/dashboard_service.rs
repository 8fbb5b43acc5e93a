// Dashboard service - Use case for building the aggregated dashboard
use crate::application::aggregator;
use crate::application::diagnostics::DiagnosticsReporter;
use crate::application::normalizer::Normalizer;
use crate::application::reading_repository::ReadingRepository;
use crate::domain::collection::Collection;
use crate::domain::dashboard::Dashboard;
use crate::domain::reading::{NormalizedReading, RawReading};
use crate::domain::report::DiagnosticReport;
use crate::domain::statistics::Granularity;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ReadingRepository>,
    normalizer: Normalizer,
    reporter: DiagnosticsReporter,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn ReadingRepository>, normalizer: Normalizer) -> Self {
        let reporter = DiagnosticsReporter::new(normalizer.clone());
        Self {
            repository,
            normalizer,
            reporter,
        }
    }

    /// Full drive cycle: fetch, normalize, diagnose, aggregate.
    ///
    /// An upstream failure degrades to an empty batch; the dashboard is
    /// still structurally valid (fallback statistics) because telemetry
    /// gaps must not break the aggregation pass.
    pub async fn get_dashboard(
        &self,
        collection_id: &str,
        granularity: Granularity,
        date_filter: Option<NaiveDate>,
    ) -> Dashboard {
        let collection = Collection::new(collection_id.to_string());
        let title = format!("{} water quality ({})", collection.name, granularity.label());

        let raws = self.fetch_or_empty(collection_id, date_filter).await;

        let report = self.reporter.diagnose(&raws);
        if report.corrections() > 0 {
            tracing::warn!(
                collection = collection_id,
                total = report.total,
                corrections = report.corrections(),
                "batch contained out-of-range values"
            );
        }

        let normalized = self.normalizer.normalize_batch(&raws);
        let statistics = aggregator::summarize(&normalized, granularity);
        let latest = latest_reading(&normalized).cloned();

        Dashboard::new(title, normalized.len(), latest, statistics)
    }

    /// Diagnostics for the same raw batch the dashboard would see.
    pub async fn get_diagnostics(
        &self,
        collection_id: &str,
        date_filter: Option<NaiveDate>,
    ) -> DiagnosticReport {
        let raws = self.fetch_or_empty(collection_id, date_filter).await;
        self.reporter.diagnose(&raws)
    }

    async fn fetch_or_empty(
        &self,
        collection_id: &str,
        date_filter: Option<NaiveDate>,
    ) -> Vec<RawReading> {
        match self.repository.fetch_readings(collection_id, date_filter).await {
            Ok(raws) => raws,
            Err(e) => {
                tracing::warn!(
                    collection = collection_id,
                    error = %e,
                    "upstream fetch failed, continuing with empty batch"
                );
                Vec::new()
            }
        }
    }
}

/// Most recent reading by timestamp; falls back to the last element when no
/// record carries a parseable timestamp.
fn latest_reading(normalized: &[NormalizedReading]) -> Option<&NormalizedReading> {
    normalized
        .iter()
        .filter(|r| r.timestamp().is_some())
        .max_by_key(|r| r.timestamp())
        .or_else(|| normalized.last())
}
