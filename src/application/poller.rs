// Background poller - Periodic refresh and diagnostics logging
use crate::application::diagnostics::DiagnosticsReporter;
use crate::application::normalizer::Normalizer;
use crate::application::reading_repository::ReadingRepository;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the fixed-cadence refresh loop for one collection.
///
/// Each tick is a full fetch -> normalize -> diagnose pass; results are not
/// retained between cycles, only logged. A failed fetch skips to the next
/// tick.
pub fn spawn_poller(
    repository: Arc<dyn ReadingRepository>,
    normalizer: Normalizer,
    collection: String,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    let reporter = DiagnosticsReporter::new(normalizer.clone());

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let raws = match repository.fetch_readings(&collection, None).await {
                Ok(raws) => raws,
                Err(e) => {
                    tracing::warn!(collection = %collection, error = %e, "poll fetch failed");
                    continue;
                }
            };

            let report = reporter.diagnose(&raws);
            let normalized = normalizer.normalize_batch(&raws);

            tracing::info!(
                collection = %collection,
                readings = normalized.len(),
                corrections = report.corrections(),
                "poll cycle complete"
            );
            for example in &report.examples {
                tracing::debug!(
                    field = example.field,
                    original = example.original,
                    corrected = ?example.corrected,
                    "correction example"
                );
            }
        }
    })
}
