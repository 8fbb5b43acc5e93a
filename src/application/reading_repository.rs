// Repository trait for raw reading access
use crate::domain::reading::RawReading;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Fetch the raw batch for a collection, most recent window when no
    /// date filter is given, the selected calendar day otherwise.
    async fn fetch_readings(
        &self,
        collection: &str,
        date_filter: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<RawReading>>;
}
