// Reading service - Use case for listing normalized readings
use crate::application::normalizer::Normalizer;
use crate::application::reading_repository::ReadingRepository;
use crate::domain::reading::NormalizedReading;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReadingService {
    repository: Arc<dyn ReadingRepository>,
    normalizer: Normalizer,
}

impl ReadingService {
    pub fn new(repository: Arc<dyn ReadingRepository>, normalizer: Normalizer) -> Self {
        Self {
            repository,
            normalizer,
        }
    }

    pub async fn get_readings(
        &self,
        collection: &str,
        date_filter: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<NormalizedReading>> {
        let raws = self.repository.fetch_readings(collection, date_filter).await?;
        Ok(self.normalizer.normalize_batch(&raws))
    }
}
