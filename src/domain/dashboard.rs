// Dashboard domain model
use crate::domain::reading::NormalizedReading;
use crate::domain::statistics::PeriodStatistics;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub reading_count: usize,
    pub latest: Option<NormalizedReading>,
    pub statistics: PeriodStatistics,
}

impl Dashboard {
    pub fn new(
        title: String,
        reading_count: usize,
        latest: Option<NormalizedReading>,
        statistics: PeriodStatistics,
    ) -> Self {
        Self {
            title,
            reading_count,
            latest,
            statistics,
        }
    }
}
