// Aggregation domain models
use crate::domain::field::FieldKind;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calendar bucketing for period summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Hour,
    Day,
}

impl Granularity {
    /// Bucket key for a timestamp: `day/month hour` or `day/month`.
    pub fn bucket_key(self, timestamp: &DateTime<FixedOffset>) -> String {
        match self {
            Granularity::Hour => timestamp.format("%d/%m %H:00").to_string(),
            Granularity::Day => timestamp.format("%d/%m").to_string(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Hour => "hourly",
            Granularity::Day => "daily",
        }
    }
}

/// One period bucket with the values contributing to each field's mean.
/// Exists only during an aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregationBucket {
    pub period: String,
    values: HashMap<FieldKind, Vec<f64>>,
}

impl AggregationBucket {
    pub fn new(period: String) -> Self {
        Self {
            period,
            values: HashMap::new(),
        }
    }

    pub fn push(&mut self, kind: FieldKind, value: f64) {
        self.values.entry(kind).or_default().push(value);
    }

    pub fn values(&self, kind: FieldKind) -> &[f64] {
        self.values.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One number per measured field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FieldSummary {
    pub ph: f64,
    pub turbidity: f64,
    pub chlorine: f64,
    pub water_level: f64,
}

impl FieldSummary {
    pub fn get(&self, kind: FieldKind) -> f64 {
        match kind {
            FieldKind::Ph => self.ph,
            FieldKind::Turbidity => self.turbidity,
            FieldKind::Chlorine => self.chlorine,
            FieldKind::WaterLevel => self.water_level,
        }
    }

    pub fn set(&mut self, kind: FieldKind, value: f64) {
        match kind {
            FieldKind::Ph => self.ph = value,
            FieldKind::Turbidity => self.turbidity = value,
            FieldKind::Chlorine => self.chlorine = value,
            FieldKind::WaterLevel => self.water_level = value,
        }
    }
}

/// Per-field means for one period bucket.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub period: String,
    pub means: FieldSummary,
}

/// Share of chlorine readings per quality band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChlorineDistribution {
    pub ideal: u32,
    pub acceptable: u32,
    pub low: u32,
    pub high: u32,
}

impl ChlorineDistribution {
    /// Shown when no valid chlorine reading exists, so downstream charts
    /// stay populated.
    pub const FALLBACK: ChlorineDistribution = ChlorineDistribution {
        ideal: 45,
        acceptable: 30,
        low: 15,
        high: 10,
    };
}

/// Batch-level output of one aggregation pass.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodStatistics {
    pub granularity: Granularity,
    pub periods: Vec<PeriodSummary>,
    pub means: FieldSummary,
    pub trends: FieldSummary,
    pub chlorine_distribution: ChlorineDistribution,
}
