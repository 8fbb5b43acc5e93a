// Diagnostic report domain model
use crate::domain::field::FieldKind;
use serde::Serialize;

/// Maximum number of correction examples kept across all fields.
pub const MAX_EXAMPLES: usize = 5;

/// One out-of-range value paired with what normalization makes of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionExample {
    pub field: &'static str,
    pub original: f64,
    pub corrected: Option<f64>,
}

/// How much of a raw batch required scale correction.
///
/// Recomputed fresh per batch, purely for observability; it never gates the
/// normalized output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticReport {
    pub total: usize,
    pub ph_out_of_range: usize,
    pub turbidity_out_of_range: usize,
    pub chlorine_out_of_range: usize,
    pub water_level_out_of_range: usize,
    pub examples: Vec<CorrectionExample>,
}

impl DiagnosticReport {
    pub fn out_of_range(&self, kind: FieldKind) -> usize {
        match kind {
            FieldKind::Ph => self.ph_out_of_range,
            FieldKind::Turbidity => self.turbidity_out_of_range,
            FieldKind::Chlorine => self.chlorine_out_of_range,
            FieldKind::WaterLevel => self.water_level_out_of_range,
        }
    }

    pub fn record_out_of_range(&mut self, kind: FieldKind) {
        match kind {
            FieldKind::Ph => self.ph_out_of_range += 1,
            FieldKind::Turbidity => self.turbidity_out_of_range += 1,
            FieldKind::Chlorine => self.chlorine_out_of_range += 1,
            FieldKind::WaterLevel => self.water_level_out_of_range += 1,
        }
    }

    /// Total out-of-range observations across all fields.
    pub fn corrections(&self) -> usize {
        FieldKind::ALL.iter().map(|&f| self.out_of_range(f)).sum()
    }

    pub fn push_example(&mut self, kind: FieldKind, original: f64, corrected: Option<f64>) {
        if self.examples.len() < MAX_EXAMPLES {
            self.examples.push(CorrectionExample {
                field: kind.label(),
                original,
                corrected,
            });
        }
    }
}
