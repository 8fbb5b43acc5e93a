// Diagnostics reporter - Use case for quantifying scale drift in a raw batch
use crate::application::normalizer::Normalizer;
use crate::domain::field::FieldKind;
use crate::domain::reading::{coerce_numeric, RawReading};
use crate::domain::report::DiagnosticReport;

/// Reports how many raw values sat outside their canonical range, without
/// mutating anything. Runs alongside normalization, never instead of it.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsReporter {
    normalizer: Normalizer,
}

impl DiagnosticsReporter {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn diagnose(&self, raws: &[RawReading]) -> DiagnosticReport {
        let mut report = DiagnosticReport {
            total: raws.len(),
            ..DiagnosticReport::default()
        };

        for raw in raws {
            for kind in FieldKind::ALL {
                let Some(wire) = raw.field(kind) else {
                    continue;
                };
                let Some(value) = coerce_numeric(wire) else {
                    continue;
                };
                let Some(rule) = self.normalizer.rules().get(kind) else {
                    continue;
                };
                if !rule.in_canonical_range(value) {
                    report.record_out_of_range(kind);
                    let corrected = self.normalizer.normalize_field(kind, wire);
                    report.push_example(kind, value, corrected);
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::MAX_EXAMPLES;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawReading {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_out_of_range_ph_is_counted_with_example() {
        let reporter = DiagnosticsReporter::default();
        let report = reporter.diagnose(&[raw(json!({ "ph": 2632 }))]);

        assert_eq!(report.total, 1);
        assert_eq!(report.ph_out_of_range, 1);
        assert_eq!(report.turbidity_out_of_range, 0);
        assert_eq!(report.examples.len(), 1);
        assert_eq!(report.examples[0].field, "pH");
        assert_eq!(report.examples[0].original, 2632.0);
        assert_eq!(report.examples[0].corrected, Some(2.63));
    }

    #[test]
    fn test_in_range_and_absent_fields_contribute_nothing() {
        let reporter = DiagnosticsReporter::default();
        let batch = vec![
            raw(json!({ "ph": 7.5, "cloro": 2.5 })),
            raw(json!({ "nome": "sensor-1" })),
            raw(json!({ "ph": null, "turbidez": "" })),
        ];
        let report = reporter.diagnose(&batch);

        assert_eq!(report.total, 3);
        assert_eq!(report.corrections(), 0);
        assert!(report.examples.is_empty());
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let reporter = DiagnosticsReporter::default();
        let report = reporter.diagnose(&[raw(json!({ "cloro": "180" }))]);
        assert_eq!(report.chlorine_out_of_range, 1);
        assert_eq!(report.examples[0].corrected, Some(1.8));
    }

    #[test]
    fn test_example_list_is_capped() {
        let reporter = DiagnosticsReporter::default();
        let batch: Vec<RawReading> = (0..10)
            .map(|i| raw(json!({ "ph": 750 + i, "cloro": 180 })))
            .collect();
        let report = reporter.diagnose(&batch);

        assert_eq!(report.ph_out_of_range, 10);
        assert_eq!(report.chlorine_out_of_range, 10);
        assert_eq!(report.examples.len(), MAX_EXAMPLES);
        // First-found ordering: the first record's fields lead the list
        assert_eq!(report.examples[0].original, 750.0);
    }

    #[test]
    fn test_unrecoverable_value_keeps_none_example() {
        let reporter = DiagnosticsReporter::default();
        let report = reporter.diagnose(&[raw(json!({ "ph": 50000 }))]);
        assert_eq!(report.ph_out_of_range, 1);
        assert_eq!(report.examples[0].corrected, None);
    }
}
