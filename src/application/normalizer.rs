// Normalizer - Use case for recovering canonical-unit values
use crate::domain::field::FieldKind;
use crate::domain::reading::{coerce_numeric, NormalizedReading, RawReading};
use crate::domain::rules::FieldRules;
use serde_json::Value;

/// Maps ambiguous wire encodings onto canonical physical values.
///
/// Pure over its inputs; the rule registry is injected so tests can supply
/// synthetic ladders.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: FieldRules,
}

impl Normalizer {
    pub fn new(rules: FieldRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Recover the canonical value for one field, or `None` when the input
    /// is absent, non-numeric or fits no known scale.
    pub fn normalize_field(&self, kind: FieldKind, raw: &Value) -> Option<f64> {
        let value = coerce_numeric(raw)?;
        let rule = self.rules.get(kind)?;
        match rule.correct(value) {
            Some(corrected) => {
                if corrected.divisor != 1.0 {
                    tracing::debug!(
                        field = kind.label(),
                        original = value,
                        divisor = corrected.divisor,
                        corrected = corrected.value,
                        "scale correction applied"
                    );
                }
                Some(corrected.value)
            }
            None => {
                tracing::warn!(
                    field = kind.label(),
                    original = value,
                    "value outside any known scale"
                );
                None
            }
        }
    }

    /// Normalize the four measured fields of one record, passing every
    /// other key through unchanged.
    pub fn normalize_record(&self, raw: &RawReading) -> NormalizedReading {
        let mut normalized = raw.0.clone();
        for kind in FieldKind::ALL {
            if let Some(value) = raw.field(kind) {
                let replacement = match self.normalize_field(kind, value) {
                    Some(canonical) => Value::from(canonical),
                    None => Value::Null,
                };
                normalized.insert(kind.wire_key().to_string(), replacement);
            }
        }
        NormalizedReading(normalized)
    }

    /// Normalize a whole batch; output order and length match the input.
    pub fn normalize_batch(&self, raws: &[RawReading]) -> Vec<NormalizedReading> {
        raws.iter().map(|raw| self.normalize_record(raw)).collect()
    }
}
