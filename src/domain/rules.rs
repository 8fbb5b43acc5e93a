// Scale-correction rules for wire values
use crate::domain::field::FieldKind;
use std::collections::HashMap;

/// One candidate correction: if the raw value falls inside the trigger
/// range, dividing by `divisor` is assumed to recover the physical value.
#[derive(Debug, Clone, Copy)]
pub struct ScaleStep {
    min: f64,
    max: Option<f64>,
    divisor: f64,
}

impl ScaleStep {
    /// Step triggered by values in the inclusive range `[min, max]`.
    pub fn bounded(min: f64, max: f64, divisor: f64) -> Self {
        Self {
            min,
            max: Some(max),
            divisor,
        }
    }

    /// Step triggered by any value at or above `min`.
    pub fn open(min: f64, divisor: f64) -> Self {
        Self {
            min,
            max: None,
            divisor,
        }
    }

    fn matches(&self, value: f64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }
}

/// Result of applying a rule to a raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corrected {
    /// Canonical-unit value, rounded to 2 decimals.
    pub value: f64,
    /// Divisor that produced it; 1 when the value was already canonical.
    pub divisor: f64,
}

/// Canonical range plus an ordered ladder of candidate divisors.
///
/// The identity rule runs first: a value already inside the canonical range
/// is never divided. Ladder steps are then tried top to bottom and the first
/// trigger-range match wins, so overlapping bands resolve deterministically.
#[derive(Debug, Clone)]
pub struct FieldRule {
    min: f64,
    max: f64,
    steps: Vec<ScaleStep>,
}

impl FieldRule {
    pub fn new(min: f64, max: f64, steps: Vec<ScaleStep>) -> Self {
        Self { min, max, steps }
    }

    pub fn in_canonical_range(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Apply the ladder. `None` means the value fits no known scale.
    pub fn correct(&self, value: f64) -> Option<Corrected> {
        if self.in_canonical_range(value) {
            return Some(Corrected {
                value: round_to(value, 2),
                divisor: 1.0,
            });
        }
        for step in &self.steps {
            if step.matches(value) {
                return Some(Corrected {
                    value: round_to(value / step.divisor, 2),
                    divisor: step.divisor,
                });
            }
        }
        None
    }
}

/// Immutable registry mapping each field to its correction rule.
///
/// The default registry holds the live ladder for the four measured fields;
/// tests can swap in synthetic rules via `with_rule`.
#[derive(Debug, Clone)]
pub struct FieldRules {
    rules: HashMap<FieldKind, FieldRule>,
}

impl FieldRules {
    pub fn get(&self, kind: FieldKind) -> Option<&FieldRule> {
        self.rules.get(&kind)
    }

    pub fn with_rule(mut self, kind: FieldKind, rule: FieldRule) -> Self {
        self.rules.insert(kind, rule);
        self
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        let mut rules = HashMap::new();
        // pH arrives as-is or scaled by 10/100/1000 onto an integer wire
        // format; the x100 band is checked before x1000 so the overlap
        // (1000-1400) resolves to the more common encoding.
        rules.insert(
            FieldKind::Ph,
            FieldRule::new(
                0.0,
                14.0,
                vec![
                    ScaleStep::bounded(100.0, 1400.0, 100.0),
                    ScaleStep::bounded(1000.0, 14000.0, 1000.0),
                    ScaleStep::bounded(15.0, 140.0, 10.0),
                ],
            ),
        );
        rules.insert(
            FieldKind::Turbidity,
            FieldRule::new(
                0.0,
                100.0,
                vec![
                    ScaleStep::bounded(100.0, 10000.0, 100.0),
                    ScaleStep::open(10000.0, 1000.0),
                ],
            ),
        );
        rules.insert(
            FieldKind::Chlorine,
            FieldRule::new(
                0.0,
                5.0,
                vec![
                    ScaleStep::bounded(5.0, 500.0, 100.0),
                    ScaleStep::open(500.0, 1000.0),
                ],
            ),
        );
        rules.insert(
            FieldKind::WaterLevel,
            FieldRule::new(
                0.0,
                200.0,
                vec![
                    ScaleStep::bounded(200.0, 20000.0, 100.0),
                    ScaleStep::open(20000.0, 1000.0),
                ],
            ),
        );
        Self { rules }
    }
}

/// Round to `digits` fractional digits.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(kind: FieldKind) -> FieldRule {
        FieldRules::default().get(kind).unwrap().clone()
    }

    #[test]
    fn test_canonical_values_pass_through() {
        let ph = rule_for(FieldKind::Ph);
        assert_eq!(ph.correct(7.5), Some(Corrected { value: 7.5, divisor: 1.0 }));
        assert_eq!(ph.correct(0.0).unwrap().value, 0.0);
        assert_eq!(ph.correct(14.0).unwrap().value, 14.0);
    }

    #[test]
    fn test_ph_ladder() {
        let ph = rule_for(FieldKind::Ph);
        // Integer wire encodings at x1000, x100 and x10
        assert_eq!(ph.correct(2632.0).unwrap().value, 2.63);
        assert_eq!(ph.correct(750.0).unwrap().value, 7.5);
        assert_eq!(ph.correct(75.0).unwrap().value, 7.5);
    }

    #[test]
    fn test_ph_overlap_resolves_to_first_band() {
        let ph = rule_for(FieldKind::Ph);
        // 1000-1400 matches both the x100 and x1000 bands; x100 is first.
        let corrected = ph.correct(1200.0).unwrap();
        assert_eq!(corrected.divisor, 100.0);
        assert_eq!(corrected.value, 12.0);
    }

    #[test]
    fn test_turbidity_ladder() {
        let turbidity = rule_for(FieldKind::Turbidity);
        assert_eq!(turbidity.correct(1550.0).unwrap().value, 15.5);
        assert_eq!(turbidity.correct(12500.0).unwrap().value, 12.5);
        assert_eq!(turbidity.correct(8.5).unwrap().value, 8.5);
    }

    #[test]
    fn test_chlorine_ladder() {
        let chlorine = rule_for(FieldKind::Chlorine);
        assert_eq!(chlorine.correct(2500.0).unwrap().value, 2.5);
        assert_eq!(chlorine.correct(180.0).unwrap().value, 1.8);
        // Exactly 5 is canonical, not a x100 encoding
        assert_eq!(chlorine.correct(5.0).unwrap().divisor, 1.0);
    }

    #[test]
    fn test_water_level_ladder() {
        let level = rule_for(FieldKind::WaterLevel);
        assert_eq!(level.correct(8550.0).unwrap().value, 85.5);
        assert_eq!(level.correct(25000.0).unwrap().value, 25.0);
        assert_eq!(level.correct(75.5).unwrap().value, 75.5);
    }

    #[test]
    fn test_value_outside_any_scale() {
        let ph = rule_for(FieldKind::Ph);
        assert_eq!(ph.correct(-3.0), None);
        assert_eq!(ph.correct(50000.0), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.632, 2), 2.63);
        assert_eq!(round_to(6.666666, 1), 6.7);
        assert_eq!(round_to(1.005e2, 2), 100.5);
    }
}
