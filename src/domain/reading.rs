// Reading domain models - raw and normalized sensor records
use crate::domain::field::FieldKind;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record exactly as received from the upstream API.
///
/// Kept as an opaque JSON object: devices attach metadata fields we must
/// preserve, and measured fields arrive as numbers, numeric strings or null
/// depending on firmware revision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawReading(pub Map<String, Value>);

/// A reading with the four measured fields replaced by canonical-unit
/// values (2 decimals) or null; every other key passes through unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedReading(pub Map<String, Value>);

impl RawReading {
    pub fn field(&self, kind: FieldKind) -> Option<&Value> {
        self.0.get(kind.wire_key())
    }

    pub fn timestamp_str(&self) -> Option<&str> {
        timestamp_str(&self.0)
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp_str().and_then(parse_timestamp)
    }
}

impl NormalizedReading {
    pub fn field(&self, kind: FieldKind) -> Option<f64> {
        self.0.get(kind.wire_key()).and_then(Value::as_f64)
    }

    pub fn timestamp_str(&self) -> Option<&str> {
        timestamp_str(&self.0)
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp_str().and_then(parse_timestamp)
    }
}

// Devices report the moment of measurement under "timestamp"; older
// firmware used "data".
fn timestamp_str(map: &Map<String, Value>) -> Option<&str> {
    map.get("timestamp")
        .and_then(Value::as_str)
        .or_else(|| map.get("data").and_then(Value::as_str))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    // Some devices omit the offset; treat those as UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

/// Coerce a wire value to a finite number.
///
/// Numbers pass through; strings are trimmed and parsed (empty string is
/// treated as absent); anything else, including null, yields `None`.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
