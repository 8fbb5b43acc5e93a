// Measured field kinds
use serde::Serialize;

/// The four measured water-quality fields carried by a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Ph,
    Turbidity,
    Chlorine,
    WaterLevel,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Ph,
        FieldKind::Turbidity,
        FieldKind::Chlorine,
        FieldKind::WaterLevel,
    ];

    /// Key under which the field arrives on the wire.
    pub fn wire_key(self) -> &'static str {
        match self {
            FieldKind::Ph => "ph",
            FieldKind::Turbidity => "turbidez",
            FieldKind::Chlorine => "cloro",
            FieldKind::WaterLevel => "nivel_agua",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Ph => "pH",
            FieldKind::Turbidity => "turbidity",
            FieldKind::Chlorine => "chlorine",
            FieldKind::WaterLevel => "water level",
        }
    }
}
