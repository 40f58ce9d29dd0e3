// UV reading domain models and risk classification
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Background shown when there is no current reading to classify.
pub const DEFAULT_COLOR: &str = "#f5f5f5";
pub const DEFAULT_CARD_CLASS: &str = "uv-level-default";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBand {
    pub name: &'static str,
    pub min_inclusive: f64,
    /// `None` means the band is open-ended.
    pub max_inclusive: Option<f64>,
    pub color: &'static str,
    pub recommendation: &'static str,
    pub emoji: &'static str,
    pub card_class: &'static str,
}

pub static RISK_BANDS: [RiskBand; 5] = [
    RiskBand {
        name: "Bajo",
        min_inclusive: 0.0,
        max_inclusive: Some(2.0),
        color: "#4CAF50",
        recommendation: "Protector solar opcional",
        emoji: "🟢",
        card_class: "uv-level-low",
    },
    RiskBand {
        name: "Moderado",
        min_inclusive: 3.0,
        max_inclusive: Some(5.0),
        color: "#FFEB3B",
        recommendation: "Usa protector SPF 30+",
        emoji: "🟡",
        card_class: "uv-level-moderate",
    },
    RiskBand {
        name: "Alto",
        min_inclusive: 6.0,
        max_inclusive: Some(7.0),
        color: "#FF9800",
        recommendation: "Usa sombrero y protector SPF 50+",
        emoji: "🟠",
        card_class: "uv-level-high",
    },
    RiskBand {
        name: "Muy Alto",
        min_inclusive: 8.0,
        max_inclusive: Some(10.0),
        color: "#F44336",
        recommendation: "Evita el sol al mediodía",
        emoji: "🔴",
        card_class: "uv-level-veryhigh",
    },
    RiskBand {
        name: "Extremo",
        min_inclusive: 11.0,
        max_inclusive: None,
        color: "#9C27B0",
        recommendation: "Permanece en interiores",
        emoji: "🟣",
        card_class: "uv-level-extreme",
    },
];

/// Map a UV index to its risk band.
///
/// Bands have integer edges, so a fractional value sitting between two bands
/// (e.g. 2.5) belongs to the upper one. Negative values and NaN degrade to the
/// lowest band.
pub fn classify(value: f64) -> &'static RiskBand {
    if value.is_nan() || value < 0.0 {
        return &RISK_BANDS[0];
    }

    RISK_BANDS
        .iter()
        .find(|band| band.max_inclusive.is_none_or(|max| value <= max))
        .unwrap_or(&RISK_BANDS[0])
}

/// Ordered chart palette, lowest band first.
pub fn color_scheme() -> Vec<&'static str> {
    RISK_BANDS.iter().map(|b| b.color).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub display_timestamp: DateTime<Utc>,
    pub value: f64,
    pub band: &'static RiskBand,
}

impl SeriesPoint {
    pub fn new(display_timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            display_timestamp,
            value,
            band: classify(value),
        }
    }
}
