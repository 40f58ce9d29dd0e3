// Windowed UV series aggregation
use super::time::TimeNormalizer;
use super::uv::{Reading, SeriesPoint};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateStats {
    pub max: f64,
    pub min: f64,
    /// Mean of the raw values rounded to one decimal.
    pub average: f64,
}

/// Chartable series plus its stats. `stats` is `None` when the window held
/// no readings, which is a normal outcome rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowSeries {
    pub points: Vec<SeriesPoint>,
    pub stats: Option<AggregateStats>,
}

impl WindowSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sort readings chronologically and classify each one.
///
/// Everything given is aggregated; window sizing happens before the fetch.
pub fn aggregate(readings: &[Reading], normalizer: &TimeNormalizer) -> WindowSeries {
    if readings.is_empty() {
        return WindowSeries::default();
    }

    let mut sorted = readings.to_vec();
    // `sort_by_key` is stable, equal timestamps keep their input order
    sorted.sort_by_key(|r| r.timestamp);

    let points: Vec<SeriesPoint> = sorted
        .iter()
        .map(|r| SeriesPoint::new(normalizer.to_display_time(r.timestamp), r.value))
        .collect();

    WindowSeries {
        stats: Some(compute_stats(&sorted)),
        points,
    }
}

fn compute_stats(readings: &[Reading]) -> AggregateStats {
    let max = readings
        .iter()
        .map(|r| r.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = readings.iter().map(|r| r.value).fold(f64::INFINITY, f64::min);
    let mean = readings.iter().map(|r| r.value).sum::<f64>() / readings.len() as f64;

    AggregateStats {
        max,
        min,
        average: round_one_decimal(mean),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
