// Dashboard view state
use super::caption::{caption, Caption};
use super::interaction::InteractionState;
use super::series::WindowSeries;
use super::time::TimeNormalizer;
use super::uv::{classify, color_scheme, Reading, RiskBand, DEFAULT_CARD_CLASS, DEFAULT_COLOR};
use super::window::WindowSelection;
use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCondition {
    pub value: f64,
    pub display_timestamp: DateTime<Utc>,
    pub band: &'static RiskBand,
    pub caption: Caption,
}

impl CurrentCondition {
    /// The caption's time of day is the reading's own display hour.
    pub fn from_reading(reading: &Reading, normalizer: &TimeNormalizer) -> Self {
        let display_timestamp = normalizer.to_display_time(reading.timestamp);
        Self {
            value: reading.value,
            display_timestamp,
            band: classify(reading.value),
            caption: caption(display_timestamp.hour(), reading.value),
        }
    }
}

/// A chart point the user is pointing at, classified for the summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusedCondition {
    pub value: f64,
    pub band: &'static RiskBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "presets", rename_all = "snake_case")]
pub enum Availability {
    /// Probe still running; every preset counts as enabled.
    Pending,
    Resolved(BTreeMap<u32, bool>),
}

impl Availability {
    pub fn is_enabled(&self, days: u32) -> bool {
        match self {
            Availability::Pending => true,
            Availability::Resolved(presets) => presets.get(&days).copied().unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub series_name: &'static str,
    pub x_axis_label: &'static str,
    pub y_axis_label: &'static str,
    pub auto_scale: bool,
    pub color_scheme: Vec<&'static str>,
    pub show_point_markers: bool,
}

impl ChartOptions {
    pub fn new(show_point_markers: bool) -> Self {
        Self {
            series_name: "Radiación UV",
            x_axis_label: "Fecha/Hora",
            y_axis_label: "Índice UV",
            auto_scale: true,
            color_scheme: color_scheme(),
            show_point_markers,
        }
    }
}

/// Snapshot of everything the presentation layer renders. A new value is
/// published for every update, nothing mutates a published snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub current: Option<CurrentCondition>,
    pub selection: WindowSelection,
    pub series: WindowSeries,
    pub availability: Availability,
    pub interaction: InteractionState,
    pub chart: ChartOptions,
    /// User-facing message from the last failed latest-reading fetch.
    pub current_message: Option<String>,
    /// User-facing message from the last failed series fetch.
    pub series_message: Option<String>,
}

impl DashboardState {
    pub fn new(selection: WindowSelection, show_point_markers: bool) -> Self {
        Self {
            current: None,
            selection,
            series: WindowSeries::default(),
            availability: Availability::Pending,
            interaction: InteractionState::Idle,
            chart: ChartOptions::new(show_point_markers),
            current_message: None,
            series_message: None,
        }
    }

    pub fn background_color(&self) -> &'static str {
        self.current
            .as_ref()
            .map_or(DEFAULT_COLOR, |c| c.band.color)
    }

    pub fn card_class(&self) -> &'static str {
        self.current
            .as_ref()
            .map_or(DEFAULT_CARD_CLASS, |c| c.band.card_class)
    }

    /// The pointed-at chart point, or the current reading when idle.
    pub fn focused(&self) -> Option<FocusedCondition> {
        let value = match self.interaction.point() {
            Some(point) => point.value,
            None => self.current.as_ref()?.value,
        };
        Some(FocusedCondition {
            value,
            band: classify(value),
        })
    }
}
