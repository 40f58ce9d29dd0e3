// JSON view of the dashboard state
use crate::domain::dashboard::{DashboardState, FocusedCondition};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PresetView {
    pub days: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub state: DashboardState,
    pub background_color: &'static str,
    pub card_class: &'static str,
    pub focused: Option<FocusedCondition>,
    pub presets: Vec<PresetView>,
}

impl DashboardView {
    pub fn new(state: DashboardState, presets: &[u32]) -> Self {
        let presets = presets
            .iter()
            .map(|&days| PresetView {
                days,
                enabled: state.availability.is_enabled(days),
            })
            .collect();

        Self {
            background_color: state.background_color(),
            card_class: state.card_class(),
            focused: state.focused(),
            presets,
            state,
        }
    }
}
