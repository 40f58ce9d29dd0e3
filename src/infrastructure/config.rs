use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Shift applied to source timestamps (UTC) for display.
    pub utc_offset_hours: i64,
    pub presets_days: Vec<u32>,
    /// Readings shown by the default "latest" window.
    pub latest_count: u32,
    /// How long hovers are ignored after a click.
    pub suppression_ms: u64,
    pub show_point_markers: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            utc_offset_hours: -5,
            presets_days: vec![1, 7, 30],
            latest_count: 24,
            suppression_ms: 1000,
            show_point_markers: true,
        }
    }
}

impl DisplaySettings {
    pub fn suppression(&self) -> Duration {
        Duration::from_millis(self.suppression_ms)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    /// Interval between background refreshes.
    pub refresh_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            refresh_secs: 60,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Load `config/uv.*` (optional) overlaid with `UV__` environment variables,
/// e.g. `UV__API__BASE_URL`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/uv").required(false))
        .add_source(
            config::Environment::with_prefix("UV")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("display.presets_days"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
