// Weather-style caption heuristic for the current UV reading
use serde::Serialize;

const HIGH_RADIATION_NOTE: &str = "Radiación UV muy alta, evita la exposición prolongada";
const LOW_RADIATION_NOTE: &str = "Radiación UV baja";
const WARNING_GLYPH: &str = "⚠️";
const LOW_GLYPH: &str = "🌙";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Night,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub text: String,
    pub emoji: String,
}

impl Caption {
    fn new(text: &str, emoji: &str) -> Self {
        Self {
            text: text.to_string(),
            emoji: emoji.to_string(),
        }
    }
}

/// Build a caption from the hour of day (0-23) and the UV index.
///
/// The sky description comes from the time-of-day bucket, then very high or
/// very low readings add a radiation note on top of it.
pub fn caption(hour: u32, value: f64) -> Caption {
    let mut caption = match TimeOfDay::from_hour(hour) {
        TimeOfDay::Morning => {
            if value <= 2.0 {
                Caption::new("Mañana nublada", "☁️")
            } else if value <= 5.0 {
                Caption::new("Mañana parcialmente nublada", "⛅")
            } else {
                Caption::new("Mañana soleada y despejada", "☀️")
            }
        }
        TimeOfDay::Afternoon => {
            if value <= 2.0 {
                Caption::new("Tarde nublada", "☁️")
            } else if value <= 5.0 {
                Caption::new("Tarde parcialmente nublada", "⛅")
            } else if value <= 7.0 {
                Caption::new("Tarde mayormente despejada", "🌤️")
            } else {
                Caption::new("Tarde con cielo completamente despejado", "☀️")
            }
        }
        TimeOfDay::Night => Caption::new("Noche de cielo despejado", "🌌"),
    };

    if value >= 8.0 {
        caption.text = format!("{}. {}", caption.text, HIGH_RADIATION_NOTE);
        caption.emoji = format!("{}{}", WARNING_GLYPH, caption.emoji);
    } else if value <= 1.0 {
        caption.text = format!("{}. {}", caption.text, LOW_RADIATION_NOTE);
        caption.emoji = format!("{}{}", LOW_GLYPH, caption.emoji);
    }

    caption
}
