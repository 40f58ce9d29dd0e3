// Display time normalization
use chrono::{DateTime, Duration, Utc};

/// Shifts source timestamps (recorded as UTC) into local display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeNormalizer {
    offset: Duration,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::from_hours(-5)
    }
}

impl TimeNormalizer {
    pub fn new(offset: Duration) -> Self {
        Self { offset }
    }

    pub fn from_hours(hours: i64) -> Self {
        Self::new(Duration::hours(hours))
    }

    pub fn to_display_time(&self, raw: DateTime<Utc>) -> DateTime<Utc> {
        raw + self.offset
    }
}
