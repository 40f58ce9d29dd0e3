// Window selection domain model
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowSelection {
    /// The most recent `count` readings, whatever their age.
    Latest { count: u32 },
    /// The last `days` days up to now.
    Preset { days: u32 },
    /// Whole calendar days from `start` through `end`.
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Default for WindowSelection {
    fn default() -> Self {
        WindowSelection::Latest { count: 24 }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window must cover at least one {0}")]
    Empty(&'static str),
    #[error("custom window starts on {start} after it ends on {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
    #[error("a {days}-day window reaches before the earliest representable time")]
    OutOfRange { days: u32 },
}

/// How a selection is requested from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    Page { limit: u32, page: u32 },
    Range { start: DateTime<Utc>, end: DateTime<Utc> },
}

impl WindowSelection {
    pub fn validate(&self) -> Result<(), WindowError> {
        match *self {
            WindowSelection::Latest { count: 0 } => Err(WindowError::Empty("reading")),
            WindowSelection::Preset { days: 0 } => Err(WindowError::Empty("day")),
            WindowSelection::Custom { start, end } if start > end => {
                Err(WindowError::Inverted { start, end })
            }
            _ => Ok(()),
        }
    }

    pub fn request(&self, now: DateTime<Utc>) -> Result<WindowRequest, WindowError> {
        let request = match *self {
            WindowSelection::Latest { count } => WindowRequest::Page { limit: count, page: 1 },
            WindowSelection::Preset { days } => {
                let (start, end) = preset_range(days, now).ok_or(WindowError::OutOfRange { days })?;
                WindowRequest::Range { start, end }
            }
            WindowSelection::Custom { start, end } => WindowRequest::Range {
                start: start.and_time(NaiveTime::MIN).and_utc(),
                end: end.and_hms_opt(23, 59, 59).unwrap_or_default().and_utc(),
            },
        };
        Ok(request)
    }
}

/// `[now - days, now]`, or `None` when the start is not representable.
pub fn preset_range(days: u32, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let span = TimeDelta::try_days(i64::from(days))?;
    let start = now.checked_sub_signed(span)?;
    Some((start, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_preset_request_spans_days_back_from_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let request = WindowSelection::Preset { days: 7 }.request(now);

        assert_eq!(
            request,
            Ok(WindowRequest::Range {
                start: Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap(),
                end: now,
            })
        );
    }

    #[test]
    fn test_custom_request_covers_whole_days() {
        let now = Utc::now();
        let selection = WindowSelection::Custom {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        };

        assert_eq!(
            selection.request(now),
            Ok(WindowRequest::Range {
                start: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2025, 1, 3, 23, 59, 59).unwrap(),
            })
        );
    }

    #[test]
    fn test_latest_requests_first_page() {
        let request = WindowSelection::default().request(Utc::now());
        assert_eq!(request, Ok(WindowRequest::Page { limit: 24, page: 1 }));
    }

    #[test]
    fn test_huge_preset_is_out_of_range() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let selection = WindowSelection::Preset { days: 4_000_000_000 };

        assert_eq!(
            selection.request(now),
            Err(WindowError::OutOfRange { days: 4_000_000_000 })
        );
        assert!(preset_range(u32::MAX, now).is_none());
        assert!(preset_range(365, now).is_some());
    }

    #[test]
    fn test_validate() {
        assert!(WindowSelection::Preset { days: 1 }.validate().is_ok());
        assert_eq!(
            WindowSelection::Preset { days: 0 }.validate(),
            Err(WindowError::Empty("day"))
        );
        assert_eq!(
            WindowSelection::Latest { count: 0 }.validate(),
            Err(WindowError::Empty("reading"))
        );

        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            WindowSelection::Custom { start, end }.validate(),
            Err(WindowError::Inverted { start, end })
        );
    }

    #[test]
    fn test_deserialize_tagged_selection() {
        let selection: WindowSelection =
            serde_json::from_str(r#"{"kind":"preset","days":30}"#).unwrap();
        assert_eq!(selection, WindowSelection::Preset { days: 30 });

        let selection: WindowSelection =
            serde_json::from_str(r#"{"kind":"custom","start":"2025-01-01","end":"2025-01-31"}"#)
                .unwrap();
        assert!(matches!(selection, WindowSelection::Custom { .. }));
    }
}
