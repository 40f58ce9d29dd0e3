// Availability probe - Which preset windows have any data
use crate::application::uv_repository::UvRepository;
use crate::domain::window::preset_range;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Arc<dyn UvRepository>,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn UvRepository>) -> Self {
        Self { repository }
    }

    /// Query each preset window in turn and record whether it holds readings.
    ///
    /// Any failure marks every preset as available (fail open).
    pub async fn probe(&self, presets: &[u32], now: DateTime<Utc>) -> BTreeMap<u32, bool> {
        let mut availability = BTreeMap::new();

        for &days in presets {
            let Some((start, end)) = preset_range(days, now) else {
                tracing::warn!("Preset {}d reaches past the earliest representable time", days);
                availability.insert(days, false);
                continue;
            };

            match self.repository.fetch_range(start, end).await {
                Ok(readings) => {
                    tracing::debug!("Preset {}d has {} readings", days, readings.len());
                    availability.insert(days, !readings.is_empty());
                }
                Err(e) => {
                    tracing::warn!("Availability probe failed on {}d preset, enabling all: {}", days, e);
                    return presets.iter().map(|&d| (d, true)).collect();
                }
            }
        }

        availability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::uv_repository::stub::StubRepository;
    use crate::application::uv_repository::FetchError;
    use crate::domain::uv::Reading;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_probe_marks_empty_windows() {
        let repo = Arc::new(StubRepository::default());
        repo.push_range(Ok(Vec::new()));
        repo.push_range(Ok(vec![Reading::new(now() - Duration::days(3), 4.0)]));
        repo.push_range(Ok(vec![Reading::new(now() - Duration::days(3), 4.0)]));

        let service = AvailabilityService::new(repo.clone());
        let result = service.probe(&[1, 7, 30], now()).await;

        assert_eq!(result, BTreeMap::from([(1, false), (7, true), (30, true)]));

        let calls = repo.range_calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], (now() - Duration::days(7), now()));
    }

    #[tokio::test]
    async fn test_probe_fails_open_when_every_query_fails() {
        let repo = Arc::new(StubRepository::default());
        for _ in 0..3 {
            repo.push_range(Err(FetchError::Transport("connection refused".into())));
        }

        let service = AvailabilityService::new(repo);
        let result = service.probe(&[1, 7, 30], now()).await;

        assert_eq!(result, BTreeMap::from([(1, true), (7, true), (30, true)]));
    }

    #[tokio::test]
    async fn test_probe_fails_open_on_partial_failure() {
        let repo = Arc::new(StubRepository::default());
        repo.push_range(Ok(Vec::new()));
        repo.push_range(Err(FetchError::NotFound("/uv/filter".into())));

        let service = AvailabilityService::new(repo);
        let result = service.probe(&[1, 7, 30], now()).await;

        assert!(result.values().all(|&available| available));
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_unrepresentable_preset_is_unavailable() {
        let repo = Arc::new(StubRepository::default());
        repo.push_range(Ok(vec![Reading::new(now() - Duration::days(3), 4.0)]));

        let service = AvailabilityService::new(repo.clone());
        let result = service.probe(&[7, u32::MAX], now()).await;

        assert_eq!(result, BTreeMap::from([(7, true), (u32::MAX, false)]));
        assert_eq!(repo.range_calls.lock().unwrap().len(), 1);
    }
}
