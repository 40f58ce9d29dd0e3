// HTTP repository implementation for the UV readings API
use crate::application::uv_repository::{FetchError, UvRepository};
use crate::domain::uv::Reading;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpUvRepository {
    client: reqwest::Client,
    base_url: String,
}

/// Reading as sent by the API. Extra fields (ids, metadata) are ignored.
#[derive(Debug, Deserialize)]
struct ApiReading {
    timestamp: DateTime<Utc>,
    value: f64,
}

impl From<ApiReading> for Reading {
    fn from(r: ApiReading) -> Self {
        Reading::new(r.timestamp, r.value)
    }
}

impl HttpUvRepository {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn latest_url(&self) -> String {
        format!("{}/uv/latest", self.base_url)
    }

    fn filter_url(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        let start = start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let end = end.to_rfc3339_opts(SecondsFormat::Secs, true);
        format!(
            "{}/uv/filter?startDate={}&endDate={}",
            self.base_url,
            urlencoding::encode(&start),
            urlencoding::encode(&end)
        )
    }

    fn page_url(&self, limit: u32, page: u32) -> String {
        format!("{}/uv?limit={}&page={}", self.base_url, limit, page)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl UvRepository for HttpUvRepository {
    async fn fetch_latest(&self) -> Result<Reading, FetchError> {
        let reading: ApiReading = self.get_json(&self.latest_url()).await?;
        Ok(reading.into())
    }

    async fn fetch_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reading>, FetchError> {
        let readings: Vec<ApiReading> = self.get_json(&self.filter_url(start, end)).await?;
        tracing::debug!("Range {} .. {} returned {} readings", start, end, readings.len());
        Ok(readings.into_iter().map(Reading::from).collect())
    }

    async fn fetch_page(&self, limit: u32, page: u32) -> Result<Vec<Reading>, FetchError> {
        let readings: Vec<ApiReading> = self.get_json(&self.page_url(limit, page)).await?;
        Ok(readings.into_iter().map(Reading::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repository() -> HttpUvRepository {
        HttpUvRepository::new("http://localhost:3000/api/".to_string(), Duration::from_secs(1))
            .unwrap()
    }

    #[test]
    fn test_urls() {
        let repo = repository();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 8, 12, 30, 0).unwrap();

        assert_eq!(repo.latest_url(), "http://localhost:3000/api/uv/latest");
        assert_eq!(repo.page_url(24, 1), "http://localhost:3000/api/uv?limit=24&page=1");
        assert_eq!(
            repo.filter_url(start, end),
            "http://localhost:3000/api/uv/filter?startDate=2025-06-01T00%3A00%3A00Z&endDate=2025-06-08T12%3A30%3A00Z"
        );
    }

    #[test]
    fn test_parse_api_readings_ignores_extra_fields() {
        let body = r#"[
            {"_id": "665b1", "timestamp": "2025-06-01T17:00:00.000Z", "value": 7.5},
            {"_id": "665b2", "timestamp": "2025-06-01T18:00:00Z", "value": 6}
        ]"#;

        let readings: Vec<Reading> = serde_json::from_str::<Vec<ApiReading>>(body)
            .unwrap()
            .into_iter()
            .map(Reading::from)
            .collect();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].value, 7.5);
        assert_eq!(
            readings[1].timestamp,
            Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap()
        );
    }

    /// Serve `/uv` and `/uv/filter` only, so `/uv/latest` answers 404.
    async fn spawn_api() -> String {
        use axum::{routing::get, Json, Router};

        let page = || async {
            Json(serde_json::json!([
                {"timestamp": "2025-06-01T12:00:00Z", "value": 1.0},
                {"timestamp": "2025-06-01T11:00:00Z", "value": 4.0}
            ]))
        };
        let router = Router::new()
            .route("/uv", get(page))
            .route("/uv/filter", get(|| async { Json(serde_json::json!([])) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_against_live_api() {
        let repo = HttpUvRepository::new(spawn_api().await, Duration::from_secs(5)).unwrap();

        let page = repo.fetch_page(24, 1).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].value, 4.0);

        let now = Utc::now();
        let range = repo.fetch_range(now - chrono::Duration::days(1), now).await.unwrap();
        assert!(range.is_empty());

        let err = repo.fetch_latest().await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
        assert_eq!(err.user_message(), "Endpoint no encontrado.");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is closed on test machines
        let repo = HttpUvRepository::new("http://127.0.0.1:9".to_string(), Duration::from_secs(1))
            .unwrap();

        let err = repo.fetch_latest().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.user_message(), "Servidor no disponible. Verifica tu conexión.");
    }
}
