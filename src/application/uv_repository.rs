// Repository trait for UV reading access
use crate::domain::uv::Reading;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connectivity loss or server unreachable
    #[error("UV data source unreachable: {0}")]
    Transport(String),

    #[error("UV data source route not found: {0}")]
    NotFound(String),

    #[error("UV data source answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode UV data source response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Message shown to the user in place of the failed data.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "Servidor no disponible. Verifica tu conexión.",
            FetchError::NotFound(_) => "Endpoint no encontrado.",
            _ => "Error al comunicarse con el servidor",
        }
    }
}

#[async_trait]
pub trait UvRepository: Send + Sync {
    /// Most recent reading
    async fn fetch_latest(&self) -> Result<Reading, FetchError>;

    /// Readings between `start` and `end`. An empty list is a valid answer.
    async fn fetch_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reading>, FetchError>;

    /// One page of the most recent readings, newest first
    async fn fetch_page(&self, limit: u32, page: u32) -> Result<Vec<Reading>, FetchError>;
}
