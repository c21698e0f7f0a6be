use async_trait::async_trait;

use crate::error::FetchError;
use crate::normalize::NormalizedUrl;

/// What a transport hands back for a GET after following redirects
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// URL the last response was served from
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

/// Anything that can perform a GET with the configured headers, timeout and
/// redirect policy
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &NormalizedUrl) -> Result<TransportResponse, FetchError>;
}
