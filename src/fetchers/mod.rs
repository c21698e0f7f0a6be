pub mod http;
pub mod transport;

use chrono::Utc;
use std::time::Instant;

pub use http::ReqwestTransport;
pub use transport::{HttpTransport, TransportResponse};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::normalize::{self, NormalizedUrl};
use crate::results::FetchResult;

/// Statuses accepted as a successful fetch
const ACCEPTED_STATUS: std::ops::Range<u16> = 200..400;

/// Normalizes user input and retrieves the page with a single GET.
///
/// There is no retry: a failed attempt is reported as-is and no partial HTML is
/// returned.
pub struct Fetcher<T = ReqwestTransport> {
    transport: T,
}

impl Fetcher<ReqwestTransport> {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: HttpTransport> Fetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch the page named by `raw_input`
    pub async fn fetch(&self, raw_input: &str) -> Result<FetchResult, FetchError> {
        let url = normalize::normalize(raw_input)?;
        let start = Instant::now();
        ::log::info!("Fetching {}", url);

        let response = self.transport.get(&url).await?;
        if !ACCEPTED_STATUS.contains(&response.status) {
            ::log::warn!("Fetch of {} ended with status {}", url, response.status);
            return Err(FetchError::Status {
                status: response.status,
                url: response.final_url,
            });
        }

        let final_url = resolve_final_url(&url, &response.final_url);
        ::log::info!(
            "Fetched {} ({} bytes) in {:.2} seconds",
            final_url,
            response.body.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(FetchResult {
            final_url,
            html: response.body,
            fetched_at: Utc::now(),
        })
    }
}

/// The transport's final URL when it is a usable http(s) URL, else the requested one
fn resolve_final_url(requested: &NormalizedUrl, reported: &str) -> NormalizedUrl {
    let is_http = reported.starts_with("http://") || reported.starts_with("https://");
    match normalize::normalize(reported) {
        Ok(url) if is_http => url,
        _ => requested.clone(),
    }
}
