use crate::config::ScraperConfig;
use crate::error::{FetchError, StoreError};
use crate::extract::Extractor;
use crate::fetchers::{Fetcher, HttpTransport, ReqwestTransport};
use crate::refine;
use crate::results::{ExtractionResult, RefinedRecord};
use crate::store::{RecordStore, StoredRecord};

/// Fetch → extract → refine for one URL at a time.
///
/// Holds no per-request state, so one `Scraper` can serve concurrent requests.
pub struct Scraper<T = ReqwestTransport> {
    fetcher: Fetcher<T>,
}

impl Scraper<ReqwestTransport> {
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(&config.fetch)?,
        })
    }
}

impl<T: HttpTransport> Scraper<T> {
    /// Use a custom HTTP transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            fetcher: Fetcher::with_transport(transport),
        }
    }

    /// Fetch and extract a page without persisting anything
    pub async fn scrape(&self, raw_url: &str) -> Result<ExtractionResult, FetchError> {
        let fetched = self.fetcher.fetch(raw_url).await?;
        Ok(Extractor::extract(&fetched.html, &fetched.final_url))
    }

    /// Fetch, extract and refine. `Ok(None)` means the extraction was not refinable.
    pub async fn scrape_refined(&self, raw_url: &str) -> Result<Option<RefinedRecord>, FetchError> {
        let extraction = self.scrape(raw_url).await?;
        Ok(refine::refine(&extraction))
    }
}

/// Refine `extraction` and persist it for `owner`.
///
/// `Ok(None)` when the extraction is rejected by the refiner; store errors such
/// as a duplicate url are returned unchanged and not retried.
pub async fn save<S: RecordStore + ?Sized>(
    store: &S,
    extraction: &ExtractionResult,
    owner: &str,
) -> Result<Option<StoredRecord>, StoreError> {
    let Some(record) = refine::refine(extraction) else {
        return Ok(None);
    };
    store.create(record, owner).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::TransportResponse;
    use crate::normalize::NormalizedUrl;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct StaticPage(&'static str);

    #[async_trait]
    impl HttpTransport for StaticPage {
        async fn get(&self, url: &NormalizedUrl) -> Result<TransportResponse, FetchError> {
            Ok(TransportResponse {
                final_url: url.to_string(),
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn get(&self, _url: &NormalizedUrl) -> Result<TransportResponse, FetchError> {
            Err(FetchError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_scrape_and_refine() {
        let scraper = Scraper::with_transport(StaticPage(
            r#"<title>Hi</title><meta property="og:description" content="OG desc"><a href="/x">x</a>"#,
        ));
        let extraction = scraper.scrape("example.com").await.unwrap();
        assert_eq!(extraction.url, "https://example.com");
        assert_eq!(extraction.title, "Hi");
        assert_eq!(extraction.description, "OG desc");
        assert_eq!(extraction.links[0].href, "https://example.com/x");

        let record = scraper.scrape_refined("example.com").await.unwrap().unwrap();
        assert_eq!(record.metadata.og_description.as_deref(), Some("OG desc"));
        assert_eq!(record.important_links.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_aborts() {
        let scraper = Scraper::with_transport(Unreachable);
        let err = scraper.scrape("example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[tokio::test]
    async fn test_save() {
        let store = MemoryStore::new();
        let scraper = Scraper::with_transport(StaticPage("<title>Saved</title>"));
        let extraction = scraper.scrape("example.com/page").await.unwrap();

        let stored = save(&store, &extraction, "owner-1").await.unwrap().unwrap();
        assert_eq!(stored.record.title, "Saved");
        assert_eq!(stored.scraped_by, "owner-1");

        let again = save(&store, &extraction, "owner-2").await;
        assert!(matches!(again, Err(StoreError::Conflict { .. })));

        let rejected = save(&store, &ExtractionResult::default(), "owner-1").await;
        assert_eq!(rejected, Ok(None));
    }
}
