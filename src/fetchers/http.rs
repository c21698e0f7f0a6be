use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, redirect};

use super::transport::{HttpTransport, TransportResponse};
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::normalize::NormalizedUrl;

/// [`HttpTransport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client that presents itself like a desktop browser
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value("Accept", &config.accept)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("Accept-Language", &config.accept_language)?,
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Client(format!("invalid {} header: {}", name, e)))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &NormalizedUrl) -> Result<TransportResponse, FetchError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        ::log::debug!(
            "GET {} -> {} ({} bytes from {})",
            url,
            status,
            body.len(),
            final_url
        );

        Ok(TransportResponse {
            final_url,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(config: FetchConfig) -> ReqwestTransport {
        ReqwestTransport::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_sends_browser_headers() {
        let server = MockServer::start().await;
        let config = FetchConfig::default().with_user_agent("page-digest-test/1.0");

        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "page-digest-test/1.0"))
            .and(header("accept-language", config.accept_language.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>ok</title>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = normalize(&format!("{}/page", server.uri())).unwrap();
        let response = transport(config).get(&url).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<title>ok</title>");
    }

    #[tokio::test]
    async fn test_follows_redirects_and_reports_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let url = normalize(&format!("{}/old", server.uri())).unwrap();
        let response = transport(FetchConfig::default()).get(&url).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.final_url.ends_with("/new"));
        assert_eq!(response.body, "moved");
    }

    #[tokio::test]
    async fn test_redirect_cap() {
        let server = MockServer::start().await;
        for i in 0..8 {
            Mock::given(method("GET"))
                .and(path(format!("/r{}", i)))
                .respond_with(
                    ResponseTemplate::new(302).insert_header("Location", format!("/r{}", i + 1)),
                )
                .mount(&server)
                .await;
        }

        let url = normalize(&format!("{}/r0", server.uri())).unwrap();
        let err = transport(FetchConfig::default()).get(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::TooManyRedirects(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(2_000)))
            .mount(&server)
            .await;

        let url = normalize(&server.uri()).unwrap();
        let err = transport(FetchConfig::default().with_timeout_ms(100))
            .get(&url)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = normalize(&format!("127.0.0.1:{}", port)).unwrap();
        let err = transport(FetchConfig::default()).get(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
    }

    #[test]
    fn test_invalid_header_config() {
        let config = FetchConfig {
            accept: "bad\nvalue".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(
            ReqwestTransport::new(&config),
            Err(FetchError::Client(_))
        ));
    }
}
