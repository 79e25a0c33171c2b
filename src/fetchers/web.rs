use crate::config::BrochureConfig;
use crate::error::{BrochureError, Result};
use crate::fetchers::PageFetcher;
use crate::parsers::Parser;
use crate::results::{FetchedPage, MISSING_TITLE};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::{Duration, Instant};

/// Fetches pages over plain HTTP GET with a browser-like User-Agent
#[derive(Debug, Clone)]
pub struct WebFetcher {
    client: reqwest::Client,
}

impl WebFetcher {
    /// Build a fetcher using the timeout and User-Agent from `config`
    pub fn new(config: &BrochureConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                BrochureError::Config(format!("invalid user agent: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    async fn try_fetch(&self, url: &str) -> Result<FetchedPage> {
        let started = Instant::now();

        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        let parsed = Parser::parse_from_url(&html, url);
        ::log::info!("Found {} links in {}", parsed.links.len(), url);
        ::log::debug!(
            "Fetched {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );

        Ok(FetchedPage::new(
            url.to_string(),
            parsed.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
            parsed.content,
            parsed.links,
        ))
    }
}

impl PageFetcher for WebFetcher {
    async fn fetch(&self, url: &str) -> FetchedPage {
        ::log::debug!("FETCH: {}", url);
        match self.try_fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                ::log::warn!("Error fetching {}: {}", url, e);
                FetchedPage::failed(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> WebFetcher {
        WebFetcher::new(&BrochureConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", BrochureConfig::default().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r##"<html><head><title>Acme</title></head>
                <body><p>Hello</p><a href="/about">About</a><a href="#x">x</a></body></html>"##,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/", server.uri());
        let page = fetcher().fetch(&url).await;

        assert_eq!(page.url, url);
        assert_eq!(page.title, "Acme");
        assert_eq!(page.text, "Hello\nAbout\nx");
        assert_eq!(page.links, vec![format!("{}/about", server.uri())]);
        assert!(!page.is_error());
    }

    #[tokio::test]
    async fn test_fetch_without_title_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>Body only</p>"))
            .mount(&server)
            .await;

        let page = fetcher().fetch(&server.uri()).await;
        assert_eq!(page.title, "No title found");
        assert_eq!(page.text, "Body only");
        assert!(page.links.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_http_error_yields_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not here</p>"))
            .mount(&server)
            .await;

        let page = fetcher().fetch(&format!("{}/missing", server.uri())).await;
        assert!(page.is_error());
        assert_eq!(page.title, "Error");
        assert!(page.text.is_empty());
        assert!(page.links.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_timeout_yields_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<p>slow</p>")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = BrochureConfig {
            fetch_timeout_secs: 1,
            ..BrochureConfig::default()
        };
        let page = WebFetcher::new(&config).unwrap().fetch(&server.uri()).await;
        assert!(page.is_error());
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_yields_sentinel() {
        let page = fetcher().fetch("not a url").await;
        assert!(page.is_error());
        assert_eq!(page.url, "not a url");
    }
}
