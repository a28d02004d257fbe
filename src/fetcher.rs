use crate::error::FetchError;
use crate::http_client::build_http_client;
use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, Response};
use url::Url;

/// Default endpoint of the scraping proxy
pub const SCRAPER_API_ENDPOINT: &str = "http://api.scraperapi.com";

/// Anything that can turn a URL into the HTML served at it.
///
/// Any failure, including a non-success status, is reported as a
/// [`FetchError`]; the crawler logs it and moves on.
pub trait PageFetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// Fetches pages directly from the site
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        async move {
            let response = self.client.get(url).send().await?;
            read_html(url, response).await
        }
        .boxed()
    }
}

/// Fetches pages through a ScraperAPI-style proxy: `GET {endpoint}?api_key=..&url=..`
pub struct ScraperApiFetcher {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ScraperApiFetcher {
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            api_key: api_key.into(),
            endpoint: SCRAPER_API_ENDPOINT.to_string(),
        })
    }

    /// Points the fetcher at another proxy endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The proxy URL that fetches `target`
    pub fn proxy_url(&self, target: &str) -> Result<Url, FetchError> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[("api_key", self.api_key.as_str()), ("url", target)],
        )?;
        Ok(url)
    }
}

impl PageFetcher for ScraperApiFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        async move {
            let proxy_url = self.proxy_url(url)?;
            let response = self.client.get(proxy_url).send().await?;
            read_html(url, response).await
        }
        .boxed()
    }
}

async fn read_html(url: &str, response: Response) -> Result<String, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    if let Some(content_type) = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        let ct_lower = content_type.to_lowercase();
        if !ct_lower.contains("text/html") && !ct_lower.contains("application/xhtml") {
            tracing::warn!(
                url = %url,
                content_type = %content_type,
                "Non-HTML content type detected, parsing may fail"
            );
        }
    }

    Ok(response.text().await?)
}
