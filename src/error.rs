use thiserror::Error;

/// Input problems that stop a crawl before it starts
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("a root URL is required")]
    MissingRootUrl,

    #[error("at least one target URL is required")]
    NoTargets,

    #[error("none of the target URLs could be parsed")]
    NoUsableTargets,

    #[error("invalid root URL '{url}': {source}")]
    InvalidRootUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid URL scheme '{0}': only http and https are supported")]
    UnsupportedScheme(String),
}

/// Why a single page could not be fetched. Never fatal to a crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("invalid fetch URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(err)
        }
    }
}
