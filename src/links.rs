use crate::normalizer::{normalize, normalize_absolute};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::fmt;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("a[href] selector should be valid"));

/// File types that are never HTML pages and are not worth fetching
const NON_HTML_EXTENSIONS: &[&str] = &[
    "pdf", "jpg", "jpeg", "png", "gif", "svg", "zip", "rar", "exe", "mp3", "mp4", "avi",
];

/// Returns the raw `href` value of every anchor in the document, in document order
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Checks if the URL path ends in a known non-HTML file extension
pub fn has_non_html_extension(url: &Url) -> bool {
    let path = url.path().trim_end_matches('/');

    let Some(last_segment) = path.rsplit('/').next() else {
        return false;
    };

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => NON_HTML_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// How links are kept inside the crawled site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopePolicy {
    /// The normalized URL must start with the normalized root URL string.
    /// `https://a.com` therefore also admits `https://a.com.evil.com`.
    #[default]
    Prefix,
    /// Same scheme, host and port as the root, and a path under the root
    /// path on a segment boundary.
    SameOrigin,
}

/// The part of the web a crawl is allowed to enter
#[derive(Debug, Clone)]
pub struct CrawlScope {
    root: Url,
    prefix: String,
    policy: ScopePolicy,
}

impl CrawlScope {
    pub fn new(root: Url, policy: ScopePolicy) -> Self {
        let prefix = normalize(root.clone());
        Self {
            root,
            prefix,
            policy,
        }
    }

    /// The normalized root URL string used for prefix checks
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Checks if an already normalized URL falls inside the scope
    pub fn contains(&self, normalized: &str) -> bool {
        match self.policy {
            ScopePolicy::Prefix => normalized.starts_with(&self.prefix),
            ScopePolicy::SameOrigin => {
                let Ok(candidate) = Url::parse(normalized) else {
                    return false;
                };

                if candidate.origin() != self.root.origin() {
                    return false;
                }

                let root_path = self.root.path().trim_end_matches('/');
                let path = candidate.path().trim_end_matches('/');
                root_path.is_empty()
                    || path == root_path
                    || path
                        .strip_prefix(root_path)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Why a discovered link was not queued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRejection {
    Empty,
    FragmentOnly,
    Mailto,
    Tel,
    Malformed(url::ParseError),
    NonHtml,
    OutOfScope,
    AlreadyVisited,
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRejection::Empty => write!(f, "empty href"),
            LinkRejection::FragmentOnly => write!(f, "fragment-only href"),
            LinkRejection::Mailto => write!(f, "mailto link"),
            LinkRejection::Tel => write!(f, "tel link"),
            LinkRejection::Malformed(e) => write!(f, "malformed href: {}", e),
            LinkRejection::NonHtml => write!(f, "non-HTML file"),
            LinkRejection::OutOfScope => write!(f, "outside crawl scope"),
            LinkRejection::AlreadyVisited => write!(f, "already visited"),
        }
    }
}

/// Decides which hyperlinks found on a page are worth crawling
#[derive(Debug, Clone)]
pub struct LinkFilter {
    scope: CrawlScope,
}

impl LinkFilter {
    pub fn new(scope: CrawlScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &CrawlScope {
        &self.scope
    }

    /// Resolves `href` against the page it was found on and returns the
    /// normalized URL to enqueue, or the reason it was dropped.
    pub fn evaluate(
        &self,
        href: &str,
        page_url: &Url,
        visited: &HashSet<String>,
    ) -> Result<String, LinkRejection> {
        let href = href.trim();

        if href.is_empty() {
            return Err(LinkRejection::Empty);
        }
        if href.starts_with('#') {
            return Err(LinkRejection::FragmentOnly);
        }

        let lowered = href.to_ascii_lowercase();
        if lowered.starts_with("mailto:") {
            return Err(LinkRejection::Mailto);
        }
        if lowered.starts_with("tel:") {
            return Err(LinkRejection::Tel);
        }

        let resolved = page_url.join(href).map_err(LinkRejection::Malformed)?;
        if has_non_html_extension(&resolved) {
            return Err(LinkRejection::NonHtml);
        }

        let normalized = normalize(resolved);
        if !self.scope.contains(&normalized) {
            return Err(LinkRejection::OutOfScope);
        }
        if visited.contains(&normalized) {
            return Err(LinkRejection::AlreadyVisited);
        }

        Ok(normalized)
    }
}

/// Builds a scope from a raw root URL string
pub fn scope_for(root_url: &str, policy: ScopePolicy) -> Result<CrawlScope, url::ParseError> {
    let normalized = normalize_absolute(root_url)?;
    Ok(CrawlScope::new(Url::parse(&normalized)?, policy))
}
