use crate::error::CrawlError;
use crate::fetcher::PageFetcher;
use crate::links::{LinkFilter, ScopePolicy, extract_hrefs, scope_for};
use crate::models::{CrawlLogEntry, CrawlOutcome, QueueEntry, StopReason, TargetResult};
use crate::normalizer::normalize_url;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashMap, HashSet, VecDeque};
use url::Url;

/// Pages fetched before the crawl gives up
pub const DEFAULT_MAX_PAGES: usize = 30;

/// Depth above which a found target is flagged when no depth cap is set
pub const DEFAULT_PROBLEM_THRESHOLD: usize = 3;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Page budget: the crawl never fetches more pages than this
    pub max_pages: usize,
    /// Nodes deeper than this are checked against the targets but never fetched
    pub max_depth: Option<usize>,
    /// Found targets deeper than this are problematic. Falls back to
    /// `max_depth`, then [`DEFAULT_PROBLEM_THRESHOLD`].
    pub problem_threshold: Option<usize>,
    pub scope: ScopePolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: None,
            problem_threshold: None,
            scope: ScopePolicy::default(),
        }
    }
}

impl CrawlerConfig {
    pub fn threshold(&self) -> usize {
        self.problem_threshold
            .or(self.max_depth)
            .unwrap_or(DEFAULT_PROBLEM_THRESHOLD)
    }
}

/// Traversal state owned by a single crawl
struct CrawlContext {
    queue: VecDeque<QueueEntry>,
    visited: HashSet<String>,
    wanted: HashSet<String>,
    found: HashMap<String, usize>,
    crawl_log: Vec<CrawlLogEntry>,
    activity_log: Vec<String>,
    pages_fetched: usize,
}

impl CrawlContext {
    fn new(root: String, wanted: HashSet<String>) -> Self {
        let mut ctx = Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            wanted,
            found: HashMap::new(),
            crawl_log: Vec::new(),
            activity_log: Vec::new(),
            pages_fetched: 0,
        };
        ctx.enqueue(root, 0);
        ctx
    }

    fn enqueue(&mut self, url: String, depth: usize) {
        if !self.visited.insert(url.clone()) {
            return;
        }
        self.crawl_log.push(CrawlLogEntry {
            url: url.clone(),
            depth,
        });
        self.queue.push_back(QueueEntry { url, depth });
    }

    /// Records the entry's depth if it is still wanted. Returns true on a hit.
    fn check_target(&mut self, entry: &QueueEntry) -> bool {
        if !self.wanted.remove(&entry.url) {
            return false;
        }
        // BFS order makes the first hit the shallowest
        self.found.entry(entry.url.clone()).or_insert(entry.depth);
        true
    }
}

pub struct Crawler {
    fetcher: Box<dyn PageFetcher>,
    config: CrawlerConfig,
    progress_bar: Option<ProgressBar>,
}

impl Crawler {
    pub fn new(fetcher: Box<dyn PageFetcher>, config: CrawlerConfig) -> Self {
        Self {
            fetcher,
            config,
            progress_bar: None,
        }
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Enable progress bar for crawling
    pub fn enable_progress_bar(&mut self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} Fetched: {pos} pages")
                .expect("Progress bar template should be valid"),
        );
        self.progress_bar = Some(pb);
    }

    /// Crawls breadth-first from `root_url` looking for `target_urls` and
    /// reports the click-depth of each target.
    ///
    /// Only bad input is an error. Fetch failures, malformed links and an
    /// exhausted page budget all end up in the returned outcome.
    pub async fn crawl(
        &self,
        root_url: &str,
        target_urls: &[String],
    ) -> Result<CrawlOutcome, CrawlError> {
        let root_url = root_url.trim();
        if root_url.is_empty() {
            return Err(CrawlError::MissingRootUrl);
        }
        if target_urls.iter().all(|t| t.trim().is_empty()) {
            return Err(CrawlError::NoTargets);
        }

        let root = Url::parse(root_url).map_err(|source| CrawlError::InvalidRootUrl {
            url: root_url.to_string(),
            source,
        })?;
        match root.scheme() {
            "http" | "https" => {}
            scheme => return Err(CrawlError::UnsupportedScheme(scheme.to_string())),
        }

        let scope = scope_for(root_url, self.config.scope).map_err(|source| {
            CrawlError::InvalidRootUrl {
                url: root_url.to_string(),
                source,
            }
        })?;
        let filter = LinkFilter::new(scope);
        let root_key = filter.scope().prefix().to_string();

        let mut wanted = HashSet::new();
        for target in target_urls.iter().filter(|t| !t.trim().is_empty()) {
            match normalize_url(target, &root) {
                Ok(normalized) => {
                    wanted.insert(normalized);
                }
                Err(e) => {
                    tracing::warn!(url = %target, error = %e, "Ignoring unparseable target URL");
                }
            }
        }
        if wanted.is_empty() {
            return Err(CrawlError::NoUsableTargets);
        }

        let mut ctx = CrawlContext::new(root_key, wanted);
        ctx.activity_log
            .push(format!("Starting crawl from {}", root_url));
        ctx.activity_log
            .push(format!("Looking for {} key URLs", ctx.wanted.len()));
        tracing::info!(
            root = %root_url,
            targets = ctx.wanted.len(),
            max_pages = self.config.max_pages,
            max_depth = ?self.config.max_depth,
            "Starting crawl"
        );

        if let Some(ref pb) = self.progress_bar {
            pb.set_position(0);
        }

        let stop_reason = self.run(&mut ctx, &filter, root_url, &root).await;

        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("Fetched {} pages", ctx.pages_fetched));
        }

        match stop_reason {
            StopReason::AllTargetsFound => {
                ctx.activity_log.push("All key URLs were found".to_string());
            }
            StopReason::BudgetExhausted => {
                ctx.activity_log.push(format!(
                    "Crawl limit ({} pages) reached",
                    self.config.max_pages
                ));
            }
            StopReason::QueueExhausted => {
                ctx.activity_log
                    .push("No more pages to crawl".to_string());
            }
        }
        tracing::info!(
            pages_fetched = ctx.pages_fetched,
            discovered = ctx.crawl_log.len(),
            reason = ?stop_reason,
            "Crawl finished"
        );

        let threshold = self.config.threshold();
        let results = target_urls
            .iter()
            .map(|original| {
                let depth = normalize_url(original, &root)
                    .ok()
                    .and_then(|normalized| ctx.found.get(&normalized).copied());
                TargetResult::new(original.clone(), depth, threshold)
            })
            .collect();

        Ok(CrawlOutcome {
            results,
            crawl_log: ctx.crawl_log,
            activity_log: ctx.activity_log,
            pages_fetched: ctx.pages_fetched,
            stop_reason,
        })
    }

    /// `root_url` and `root` are the root as given. It is fetched and its links
    /// resolved against that form, since normalizing `/blog/` to `/blog` would
    /// move relative links up a directory.
    async fn run(
        &self,
        ctx: &mut CrawlContext,
        filter: &LinkFilter,
        root_url: &str,
        root: &Url,
    ) -> StopReason {
        loop {
            if ctx.wanted.is_empty() {
                return StopReason::AllTargetsFound;
            }
            if ctx.pages_fetched >= self.config.max_pages {
                return StopReason::BudgetExhausted;
            }
            let Some(entry) = ctx.queue.pop_front() else {
                return StopReason::QueueExhausted;
            };

            if ctx.check_target(&entry) {
                tracing::info!(url = %entry.url, depth = entry.depth, "Found key URL");
                ctx.activity_log.push(format!(
                    "Key URL found: {} at {} clicks",
                    entry.url, entry.depth
                ));
                if ctx.wanted.is_empty() {
                    return StopReason::AllTargetsFound;
                }
            }

            if let Some(max_depth) = self.config.max_depth
                && entry.depth > max_depth
            {
                tracing::debug!(url = %entry.url, depth = entry.depth, "Beyond depth cap, not expanding");
                continue;
            }

            let (fetch_url, page_url) = if entry.depth == 0 {
                (root_url, root.clone())
            } else {
                match Url::parse(&entry.url) {
                    Ok(url) => (entry.url.as_str(), url),
                    Err(e) => {
                        tracing::warn!(url = %entry.url, error = %e, "Queued URL no longer parses");
                        continue;
                    }
                }
            };

            ctx.pages_fetched += 1;
            if let Some(ref pb) = self.progress_bar {
                pb.set_position(ctx.pages_fetched as u64);
            }

            let html = match self.fetcher.fetch(fetch_url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(url = %fetch_url, error = %e, "Failed to fetch page");
                    ctx.activity_log
                        .push(format!("Failed to fetch {}: {}", fetch_url, e));
                    continue;
                }
            };

            let next_depth = entry.depth + 1;
            for href in extract_hrefs(&html) {
                match filter.evaluate(&href, &page_url, &ctx.visited) {
                    Ok(next) => {
                        tracing::debug!(url = %next, depth = next_depth, "Queued link");
                        ctx.enqueue(next, next_depth);
                    }
                    Err(reason) => {
                        tracing::trace!(href = %href, page = %entry.url, reason = %reason, "Skipped link");
                    }
                }
            }
        }
    }
}
