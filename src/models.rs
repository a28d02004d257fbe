use serde::{Deserialize, Serialize};

/// A page waiting to be checked, with its click-depth from the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub url: String,
    pub depth: usize,
}

/// One URL discovered (enqueued) during a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlLogEntry {
    pub url: String,
    pub depth: usize,
}

/// Where one requested target ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResult {
    /// The target exactly as the caller supplied it
    pub url: String,
    /// Click-depth, `None` when the target was not found
    pub depth: Option<usize>,
    pub is_problematic: bool,
}

impl TargetResult {
    pub fn new(url: String, depth: Option<usize>, threshold: usize) -> Self {
        let is_problematic = depth.is_none_or(|d| d > threshold);
        Self {
            url,
            depth,
            is_problematic,
        }
    }

    pub fn is_found(&self) -> bool {
        self.depth.is_some()
    }
}

/// Why the crawl loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    QueueExhausted,
    BudgetExhausted,
    AllTargetsFound,
}

/// Everything a single crawl produces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOutcome {
    pub results: Vec<TargetResult>,
    pub crawl_log: Vec<CrawlLogEntry>,
    pub activity_log: Vec<String>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}

/// The report handed to storage or printed to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDepthReport {
    pub root_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub timestamp: String,
    pub summary: ReportSummary,
    pub results: Vec<TargetResult>,
    pub crawl_log: Vec<CrawlLogEntry>,
    pub activity_log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_targets: usize,
    pub found_targets: usize,
    pub problematic_targets: usize,
    pub pages_fetched: usize,
    pub urls_discovered: usize,
    pub stop_reason: StopReason,
}
