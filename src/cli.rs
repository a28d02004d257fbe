use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "linkdepth")]
#[command(
    about = "Measure how many clicks key pages sit from a site's root",
    long_about = None
)]
pub struct Cli {
    /// The root URL: where the crawl starts and the prefix every crawled URL must share
    #[arg(value_name = "URL")]
    pub url: String,

    /// A key URL to locate (absolute or root-relative). Repeat for several targets
    #[arg(short, long = "target", value_name = "TARGET")]
    pub targets: Vec<String>,

    /// File with one key URL per line
    #[arg(long, value_name = "FILE")]
    pub targets_file: Option<String>,

    /// Maximum number of pages to fetch (default: 30)
    #[arg(short, long, default_value_t = 30)]
    pub max_pages: usize,

    /// Do not expand pages deeper than this (default: unlimited)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Flag found targets deeper than this (default: max depth, or 3)
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Require the same origin and a path under the root instead of a plain prefix match
    #[arg(long)]
    pub strict_scope: bool,

    /// Per-request timeout in seconds (default: 30)
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Fetch pages through the scraping proxy with this API key
    #[arg(long, env = "SCRAPER_API_KEY", hide_env_values = true)]
    pub scraper_api_key: Option<String>,

    /// Project identifier attached to the report
    #[arg(long)]
    pub project_id: Option<String>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Save report to file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
