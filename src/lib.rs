pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod links;
pub mod models;
pub mod normalizer;
pub mod reporter;

use anyhow::{Context, Result};
use cli::Cli;
use colored::*;
use config::Config;
use crawler::{Crawler, CrawlerConfig};
use fetcher::{HttpFetcher, PageFetcher, ScraperApiFetcher};
use links::ScopePolicy;
use reporter::Reporter;

/// Reads key URLs from a file, one per line. Blank lines and `#` comments are skipped.
pub fn read_targets_file(path: &str) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read targets file: {}", path))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect())
}

pub async fn run(args: Cli) -> Result<()> {
    let args = match Config::load(&args)? {
        Some(config) => config.merge_with_cli(&args),
        None => args,
    };
    let json_output = args.output == "json";

    if !json_output {
        println!(
            "{}",
            "linkdepth - Internal Link Depth Analyzer"
                .bright_cyan()
                .bold()
        );
        println!("{}", "=".repeat(50).bright_blue());
        println!();
    }

    // Validate URL
    if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
        anyhow::bail!("URL must start with http:// or https://");
    }

    let mut targets = args.targets.clone();
    if let Some(path) = &args.targets_file {
        targets.extend(read_targets_file(path)?);
    }
    if targets.is_empty() {
        anyhow::bail!("At least one target URL is required (use --target or --targets-file)");
    }

    if !json_output {
        println!("{} {}", "Starting crawl:".bright_white().bold(), args.url);
        println!("{} {}", "Key URLs:".bright_white().bold(), targets.len());
        println!("{} {}", "Max pages:".bright_white().bold(), args.max_pages);
        match args.max_depth {
            Some(depth) => println!("{} {}", "Max depth:".bright_white().bold(), depth),
            None => println!("{} unlimited", "Max depth:".bright_white().bold()),
        }
        println!();
    }

    let fetcher: Box<dyn PageFetcher> = match &args.scraper_api_key {
        Some(key) if !key.is_empty() => {
            tracing::debug!("Fetching pages through the scraping proxy");
            Box::new(ScraperApiFetcher::new(key.clone(), args.timeout)?)
        }
        _ => Box::new(HttpFetcher::new(args.timeout)?),
    };

    let config = CrawlerConfig {
        max_pages: args.max_pages,
        max_depth: args.max_depth,
        problem_threshold: args.threshold,
        scope: if args.strict_scope {
            ScopePolicy::SameOrigin
        } else {
            ScopePolicy::Prefix
        },
    };

    let mut crawler = Crawler::new(fetcher, config);
    if !json_output && !args.verbose {
        crawler.enable_progress_bar();
    }

    let outcome = crawler.crawl(&args.url, &targets).await?;

    let report = Reporter::generate_report(&args.url, args.project_id.as_deref(), &outcome);

    // Output report
    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        _ => {
            Reporter::print_text_report(&report, args.verbose);
        }
    }

    // Save to file if requested
    if let Some(filename) = &args.save {
        Reporter::save_json_report(&report, filename)?;
        // stdout carries only the report in JSON mode
        if json_output {
            tracing::info!(path = %filename, "Report saved");
        } else {
            println!("Report saved to: {}", filename.bright_green());
        }
    }

    Ok(())
}
