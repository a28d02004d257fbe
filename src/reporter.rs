use crate::models::{CrawlOutcome, LinkDepthReport, ReportSummary, StopReason, TargetResult};
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn generate_report(
        root_url: &str,
        project_id: Option<&str>,
        outcome: &CrawlOutcome,
    ) -> LinkDepthReport {
        let summary = Self::calculate_summary(outcome);
        let timestamp = chrono::Utc::now().to_rfc3339();

        LinkDepthReport {
            root_url: root_url.to_string(),
            project_id: project_id.map(|id| id.to_string()),
            timestamp,
            summary,
            results: outcome.results.clone(),
            crawl_log: outcome.crawl_log.clone(),
            activity_log: outcome.activity_log.clone(),
        }
    }

    fn calculate_summary(outcome: &CrawlOutcome) -> ReportSummary {
        ReportSummary {
            total_targets: outcome.results.len(),
            found_targets: outcome.results.iter().filter(|r| r.is_found()).count(),
            problematic_targets: outcome
                .results
                .iter()
                .filter(|r| r.is_problematic)
                .count(),
            pages_fetched: outcome.pages_fetched,
            urls_discovered: outcome.crawl_log.len(),
            stop_reason: outcome.stop_reason,
        }
    }

    /// Human-readable depth: the number of clicks, or "not found"
    pub fn format_depth(result: &TargetResult) -> String {
        match result.depth {
            Some(1) => "1 click".to_string(),
            Some(depth) => format!("{} clicks", depth),
            None => "not found".to_string(),
        }
    }

    fn describe_stop_reason(reason: StopReason) -> &'static str {
        match reason {
            StopReason::QueueExhausted => "every reachable page was checked",
            StopReason::BudgetExhausted => "page budget reached",
            StopReason::AllTargetsFound => "all key URLs found",
        }
    }

    pub fn print_text_report(report: &LinkDepthReport, verbose: bool) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "linkdepth - Internal Link Depth Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "Root URL".bright_white().bold(), report.root_url);
        if let Some(project_id) = &report.project_id {
            println!("{}: {}", "Project".bright_white().bold(), project_id);
        }
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.timestamp
        );
        println!();

        println!("{}", "Summary".bright_yellow().bold().underline());
        println!(
            "  Key URLs:            {}",
            report.summary.total_targets.to_string().bright_green()
        );
        println!(
            "  Found:               {}",
            report.summary.found_targets.to_string().bright_green()
        );
        println!(
            "  Problematic:         {}",
            if report.summary.problematic_targets > 0 {
                report.summary.problematic_targets.to_string().bright_red()
            } else {
                report.summary.problematic_targets.to_string().bright_green()
            }
        );
        println!(
            "  Pages Fetched:       {}",
            report.summary.pages_fetched.to_string().bright_green()
        );
        println!(
            "  URLs Discovered:     {}",
            report.summary.urls_discovered.to_string().bright_green()
        );
        println!(
            "  Stopped Because:     {}",
            Self::describe_stop_reason(report.summary.stop_reason).bright_cyan()
        );
        println!();

        println!("{}", "Key URLs".bright_yellow().bold().underline());
        for result in &report.results {
            let depth = Self::format_depth(result);
            let (marker, depth) = if result.is_problematic {
                ("WARN".yellow(), depth.bright_red())
            } else {
                (" OK ".bright_green(), depth.bright_green())
            };
            println!("  [{}] {} ({})", marker, result.url, depth);
        }

        if verbose {
            println!();
            println!("{}", "Crawl Log".bright_yellow().bold().underline());
            for entry in &report.crawl_log {
                println!("  {:>3}  {}", entry.depth, entry.url);
            }

            println!();
            println!("{}", "Activity".bright_yellow().bold().underline());
            for line in &report.activity_log {
                println!("  {}", line.dimmed());
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn save_json_report(report: &LinkDepthReport, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
