use linkdepth::models::{CrawlLogEntry, CrawlOutcome, StopReason, TargetResult};
use linkdepth::reporter::Reporter;
use std::fs;
use tempfile::tempdir;

fn create_outcome(results: Vec<TargetResult>, stop_reason: StopReason) -> CrawlOutcome {
    CrawlOutcome {
        results,
        crawl_log: vec![
            CrawlLogEntry {
                url: "https://example.com".to_string(),
                depth: 0,
            },
            CrawlLogEntry {
                url: "https://example.com/about".to_string(),
                depth: 1,
            },
            CrawlLogEntry {
                url: "https://example.com/about/team".to_string(),
                depth: 2,
            },
        ],
        activity_log: vec!["Starting crawl from https://example.com".to_string()],
        pages_fetched: 2,
        stop_reason,
    }
}

#[test]
fn test_target_result_problem_flag() {
    assert!(!TargetResult::new("/a".to_string(), Some(0), 3).is_problematic);
    assert!(!TargetResult::new("/a".to_string(), Some(3), 3).is_problematic);
    assert!(TargetResult::new("/a".to_string(), Some(4), 3).is_problematic);
    assert!(TargetResult::new("/a".to_string(), Some(3), 2).is_problematic);
    assert!(TargetResult::new("/a".to_string(), None, 3).is_problematic);
}

#[test]
fn test_generate_report_summary() {
    let outcome = create_outcome(
        vec![
            TargetResult::new("/about".to_string(), Some(1), 3),
            TargetResult::new("/about/team".to_string(), Some(2), 1),
            TargetResult::new("/careers".to_string(), None, 3),
        ],
        StopReason::BudgetExhausted,
    );

    let report = Reporter::generate_report("https://example.com", Some("p-1"), &outcome);

    assert_eq!(report.root_url, "https://example.com");
    assert_eq!(report.project_id.as_deref(), Some("p-1"));
    assert_eq!(report.summary.total_targets, 3);
    assert_eq!(report.summary.found_targets, 2);
    assert_eq!(report.summary.problematic_targets, 2);
    assert_eq!(report.summary.pages_fetched, 2);
    assert_eq!(report.summary.urls_discovered, 3);
    assert_eq!(report.summary.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(report.results, outcome.results);
    assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
}

#[test]
fn test_format_depth() {
    assert_eq!(
        Reporter::format_depth(&TargetResult::new("/".to_string(), Some(0), 3)),
        "0 clicks"
    );
    assert_eq!(
        Reporter::format_depth(&TargetResult::new("/a".to_string(), Some(1), 3)),
        "1 click"
    );
    assert_eq!(
        Reporter::format_depth(&TargetResult::new("/b".to_string(), Some(4), 3)),
        "4 clicks"
    );
    assert_eq!(
        Reporter::format_depth(&TargetResult::new("/c".to_string(), None, 3)),
        "not found"
    );
}

#[test]
fn test_print_text_report_does_not_panic() {
    let outcome = create_outcome(
        vec![
            TargetResult::new("/about".to_string(), Some(1), 3),
            TargetResult::new("/careers".to_string(), None, 3),
        ],
        StopReason::QueueExhausted,
    );
    let report = Reporter::generate_report("https://example.com", None, &outcome);

    Reporter::print_text_report(&report, false);
    Reporter::print_text_report(&report, true);
}

#[test]
fn test_save_json_report() {
    let outcome = create_outcome(
        vec![TargetResult::new("/about".to_string(), Some(1), 3)],
        StopReason::AllTargetsFound,
    );
    let report = Reporter::generate_report("https://example.com", None, &outcome);

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    let filename = path.to_str().unwrap();

    Reporter::save_json_report(&report, filename).expect("Failed to save report");

    let contents = fs::read_to_string(filename).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(json["rootUrl"], "https://example.com");
    assert!(json.get("projectId").is_none());
    assert_eq!(json["summary"]["stopReason"], "all_targets_found");
    assert_eq!(json["results"][0]["isProblematic"], false);
    assert_eq!(json["crawlLog"].as_array().unwrap().len(), 3);
    assert_eq!(json["activityLog"][0], "Starting crawl from https://example.com");
}

#[test]
fn test_save_json_report_to_missing_directory_fails() {
    let outcome = create_outcome(vec![], StopReason::QueueExhausted);
    let report = Reporter::generate_report("https://example.com", None, &outcome);

    let result = Reporter::save_json_report(&report, "/nonexistent/dir/report.json");
    assert!(result.is_err());
}
