// Tests for report generation functionality

use linktally_core::report::{
    PageEntry, ReportData, ReportFormat, generate_csv_report, generate_json_report,
    generate_text_report, save_report,
};
use linktally_crawler::{CrawlIssue, CrawlOutcome, IssueKind};
use std::collections::HashMap;

fn sample_outcome() -> CrawlOutcome {
    CrawlOutcome {
        pages: HashMap::from([
            ("example.com".to_string(), 1),
            ("example.com/a".to_string(), 3),
            ("example.com/b".to_string(), 3),
        ]),
        issues: vec![CrawlIssue::new(
            "https://example.com/missing",
            IssueKind::HttpStatus,
            "404 Not Found",
        )],
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str_text() {
    assert!(matches!(
        ReportFormat::from_str("text"),
        Some(ReportFormat::Text)
    ));
}

#[test]
fn test_report_format_from_str_json() {
    assert!(matches!(
        ReportFormat::from_str("json"),
        Some(ReportFormat::Json)
    ));
}

#[test]
fn test_report_format_from_str_csv() {
    assert!(matches!(
        ReportFormat::from_str("csv"),
        Some(ReportFormat::Csv)
    ));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(
        ReportFormat::from_str("TEXT"),
        Some(ReportFormat::Text)
    ));
    assert!(matches!(
        ReportFormat::from_str("Json"),
        Some(ReportFormat::Json)
    ));
    assert!(matches!(
        ReportFormat::from_str("CSV"),
        Some(ReportFormat::Csv)
    ));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert!(ReportFormat::from_str("html").is_none());
    assert!(ReportFormat::from_str("pdf").is_none());
}

// ============================================================================
// Report Data Tests
// ============================================================================

#[test]
fn test_report_data_sorts_and_prefixes_urls() {
    let data = ReportData::from_outcome("https://example.com", &sample_outcome());

    assert_eq!(data.total_pages, 3);
    assert_eq!(data.total_links, 7);

    let urls: Vec<&str> = data.links.iter().map(|entry| entry.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com",
        ]
    );
    assert_eq!(data.links[0].hits, 3);
    assert_eq!(data.links[2].hits, 1);
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_contents() {
    let data = ReportData::from_outcome("https://example.com", &sample_outcome());
    let report = generate_text_report(&data);

    assert!(report.contains("REPORT"));
    assert!(report.contains("Total pages found:   3"));
    assert!(report.contains("Total links counted: 7"));
    assert!(report.contains("Found 3 links to page: https://example.com/a"));
    assert!(report.contains("Found 1 link to page: https://example.com"));
    assert!(report.contains("Skipped during crawl: 1"));
    assert!(report.contains("[http status] https://example.com/missing (404 Not Found)"));
    assert!(report.contains("END REPORT"));
}

#[test]
fn test_text_report_omits_skipped_section_when_clean() {
    let outcome = CrawlOutcome {
        pages: HashMap::from([("example.com".to_string(), 1)]),
        issues: Vec::new(),
    };
    let data = ReportData::from_outcome("https://example.com", &outcome);
    let report = generate_text_report(&data);

    assert!(!report.contains("Skipped during crawl"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_round_trips() {
    let data = ReportData::from_outcome("https://example.com", &sample_outcome());
    let rendered = generate_json_report(&data).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(parsed["report"]["metadata"]["generator"], "linktally");
    assert_eq!(parsed["report"]["summary"]["total_pages"], 3);
    assert_eq!(parsed["report"]["summary"]["total_links"], 7);
    assert_eq!(
        parsed["report"]["links"][0]["url"],
        "https://example.com/a"
    );
    assert_eq!(parsed["report"]["skipped"][0]["kind"], "http_status");
}

// ============================================================================
// CSV Report Tests
// ============================================================================

#[test]
fn test_csv_report_layout() {
    let data = ReportData::from_outcome("https://example.com", &sample_outcome());
    let csv = generate_csv_report(&data);

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("URL,Link Count"));
    assert_eq!(lines.next(), Some("https://example.com/a,3"));
    assert_eq!(lines.next(), Some("https://example.com/b,3"));
    assert_eq!(lines.next(), Some("https://example.com,1"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_csv_report_quotes_awkward_urls() {
    let data = ReportData {
        base_url: "https://example.com".to_string(),
        generated_at: "2024-01-01T00:00:00Z".to_string(),
        total_pages: 1,
        total_links: 2,
        links: vec![PageEntry {
            url: "https://example.com/a,b\"c".to_string(),
            hits: 2,
        }],
        skipped: Vec::new(),
    };
    let csv = generate_csv_report(&data);

    assert!(csv.contains("\"https://example.com/a,b\"\"c\",2"));
}

// ============================================================================
// File Output Tests
// ============================================================================

#[test]
fn test_save_report_writes_the_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.txt");

    let data = ReportData::from_outcome("https://example.com", &sample_outcome());
    let report = generate_text_report(&data);
    save_report(&report, &path)?;

    let written = std::fs::read_to_string(&path)?;
    assert_eq!(written, report);
    Ok(())
}

#[test]
fn test_csv_download_filename_shape() {
    let name = linktally_core::report::csv_download_filename();
    assert!(name.starts_with("crawled_links_"));
    assert!(name.ends_with(".csv"));
}
