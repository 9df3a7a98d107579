// Report generation from a crawl outcome

use linktally_crawler::{CrawlIssue, CrawlOutcome};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

/// One line of the report: a page and how many times it was linked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub url: String,
    pub hits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub base_url: String,
    pub generated_at: String,
    pub total_pages: usize,
    pub total_links: u64,
    pub links: Vec<PageEntry>,
    pub skipped: Vec<CrawlIssue>,
}

impl ReportData {
    pub fn from_outcome(base_url: &str, outcome: &CrawlOutcome) -> Self {
        let links = outcome
            .sorted_pages()
            .into_iter()
            .map(|(key, hits)| PageEntry {
                url: display_url(&key),
                hits,
            })
            .collect();

        Self {
            base_url: base_url.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_pages: outcome.total_pages(),
            total_links: outcome.total_links(),
            links,
            skipped: outcome.issues.clone(),
        }
    }
}

/// Visit-map keys are scheme-less; give them a scheme back for display.
pub fn display_url(key: &str) -> String {
    format!("https://{}", key)
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str("==================\n");
    report.push_str("       REPORT\n");
    report.push_str("==================\n");
    report.push_str(&format!("Base URL:  {}\n", data.base_url));
    report.push_str(&format!("Generated: {}\n", data.generated_at));
    report.push_str(&format!("Total pages found:   {}\n", data.total_pages));
    report.push_str(&format!("Total links counted: {}\n", data.total_links));
    report.push_str("==================\n");

    for entry in &data.links {
        let link_word = if entry.hits == 1 { "link" } else { "links" };
        report.push_str(&format!(
            "Found {} {} to page: {}\n",
            entry.hits, link_word, entry.url
        ));
    }

    if !data.skipped.is_empty() {
        report.push_str("==================\n");
        report.push_str(&format!("Skipped during crawl: {}\n", data.skipped.len()));
        for issue in &data.skipped {
            report.push_str(&format!(
                "  [{}] {} ({})\n",
                issue.kind, issue.url, issue.detail
            ));
        }
    }

    report.push_str("==================\n");
    report.push_str("     END REPORT\n");
    report.push_str("==================\n");

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "linktally",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": data.generated_at,
                "format": "json"
            },
            "summary": {
                "base_url": data.base_url,
                "total_pages": data.total_pages,
                "total_links": data.total_links
            },
            "links": data.links,
            "skipped": data.skipped
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(data: &ReportData) -> String {
    let mut csv = String::from("URL,Link Count\r\n");
    for entry in &data.links {
        csv.push_str(&csv_field(&entry.url));
        csv.push(',');
        csv.push_str(&entry.hits.to_string());
        csv.push_str("\r\n");
    }
    csv
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Filename offered for CSV downloads, timestamped so repeated exports do
/// not collide.
pub fn csv_download_filename() -> String {
    format!(
        "crawled_links_{}.csv",
        chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S")
    )
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
