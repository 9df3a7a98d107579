use indicatif::{ProgressBar, ProgressStyle};
use linktally_crawler::crawler::ProgressCallback;
use linktally_crawler::{CrawlOutcome, Crawler};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub workers: usize,
    pub timeout_secs: u64,
    pub deadline_secs: Option<u64>,
    pub show_progress_bar: bool,
}

/// Execute a crawl with the given options, driving a terminal spinner while
/// pages are fetched. Returns the crawl outcome.
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlOutcome, String> {
    let CrawlOptions {
        url,
        workers,
        timeout_secs,
        deadline_secs,
        show_progress_bar,
    } = options;

    // Single spinner for overall progress (only if enabled)
    let progress_bar = if show_progress_bar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Starting crawl of {}...", url));
        Some(Arc::new(pb))
    } else {
        None
    };

    // Counter for pages handed to workers
    let fetched_count = Arc::new(AtomicUsize::new(0));

    let progress_callback: ProgressCallback = if let Some(pb) = progress_bar.clone() {
        let count = fetched_count.clone();
        Arc::new(move |_worker_id: usize, _url: String| {
            let fetched = count.fetch_add(1, Ordering::Relaxed) + 1;
            pb.set_message(format!("Crawling... {} pages fetched", fetched));
            pb.tick();
        })
    } else {
        // No-op callback when the spinner is disabled
        Arc::new(|_worker_id: usize, _url: String| {})
    };

    let mut crawler = Crawler::with_timeout(timeout_secs).with_progress_callback(progress_callback);
    if let Some(secs) = deadline_secs {
        crawler = crawler.with_deadline(Duration::from_secs(secs));
    }

    let outcome = crawler
        .crawl(&url, workers)
        .await
        .map_err(|e| e.to_string())?;

    if let Some(pb) = progress_bar {
        let total = fetched_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Crawl complete! {} pages fetched", total));
    }

    Ok(outcome)
}
