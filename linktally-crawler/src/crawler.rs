use crate::error::{CrawlError, Result};
use crate::extract::extract_links;
use crate::normalize::normalize_url;
use crate::result::{CrawlIssue, CrawlOutcome, IssueKind};
use reqwest::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Same-host crawler that counts how often each internal page is referenced.
///
/// All traversal state lives inside a single `crawl` call, so one `Crawler`
/// can serve overlapping crawls without their visit maps leaking into each
/// other.
pub struct Crawler {
    client: Client,
    deadline: Option<Duration>,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("linktally/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            deadline: None,
            progress_callback: None,
        }
    }

    /// Overall wall-clock budget for a crawl. When it expires, workers stop
    /// pulling work and whatever was counted so far is returned.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawl every page on `base_url`'s host reachable from it, returning a
    /// map of normalized page key to reference count.
    ///
    /// Only the initial URL can fail the whole crawl (when it does not parse
    /// or has no hostname). Every per-page failure after that is absorbed:
    /// the page keeps its count, gains a `CrawlIssue`, and stays a leaf.
    pub async fn crawl(&self, base_url: &str, workers: usize) -> Result<CrawlOutcome> {
        let base = Url::parse(base_url)
            .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let base_host = base
            .host_str()
            .ok_or_else(|| CrawlError::InvalidUrl(format!("{} has no hostname", base_url)))?
            .to_lowercase();
        let seed_key = normalize_url(base_url)?;

        info!("Starting crawl of {} with {} workers", base_url, workers);

        let pages = Arc::new(Mutex::new(HashMap::from([(seed_key, 1u64)])));
        let issues: Arc<Mutex<Vec<CrawlIssue>>> = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from([base.to_string()])));
        // Discovered-but-unfinished work items. The crawl is complete when
        // the queue is drained and this counter is back to zero.
        let pending = Arc::new(AtomicUsize::new(1));
        let deadline = self.deadline.map(|budget| Instant::now() + budget);

        let mut worker_handles = Vec::new();
        for worker_id in 0..workers.max(1) {
            let client = self.client.clone();
            let base = base.clone();
            let base_host = base_host.clone();
            let pages = pages.clone();
            let issues = issues.clone();
            let queue = queue.clone();
            let pending = pending.clone();
            let progress_cb = self.progress_callback.clone();

            let handle = tokio::spawn(async move {
                debug!("Worker {} started", worker_id);

                loop {
                    if let Some(deadline) = deadline
                        && Instant::now() >= deadline
                    {
                        debug!("Worker {} stopping at crawl deadline", worker_id);
                        break;
                    }

                    let work_item = { queue.lock().await.pop_front() };
                    let Some(url) = work_item else {
                        if pending.load(Ordering::SeqCst) == 0 {
                            break;
                        }
                        // Another worker is still expanding a page; its links
                        // may land in the queue yet.
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        continue;
                    };

                    if let Some(ref callback) = progress_cb {
                        callback(worker_id, url.clone());
                    }

                    Self::visit_page_static(
                        &client, &url, &base, &base_host, &pages, &issues, &queue, &pending,
                    )
                    .await;

                    pending.fetch_sub(1, Ordering::SeqCst);
                }

                debug!("Worker {} finished", worker_id);
            });

            worker_handles.push(handle);
        }

        for handle in worker_handles {
            handle.await?;
        }

        let pages = pages.lock().await.clone();
        let issues = issues.lock().await.clone();
        info!(
            "Crawl complete. {} distinct pages, {} issues",
            pages.len(),
            issues.len()
        );
        Ok(CrawlOutcome { pages, issues })
    }

    /// Fetch one already-counted page and fold its outbound links into the
    /// shared crawl state. Static so spawned workers can call it.
    #[allow(clippy::too_many_arguments)]
    async fn visit_page_static(
        client: &Client,
        url: &str,
        base: &Url,
        base_host: &str,
        pages: &Arc<Mutex<HashMap<String, u64>>>,
        issues: &Arc<Mutex<Vec<CrawlIssue>>>,
        queue: &Arc<Mutex<VecDeque<String>>>,
        pending: &Arc<AtomicUsize>,
    ) {
        debug!("Fetching {}", url);

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error fetching {}: {}", url, e);
                issues
                    .lock()
                    .await
                    .push(CrawlIssue::new(url, IssueKind::FetchFailed, e.to_string()));
                return;
            }
        };

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!("Fetch of {} returned status {}", url, status);
            issues
                .lock()
                .await
                .push(CrawlIssue::new(url, IssueKind::HttpStatus, status.to_string()));
            return;
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let is_html = content_type
            .as_ref()
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            debug!("Non-HTML response from {}: {:?}", url, content_type);
            issues.lock().await.push(CrawlIssue::new(
                url,
                IssueKind::NonHtml,
                content_type.unwrap_or_else(|| "missing content-type header".to_string()),
            ));
            return;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error reading body of {}: {}", url, e);
                issues
                    .lock()
                    .await
                    .push(CrawlIssue::new(url, IssueKind::FetchFailed, e.to_string()));
                return;
            }
        };

        for link in extract_links(&body, base) {
            // Extractor output is absolute, so this parse only fails for
            // exotic schemes that slipped through resolution.
            let parsed = match Url::parse(&link) {
                Ok(parsed) => parsed,
                Err(e) => {
                    issues
                        .lock()
                        .await
                        .push(CrawlIssue::new(&link, IssueKind::BadLink, e.to_string()));
                    continue;
                }
            };

            let same_host = parsed
                .host_str()
                .map(|host| host.eq_ignore_ascii_case(base_host))
                .unwrap_or(false);
            if !same_host {
                debug!("Skipping external link {}", link);
                continue;
            }

            let key = match normalize_url(&link) {
                Ok(key) => key,
                Err(e) => {
                    warn!("Skipping unnormalizable link {}: {}", link, e);
                    issues
                        .lock()
                        .await
                        .push(CrawlIssue::new(&link, IssueKind::BadLink, e.to_string()));
                    continue;
                }
            };

            // First visit wins: check and insert happen under one lock, so
            // concurrent discoveries of the same key enqueue at most one
            // fetch. Later references only bump the counter.
            let mut pages_lock = pages.lock().await;
            match pages_lock.get_mut(&key) {
                Some(count) => *count += 1,
                None => {
                    pages_lock.insert(key, 1);
                    pending.fetch_add(1, Ordering::SeqCst);
                    queue.lock().await.push_back(link);
                }
            }
        }
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
