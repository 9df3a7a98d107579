use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use linktally_core::report::{ReportData, csv_download_filename, generate_csv_report};
use linktally_crawler::{CrawlError, Crawler};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Shared server state. The HTTP client inside the crawler is reused across
/// requests; every request gets its own visit map, so overlapping crawls
/// never see each other's results.
#[derive(Clone)]
pub struct AppState {
    crawler: Arc<Crawler>,
    workers: usize,
}

impl AppState {
    pub fn new(workers: usize, timeout_secs: u64) -> Self {
        Self {
            crawler: Arc::new(Crawler::with_timeout(timeout_secs)),
            workers,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/crawl", post(crawl_site))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CrawlRequest {
    url: String,
    /// "csv" switches the response to a CSV attachment; anything else (or
    /// nothing) gets JSON.
    #[serde(default)]
    format: Option<String>,
}

async fn crawl_site(State(state): State<AppState>, Json(request): Json<CrawlRequest>) -> Response {
    if request.url.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing URL",
            "Please provide a URL to crawl",
        );
    }

    let Some(base_url) = crate::handlers::ensure_scheme(&request.url) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid URL",
            "Please provide a valid URL (e.g., https://example.com)",
        );
    };

    info!("Starting crawl of {}", base_url);

    let outcome = match state.crawler.crawl(&base_url, state.workers).await {
        Ok(outcome) => outcome,
        Err(CrawlError::InvalidUrl(detail)) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid URL", &detail);
        }
        Err(e) => {
            error!("Crawl of {} failed: {}", base_url, e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to crawl website",
                "Unable to fetch the target site",
            );
        }
    };

    // A successful crawl always contains at least the seed page.
    info!(
        "Crawl of {} complete: {} pages, {} skipped",
        base_url,
        outcome.total_pages(),
        outcome.issues.len()
    );

    let data = ReportData::from_outcome(&base_url, &outcome);

    if request.format.as_deref() == Some("csv") {
        let csv = generate_csv_report(&data);
        return (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", csv_download_filename()),
                ),
            ],
            csv,
        )
            .into_response();
    }

    Json(json!({
        "links": data.links,
        "totalPages": data.total_pages,
        "totalLinks": data.total_links,
        "baseURL": data.base_url,
        "skipped": data.skipped
    }))
    .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (status, Json(json!({ "error": error, "message": message }))).into_response()
}
