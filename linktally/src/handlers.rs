use clap::ArgMatches;
use colored::Colorize;
use linktally_core::crawl::{CrawlOptions, execute_crawl};
use linktally_core::report::{
    ReportData, ReportFormat, generate_csv_report, generate_json_report, generate_text_report,
    save_report,
};
use std::path::PathBuf;
use url::Url;

/// Accept a URL the way users type it: bare hostnames get an https://
/// prefix before validation. Returns `None` when the input still does not
/// parse as a URL with a hostname.
pub fn ensure_scheme(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&candidate) {
        Ok(parsed) if parsed.host_str().is_some() => Some(candidate),
        _ => None,
    }
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let raw_url = sub_matches.get_one::<String>("url").unwrap();
    let threads = *sub_matches.get_one::<usize>("threads").unwrap_or(&10);
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let deadline = sub_matches.get_one::<u64>("deadline").copied();
    let output = sub_matches.get_one::<PathBuf>("output");
    let format_arg = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let Some(base_url) = ensure_scheme(raw_url) else {
        eprintln!(
            "✗ Invalid URL '{}'. Please provide something like https://example.com",
            raw_url
        );
        std::process::exit(1);
    };
    // clap restricts the value set, so this never falls back in practice
    let format = ReportFormat::from_str(format_arg).unwrap_or(ReportFormat::Text);

    println!("\n🕷  Crawling {}", base_url);
    println!("Workers: {}", threads);
    println!("Timeout: {}s per request", timeout);
    if let Some(secs) = deadline {
        println!("Deadline: {}s", secs);
    }
    println!();

    let options = CrawlOptions {
        url: base_url.clone(),
        workers: threads,
        timeout_secs: timeout,
        deadline_secs: deadline,
        show_progress_bar: true,
    };

    let outcome = match execute_crawl(options).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("✗ Crawl failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "\n{} Crawl complete! Found {} pages, {} skipped.\n",
        "✓".green().bold(),
        outcome.total_pages(),
        outcome.issues.len()
    );

    let data = ReportData::from_outcome(&base_url, &outcome);
    let rendered = match format {
        ReportFormat::Text => generate_text_report(&data),
        ReportFormat::Json => match generate_json_report(&data) {
            Ok(rendered) => rendered,
            Err(e) => {
                eprintln!("✗ Failed to render JSON report: {}", e);
                std::process::exit(1);
            }
        },
        ReportFormat::Csv => generate_csv_report(&data),
    };

    match output {
        Some(path) => match save_report(&rendered, path) {
            Ok(()) => println!("{} Report saved to {}", "✓".green().bold(), path.display()),
            Err(e) => {
                eprintln!("✗ Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => print!("{}", rendered),
    }
}

pub async fn handle_serve(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let bind = sub_matches.get_one::<String>("bind").unwrap();
    let threads = *sub_matches.get_one::<usize>("threads").unwrap_or(&10);
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);

    let state = crate::server::AppState::new(threads, timeout);
    let app = crate::server::router(state);

    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("✗ Failed to bind {}: {}", bind, e);
            std::process::exit(1);
        }
    };

    println!(
        "{} linktally API listening on http://{}",
        "✓".green().bold(),
        bind
    );
    println!("  POST /crawl   {{\"url\": \"https://example.com\", \"format\": \"csv\"?}}");
    println!("  GET  /health");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("✗ Server error: {}", e);
        std::process::exit(1);
    }
}
