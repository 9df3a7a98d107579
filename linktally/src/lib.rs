// Include the handler and server modules directly from their files
#[path = "handlers.rs"]
pub mod handlers;
#[path = "server.rs"]
pub mod server;

// Re-export commonly used pieces for convenience
pub use handlers::{ensure_scheme, handle_crawl, handle_serve};
pub use server::{AppState, router};

// Re-export crawl functionality from linktally-core
pub use linktally_core::crawl::{CrawlOptions, execute_crawl};
pub use linktally_core::report::ReportFormat;
