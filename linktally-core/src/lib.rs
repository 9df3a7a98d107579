pub mod crawl;
pub mod report;

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!("  {}", "linktally".bright_cyan().bold());
    println!(
        "  internal link census for a single host, v{}",
        env!("CARGO_PKG_VERSION")
    );
    println!();
}
