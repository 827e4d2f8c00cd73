//! Example: Audit a few well-known sites and display the scores
//!
//! Run with: cargo run -p siteaudit --example audit_url
//!
//! Network access required; results depend on what the sites serve.

use siteaudit::{audit, AuditReport};

const URLS: &[&str] = &[
    "https://example.com",
    "https://www.wikipedia.org",
    "https://news.ycombinator.com",
];

#[tokio::main]
async fn main() {
    println!("SiteAudit Examples");
    println!("==================\n");

    for (i, url) in URLS.iter().enumerate() {
        println!("{}. {}", i + 1, url);

        match audit(url).await {
            Ok(report) => print_summary(&report),
            Err(e) => println!("   Error: {}\n", e),
        }
    }
}

fn print_summary(report: &AuditReport) {
    println!("   Status: {:?}", report.http_status);
    println!("   Score: {} / 100 ({})", report.score, report.band());
    println!("   Approach: {}", report.recommendation);

    if !report.platform_hints.is_empty() {
        println!("   Platform: {}", report.platform_hints.join(", "));
    }

    for warning in &report.warnings {
        println!("   Warning: {}", warning);
    }

    println!();
}
