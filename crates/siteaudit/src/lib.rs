//! SiteAudit - heuristic website automation-potential auditor
//!
//! Fetches a single URL plus its two well-known adjuncts (robots.txt,
//! sitemap.xml) and produces a 0-100 "automation potential" score with
//! a short report. The pipeline is linear and stateless:
//!
//! fetch -> extract signals -> weight-sum -> render
//!
//! Signals are substring/tag-level observations: login forms, CAPTCHA
//! markers, JSON-LD blocks, RSS links, API documentation hints, CMS
//! fingerprints. No JavaScript execution, no crawling beyond the target
//! page and its adjuncts, no attempt to get past access controls.
//!
//! ```no_run
//! # async fn run() -> Result<(), siteaudit::AuditError> {
//! let report = siteaudit::audit("example.com").await?;
//! println!("{} scores {}/100", report.final_url, report.score);
//! # Ok(())
//! # }
//! ```

pub mod client;
mod checks;
mod error;
mod html;
mod http;
mod score;
mod types;

pub use client::{audit, audit_with_options, AuditOptions};
pub use error::AuditError;
pub use types::{AuditReport, Recommendation, RobotsInfo, ScoreBand, SPA_HINT};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "FlowOpt SiteAudit/0.1 (+https://www.flowopt.nl)";
