//! Audit entry points
//!
//! The pipeline is linear: normalize the URL, fetch the main page,
//! probe robots.txt and sitemap.xml at the final origin, run the
//! detectors, weight the signals into a score.

use crate::checks::{
    self, detect_api_hints, detect_captcha_hints, detect_feed, detect_login_form,
    detect_structured_data, platform_hints, Page,
};
use crate::error::AuditError;
use crate::http::HttpClient;
use crate::score::{evaluate, ScoreInput};
use crate::types::{AuditReport, Recommendation, RobotsInfo};
use crate::DEFAULT_USER_AGENT;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

static HTTP_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme pattern"));

static ANY_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("valid scheme pattern"));

/// Options for a single audit run
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Custom User-Agent; the default identifies the audit tool
    pub user_agent: Option<String>,
    /// Per-request timeout (connect and total), default 12 seconds
    pub timeout: Duration,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: Duration::from_secs(12),
        }
    }
}

/// Audit a URL with default options
pub async fn audit(url: &str) -> Result<AuditReport, AuditError> {
    audit_with_options(url, AuditOptions::default()).await
}

/// Audit a URL with custom options
///
/// Returns `Err` only for invalid input or client construction failure.
/// An unreachable site is a successful audit with score 0 and a
/// manual-review recommendation.
pub async fn audit_with_options(
    url: &str,
    options: AuditOptions,
) -> Result<AuditReport, AuditError> {
    let input_url = normalize_url(url)?;
    let parsed = Url::parse(&input_url).map_err(|e| AuditError::InvalidUrl(e.to_string()))?;

    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    let client = HttpClient::new(user_agent, options.timeout)?;

    info!(url = %input_url, "Starting audit");
    let fetched = match client.fetch_page(parsed).await {
        Ok(fetched) => fetched,
        Err(e) => {
            debug!(url = %input_url, error = %e, "Main page unreachable");
            return Ok(unreachable_report(&input_url, &e));
        }
    };

    let final_url = fetched.final_url.clone();
    let page = Page::new(fetched.final_url, &fetched.headers, fetched.body);

    let robots = checks::robots::probe(&client, &final_url).await;
    let sitemap_present = checks::sitemap::probe(&client, &final_url).await;

    let login_form_detected = detect_login_form(&page);
    let captcha_hints_detected = detect_captcha_hints(&page);
    let structured_data_detected = detect_structured_data(&page);
    let feed_detected = detect_feed(&page);
    let api_hints = detect_api_hints(&page);
    let api_hints_detected = !api_hints.is_empty();
    let platform_hints = platform_hints(&page);

    let eval = evaluate(&ScoreInput {
        http_status: fetched.status,
        redirect_count: fetched.redirect_count,
        robots: &robots,
        sitemap_present,
        structured_data: structured_data_detected,
        feed: feed_detected,
        api_hints: api_hints_detected,
        login_form: login_form_detected,
        captcha_hints: captcha_hints_detected,
        platform_hints: &platform_hints,
    });

    info!(url = %input_url, score = eval.score, "Audit complete");
    Ok(AuditReport {
        input_url,
        final_url: final_url.to_string(),
        http_status: Some(fetched.status),
        redirect_count: fetched.redirect_count,
        score: eval.score,
        recommendation: eval.recommendation,
        robots,
        sitemap_present,
        login_form_detected,
        captcha_hints_detected,
        structured_data_detected,
        feed_detected,
        api_hints_detected,
        api_hints,
        platform_hints,
        reasons: eval.reasons,
        warnings: eval.warnings,
    })
}

/// Trim and default the scheme to https
fn normalize_url(url: &str) -> Result<String, AuditError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AuditError::MissingUrl);
    }
    if HTTP_SCHEME_RE.is_match(url) {
        return Ok(url.to_string());
    }
    if ANY_SCHEME_RE.is_match(url) {
        return Err(AuditError::InvalidUrlScheme);
    }
    Ok(format!("https://{url}"))
}

/// Report for a site the audit tool could not reach at all
fn unreachable_report(input_url: &str, err: &AuditError) -> AuditReport {
    let robots_url = Url::parse(input_url)
        .ok()
        .and_then(|u| u.join("/robots.txt").ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| format!("{input_url}/robots.txt"));

    AuditReport {
        input_url: input_url.to_string(),
        final_url: input_url.to_string(),
        http_status: None,
        redirect_count: 0,
        score: 0,
        recommendation: Recommendation::ManualReview,
        robots: RobotsInfo::absent(robots_url),
        sitemap_present: false,
        login_form_detected: false,
        captcha_hints_detected: false,
        structured_data_detected: false,
        feed_detected: false,
        api_hints_detected: false,
        api_hints: vec![],
        platform_hints: vec![],
        reasons: vec![format!("Request failed: {}", err.label())],
        warnings: vec!["Site could not be reached from this environment.".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_http_schemes() {
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("HTTP://example.com").unwrap(),
            "HTTP://example.com"
        );
    }

    #[test]
    fn test_normalize_prepends_https() {
        assert_eq!(
            normalize_url("example.com/path").unwrap(),
            "https://example.com/path"
        );
        assert_eq!(
            normalize_url("  example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(normalize_url(""), Err(AuditError::MissingUrl)));
        assert!(matches!(normalize_url("   "), Err(AuditError::MissingUrl)));
    }

    #[test]
    fn test_normalize_rejects_other_schemes() {
        assert!(matches!(
            normalize_url("ftp://example.com"),
            Err(AuditError::InvalidUrlScheme)
        ));
        assert!(matches!(
            normalize_url("file:///etc/passwd"),
            Err(AuditError::InvalidUrlScheme)
        ));
    }

    #[tokio::test]
    async fn test_audit_empty_url() {
        let result = audit("").await;
        assert!(matches!(result, Err(AuditError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_audit_invalid_scheme() {
        let result = audit("ftp://example.com").await;
        assert!(matches!(result, Err(AuditError::InvalidUrlScheme)));
    }

    #[test]
    fn test_unreachable_report_shape() {
        let report = unreachable_report("https://example.com", &AuditError::Timeout);
        assert_eq!(report.score, 0);
        assert_eq!(report.http_status, None);
        assert_eq!(report.recommendation, Recommendation::ManualReview);
        assert_eq!(report.robots.url, "https://example.com/robots.txt");
        assert_eq!(report.reasons, vec!["Request failed: timeout"]);
        assert_eq!(
            report.warnings,
            vec!["Site could not be reached from this environment."]
        );
    }

    #[test]
    fn test_default_options() {
        let options = AuditOptions::default();
        assert!(options.user_agent.is_none());
        assert_eq!(options.timeout, Duration::from_secs(12));
    }
}
