//! Core types for the site auditor

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hint label emitted when a page looks like a client-rendered app
pub const SPA_HINT: &str = "Likely SPA/heavy JS";

/// Suggested automation approach derived from the extracted signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// CAPTCHA/anti-bot present; official API or partnership preferred
    ApiWithFriction,
    /// API documentation hints found; integrate against the API
    ApiIntegration,
    /// Client-rendered page; drive a real browser
    BrowserAutomation,
    /// Plain server-rendered page; scraping should work
    ScrapingFeasible,
    /// Site unreachable; nothing to conclude automatically
    ManualReview,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Recommendation::ApiWithFriction => {
                "Prefer official API / partnership; if browser automation needed, expect anti-bot friction"
            }
            Recommendation::ApiIntegration => {
                "Prefer API integration (or reverse-proxy internal automation); fallback to scraping if allowed"
            }
            Recommendation::BrowserAutomation => {
                "Browser automation (Playwright) likely; scraping may be brittle"
            }
            Recommendation::ScrapingFeasible => {
                "Scraping + light automation likely feasible (validate robots/ToS)"
            }
            Recommendation::ManualReview => {
                "Manual review (site unreachable from audit tool)"
            }
        };
        write!(f, "{}", text)
    }
}

/// Coarse score classification used by report renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreBand {
    /// Score 75 and above
    High,
    /// Score 50-74
    Medium,
    /// Score below 50
    Low,
}

impl ScoreBand {
    /// Classify a 0-100 score
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            ScoreBand::High
        } else if score >= 50 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::High => write!(f, "HIGH"),
            ScoreBand::Medium => write!(f, "MEDIUM"),
            ScoreBand::Low => write!(f, "LOW"),
        }
    }
}

/// What the robots.txt probe found
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RobotsInfo {
    /// URL that was probed
    pub url: String,
    /// True if robots.txt returned 200 with a non-empty body
    pub present: bool,
    /// True if at least one Disallow rule was found
    pub any_disallow: bool,
    /// The Disallow lines, capped at 50
    pub disallow_lines: Vec<String>,
}

impl RobotsInfo {
    /// An "absent" record for the given probe URL
    pub fn absent(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Result of a single audit run
///
/// Flat record: fetch metadata, one boolean per extracted signal,
/// the weighted score, and the textual findings that explain it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    /// Normalized input URL (scheme prepended if it was missing)
    pub input_url: String,
    /// URL after following redirects
    pub final_url: String,
    /// HTTP status of the main page, None when unreachable
    pub http_status: Option<u16>,
    /// Number of redirect hops followed
    pub redirect_count: usize,

    /// Automation potential score, 0-100
    pub score: u8,
    /// Suggested automation approach
    pub recommendation: Recommendation,

    /// robots.txt probe result
    pub robots: RobotsInfo,
    /// True if sitemap.xml returned 200 with a non-blank body
    pub sitemap_present: bool,

    /// Password input found on the page
    pub login_form_detected: bool,
    /// CAPTCHA/anti-bot markers found
    pub captcha_hints_detected: bool,

    /// JSON-LD or microdata found
    pub structured_data_detected: bool,
    /// RSS/Atom feed link found
    pub feed_detected: bool,
    /// OpenAPI/Swagger/GraphQL/JSON endpoint hints found
    pub api_hints_detected: bool,
    /// The matched API hint markers, empty when none
    pub api_hints: Vec<String>,

    /// Platform/tech fingerprints, sorted and deduplicated
    pub platform_hints: Vec<String>,

    /// Findings that fed the score
    pub reasons: Vec<String>,
    /// Friction findings worth flagging to a human
    pub warnings: Vec<String>,
}

impl AuditReport {
    /// Score band for renderers (HIGH/MEDIUM/LOW)
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(75), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(74), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(49), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Low);
    }

    #[test]
    fn test_score_band_display() {
        assert_eq!(ScoreBand::High.to_string(), "HIGH");
        assert_eq!(ScoreBand::Medium.to_string(), "MEDIUM");
        assert_eq!(ScoreBand::Low.to_string(), "LOW");
    }

    #[test]
    fn test_recommendation_display() {
        assert!(Recommendation::ApiIntegration
            .to_string()
            .contains("API integration"));
        assert!(Recommendation::ManualReview
            .to_string()
            .contains("unreachable"));
    }

    #[test]
    fn test_recommendation_serialization() {
        let json = serde_json::to_string(&Recommendation::ScrapingFeasible).unwrap();
        assert_eq!(json, "\"scraping_feasible\"");
    }

    #[test]
    fn test_robots_absent() {
        let robots = RobotsInfo::absent("https://example.com/robots.txt");
        assert!(!robots.present);
        assert!(!robots.any_disallow);
        assert!(robots.disallow_lines.is_empty());
        assert_eq!(robots.url, "https://example.com/robots.txt");
    }

    #[test]
    fn test_report_serialization_keeps_null_status() {
        let report = AuditReport {
            input_url: "https://example.com".to_string(),
            final_url: "https://example.com".to_string(),
            http_status: None,
            redirect_count: 0,
            score: 0,
            recommendation: Recommendation::ManualReview,
            robots: RobotsInfo::absent("https://example.com/robots.txt"),
            sitemap_present: false,
            login_form_detected: false,
            captcha_hints_detected: false,
            structured_data_detected: false,
            feed_detected: false,
            api_hints_detected: false,
            api_hints: vec![],
            platform_hints: vec![],
            reasons: vec![],
            warnings: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        // Unreachable sites serialize an explicit null status
        assert!(json.contains("\"http_status\":null"));
        assert!(json.contains("\"score\":0"));
    }
}
