//! Weighted-sum scoring over the extracted signals
//!
//! The score is a fixed arithmetic formula: start neutral at 60, add for
//! machine-friendly surfaces (sitemap, structured data, feeds, API docs),
//! subtract for friction (login walls, CAPTCHA, heavy client rendering),
//! clamp to 0-100.

use crate::types::{Recommendation, RobotsInfo, SPA_HINT};

/// Neutral starting point
const BASE_SCORE: i32 = 60;

/// Signals feeding one score evaluation
pub(crate) struct ScoreInput<'a> {
    pub http_status: u16,
    pub redirect_count: usize,
    pub robots: &'a RobotsInfo,
    pub sitemap_present: bool,
    pub structured_data: bool,
    pub feed: bool,
    pub api_hints: bool,
    pub login_form: bool,
    pub captcha_hints: bool,
    pub platform_hints: &'a [String],
}

/// Score plus the findings that explain it
pub(crate) struct Evaluation {
    pub score: u8,
    pub recommendation: Recommendation,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

/// Apply the weighting formula
pub(crate) fn evaluate(input: &ScoreInput<'_>) -> Evaluation {
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    match input.http_status {
        200..=299 => {
            score += 10;
            reasons.push("Homepage reachable (2xx)".to_string());
        }
        300..=399 => {
            score += 5;
            reasons.push("Homepage reachable with redirect".to_string());
        }
        status => {
            score -= 15;
            reasons.push(format!("Homepage status {status}"));
        }
    }

    if input.redirect_count >= 3 {
        score -= 3;
        warnings.push("Many redirects; may complicate automation.".to_string());
    }

    if input.robots.present {
        reasons.push("robots.txt present".to_string());
        if input.robots.any_disallow {
            score -= 6;
            warnings.push(
                "robots.txt contains Disallow rules; review legality/ToS before scraping."
                    .to_string(),
            );
        }
    } else {
        reasons.push("robots.txt missing".to_string());
    }

    if input.sitemap_present {
        score += 6;
        reasons.push("sitemap.xml present (good for discovery)".to_string());
    }

    if input.structured_data {
        score += 8;
        reasons.push("Structured data detected (JSON-LD/microdata)".to_string());
    }

    if input.feed {
        score += 4;
        reasons.push("RSS/Atom feed detected".to_string());
    }

    if input.api_hints {
        score += 10;
        reasons.push("API/OpenAPI/Swagger hints detected".to_string());
    }

    if input.login_form {
        score -= 12;
        warnings.push(
            "Login/password form detected; automation may require authenticated flows."
                .to_string(),
        );
    }

    if input.captcha_hints {
        score -= 20;
        warnings.push(
            "CAPTCHA/anti-bot hints detected; browser automation may be blocked.".to_string(),
        );
    }

    let spa = input.platform_hints.iter().any(|h| h == SPA_HINT);
    if spa {
        score -= 6;
        reasons.push(
            "Likely SPA/heavy JS (browser automation more likely than scraping)".to_string(),
        );
    }

    // Anti-bot behind Cloudflare compounds the friction
    if input.platform_hints.iter().any(|h| h == "Cloudflare") && input.captcha_hints {
        score -= 6;
    }

    let recommendation = if input.captcha_hints {
        Recommendation::ApiWithFriction
    } else if input.api_hints {
        Recommendation::ApiIntegration
    } else if spa {
        Recommendation::BrowserAutomation
    } else {
        Recommendation::ScrapingFeasible
    };

    Evaluation {
        score: score.clamp(0, 100) as u8,
        recommendation,
        reasons,
        warnings,
    }
}
