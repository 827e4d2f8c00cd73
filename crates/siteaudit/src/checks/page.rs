//! Page-level signal detectors: login form, CAPTCHA, structured data,
//! feeds, API hints

use crate::checks::Page;
use once_cell::sync::Lazy;
use regex::Regex;

/// CAPTCHA keywords looked up in the lowercased body
const CAPTCHA_KEYWORDS: &[&str] = &[
    "captcha",
    "recaptcha",
    "hcaptcha",
    "cloudflare turnstile",
    "turnstile",
];

/// CAPTCHA provider markers in iframe/script src attributes
const CAPTCHA_SRC_MARKERS: &[&str] = &["recaptcha", "hcaptcha", "turnstile"];

/// API documentation keywords looked up in the lowercased body
const API_KEYWORDS: &[&str] = &[
    "openapi",
    "swagger",
    "api/docs",
    "api-docs",
    "/graphql",
    "rest api",
];

/// API documentation markers in resolved link paths
const API_PATH_MARKERS: &[&str] = &["swagger", "openapi", "api-docs", "graphql"];

/// Absolute URL ending in .json mentioned anywhere in the body
static JSON_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s'"]+\.json"#).expect("valid json url pattern")
});

/// Any password input means a login/auth wall is possible
pub(crate) fn detect_login_form(page: &Page) -> bool {
    page.tags.iter().any(|t| {
        !t.closing
            && t.name == "input"
            && t.attr("type")
                .is_some_and(|v| v.eq_ignore_ascii_case("password"))
    })
}

/// Keyword and provider-embed heuristics for CAPTCHA/anti-bot presence
pub(crate) fn detect_captcha_hints(page: &Page) -> bool {
    if CAPTCHA_KEYWORDS.iter().any(|k| page.body_lower.contains(k)) {
        return true;
    }

    page.tags.iter().any(|t| {
        !t.closing
            && (t.name == "iframe" || t.name == "script")
            && t.attr("src").is_some_and(|src| {
                let src = src.to_lowercase();
                CAPTCHA_SRC_MARKERS.iter().any(|m| src.contains(m))
            })
    })
}

/// JSON-LD script blocks are the best quick signal; fall back to a light
/// microdata check (itemscope)
pub(crate) fn detect_structured_data(page: &Page) -> bool {
    let json_ld = page.tags.iter().any(|t| {
        !t.closing
            && t.name == "script"
            && t.attr("type")
                .is_some_and(|v| v.eq_ignore_ascii_case("application/ld+json"))
    });
    if json_ld {
        return true;
    }

    page.tags.iter().any(|t| !t.closing && t.has_attr("itemscope"))
}

/// RSS/Atom advertised via `<link rel="alternate" type=...>`
pub(crate) fn detect_feed(page: &Page) -> bool {
    page.tags.iter().any(|t| {
        if t.closing || t.name != "link" {
            return false;
        }
        let rel_alternate = t
            .attr("rel")
            .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("alternate")));
        if !rel_alternate {
            return false;
        }
        t.attr("type").is_some_and(|ty| {
            let ty = ty.to_lowercase();
            ty == "application/rss+xml" || ty == "application/atom+xml"
        })
    })
}

/// API surface hints: doc keywords, swagger/graphql link targets, or
/// absolute .json URLs mentioned in scripts
///
/// Returns the matched markers, deduplicated; empty means no hints.
pub(crate) fn detect_api_hints(page: &Page) -> Vec<String> {
    let mut hints: Vec<String> = Vec::new();

    for keyword in API_KEYWORDS {
        if page.body_lower.contains(keyword) {
            hints.push(format!("keyword: {keyword}"));
        }
    }

    // Explicit links to swagger/openapi endpoints
    let linked = page.tags.iter().any(|t| {
        if t.closing || t.name != "a" {
            return false;
        }
        let Some(href) = t.attr("href") else {
            return false;
        };
        let Ok(resolved) = page.final_url.join(href) else {
            return false;
        };
        let path = resolved.path().to_lowercase();
        API_PATH_MARKERS.iter().any(|m| path.contains(m))
    });
    if linked {
        hints.push("api docs link".to_string());
    }

    if JSON_URL_RE.is_match(&page.body) {
        hints.push("json endpoint url".to_string());
    }

    hints
}
