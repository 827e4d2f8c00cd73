//! Signal detectors
//!
//! Each detector is a stateless function of one fetched response.
//! Page-level detectors take a [`Page`] built once from the main fetch;
//! robots/sitemap probes issue their own adjunct GETs.

mod page;
mod platform;
pub(crate) mod robots;
pub(crate) mod sitemap;

pub(crate) use page::{
    detect_api_hints, detect_captcha_hints, detect_feed, detect_login_form,
    detect_structured_data,
};
pub(crate) use platform::platform_hints;

use crate::html::{scan_tags, Tag};
use reqwest::header::HeaderMap;
use url::Url;

/// Pre-scanned main page shared by all page-level detectors
pub(crate) struct Page {
    /// Final URL after redirects, used to resolve relative hrefs
    pub final_url: Url,
    /// Raw body as fetched
    pub body: String,
    /// Lowercased body for keyword scans
    pub body_lower: String,
    /// Scanned tags
    pub tags: Vec<Tag>,
    /// Server header, lowercased
    pub server: String,
    /// X-Powered-By header, lowercased
    pub powered_by: String,
}

impl Page {
    pub fn new(final_url: Url, headers: &HeaderMap, body: String) -> Self {
        let body_lower = body.to_lowercase();
        let tags = scan_tags(&body);
        let server = header_lower(headers, "server");
        let powered_by = header_lower(headers, "x-powered-by");

        Self {
            final_url,
            body,
            body_lower,
            tags,
            server,
            powered_by,
        }
    }
}

fn header_lower(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn test_page(body: &str) -> Page {
    let url = Url::parse("https://example.com/").unwrap();
    Page::new(url, &HeaderMap::new(), body.to_string())
}
