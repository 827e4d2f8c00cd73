//! Platform/tech fingerprinting from headers, meta generator, and body
//! markers

use crate::checks::Page;
use crate::html::visible_text_len;
use crate::types::SPA_HINT;

/// Script count at or above which a sparse page looks client-rendered
const SPA_SCRIPT_THRESHOLD: usize = 25;

/// Visible text length below which a script-heavy page looks client-rendered
const SPA_TEXT_THRESHOLD: usize = 600;

/// Collect platform hints, sorted and deduplicated
pub(crate) fn platform_hints(page: &Page) -> Vec<String> {
    let mut hints: Vec<&str> = Vec::new();

    let generator = page
        .tags
        .iter()
        .find(|t| {
            !t.closing
                && t.name == "meta"
                && t.attr("name").is_some_and(|n| n.eq_ignore_ascii_case("generator"))
        })
        .and_then(|t| t.attr("content"))
        .map(|c| c.to_lowercase())
        .unwrap_or_default();

    if generator.contains("wordpress") || page.body_lower.contains("wp-content") {
        hints.push("WordPress");
    }
    if page.body_lower.contains("shopify")
        || page.powered_by.contains("x-shopify")
        || page.server.contains("shopify")
    {
        hints.push("Shopify");
    }
    if page.body_lower.contains("wix") {
        hints.push("Wix");
    }
    if page.body_lower.contains("squarespace") {
        hints.push("Squarespace");
    }

    // SPA-ish: lots of scripts with little rendered text
    let script_count = page
        .tags
        .iter()
        .filter(|t| !t.closing && t.name == "script")
        .count();
    if script_count >= SPA_SCRIPT_THRESHOLD && visible_text_len(&page.body) < SPA_TEXT_THRESHOLD {
        hints.push(SPA_HINT);
    }

    if page.server.contains("cloudflare") || page.body_lower.contains("cloudflare") {
        hints.push("Cloudflare");
    }

    hints.sort_unstable();
    hints.dedup();
    hints.into_iter().map(String::from).collect()
}
