//! sitemap.xml probe

use crate::http::HttpClient;
use tracing::debug;
use url::Url;

/// Fast heuristic: a 200 with a non-blank body at /sitemap.xml counts
/// as present. Probe failures count as absent.
pub(crate) async fn probe(client: &HttpClient, base: &Url) -> bool {
    let Ok(url) = base.join("/sitemap.xml") else {
        return false;
    };

    debug!(url = %url, "Probing sitemap.xml");
    match client.fetch_adjunct(url).await {
        Some((status, body)) => present(status, &body),
        None => false,
    }
}

/// Presence rule shared with tests
pub(crate) fn present(status: u16, body: &str) -> bool {
    status == 200 && !body.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_rules() {
        assert!(present(200, "<urlset></urlset>"));
        assert!(!present(200, "   \n  "));
        assert!(!present(404, "<urlset></urlset>"));
        assert!(!present(200, ""));
    }
}
