//! robots.txt probe

use crate::http::HttpClient;
use crate::types::RobotsInfo;
use tracing::debug;
use url::Url;

/// Maximum Disallow lines kept in the report
const MAX_DISALLOW_LINES: usize = 50;

/// Fetch and parse robots.txt at the origin of `base`
///
/// Never fails: unreachable or non-200 robots.txt is reported as absent.
pub(crate) async fn probe(client: &HttpClient, base: &Url) -> RobotsInfo {
    let Ok(url) = base.join("/robots.txt") else {
        return RobotsInfo::absent(format!("{base}robots.txt"));
    };

    debug!(url = %url, "Probing robots.txt");
    match client.fetch_adjunct(url.clone()).await {
        Some((status, body)) => parse(url.to_string(), status, &body),
        None => RobotsInfo::absent(url.to_string()),
    }
}

/// Parse a robots.txt response into a [`RobotsInfo`]
pub(crate) fn parse(url: String, status: u16, body: &str) -> RobotsInfo {
    if status != 200 || body.is_empty() {
        return RobotsInfo::absent(url);
    }

    let mut disallow_lines = Vec::new();
    let mut any_disallow = false;
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let is_disallow = line
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("disallow:"));
        if is_disallow {
            any_disallow = true;
            if disallow_lines.len() < MAX_DISALLOW_LINES {
                disallow_lines.push(line.to_string());
            }
        }
    }

    RobotsInfo {
        url,
        present: true,
        any_disallow,
        disallow_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/robots.txt";

    #[test]
    fn test_parse_with_disallow() {
        let body = "User-agent: *\nDisallow: /admin\nDisallow: /private\n";
        let info = parse(URL.to_string(), 200, body);
        assert!(info.present);
        assert!(info.any_disallow);
        assert_eq!(
            info.disallow_lines,
            vec!["Disallow: /admin", "Disallow: /private"]
        );
    }

    #[test]
    fn test_parse_case_insensitive_and_comments() {
        let body = "# policy file\nuser-agent: *\nDISALLOW: /x\n\ndisallow: /y\n";
        let info = parse(URL.to_string(), 200, body);
        assert!(info.any_disallow);
        assert_eq!(info.disallow_lines, vec!["DISALLOW: /x", "disallow: /y"]);
    }

    #[test]
    fn test_parse_allow_all() {
        let body = "User-agent: *\nAllow: /\n";
        let info = parse(URL.to_string(), 200, body);
        assert!(info.present);
        assert!(!info.any_disallow);
        assert!(info.disallow_lines.is_empty());
    }

    #[test]
    fn test_non_200_is_absent() {
        let info = parse(URL.to_string(), 404, "Disallow: /");
        assert!(!info.present);
        assert!(!info.any_disallow);
    }

    #[test]
    fn test_empty_body_is_absent() {
        let info = parse(URL.to_string(), 200, "");
        assert!(!info.present);
    }

    #[test]
    fn test_disallow_lines_capped() {
        let body: String = (0..120).map(|i| format!("Disallow: /p{i}\n")).collect();
        let info = parse(URL.to_string(), 200, &body);
        assert!(info.any_disallow);
        assert_eq!(info.disallow_lines.len(), 50);
    }
}
