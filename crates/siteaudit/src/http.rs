//! HTTP plumbing shared by the page fetch and the adjunct probes
//!
//! Redirects are followed manually so the hop count and final URL can be
//! reported. Body reads are bounded by both a deadline and a byte cap;
//! a truncated body is still handed to the detectors.

use crate::error::AuditError;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LOCATION, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Maximum redirect hops to follow for any single request
const MAX_REDIRECTS: usize = 10;

/// Total deadline for reading a response body
const BODY_TIMEOUT: Duration = Duration::from_secs(30);

/// Byte cap on analyzed body content
const BODY_CAP: usize = 2 * 1024 * 1024;

/// Accept header sent with every request
const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A fully fetched response, after redirect following
#[derive(Debug)]
pub(crate) struct FetchedPage {
    /// URL of the response that was actually read
    pub final_url: Url,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body, lossily decoded, possibly truncated
    pub body: String,
    /// Redirect hops followed to get here
    pub redirect_count: usize,
}

/// Thin wrapper over one shared reqwest client
pub(crate) struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client with the audit's User-Agent and per-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, AuditError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(crate::DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(AuditError::ClientBuildError)?;

        Ok(Self { inner })
    }

    /// GET a URL, following redirects up to [`MAX_REDIRECTS`] hops
    ///
    /// Past the hop cap the last response is returned as-is, 3xx status
    /// and all.
    pub async fn fetch_page(&self, url: Url) -> Result<FetchedPage, AuditError> {
        let mut current = url;
        let mut redirect_count = 0usize;

        loop {
            let response = self
                .inner
                .get(current.clone())
                .send()
                .await
                .map_err(AuditError::from_reqwest)?;

            let status = response.status();
            if status.is_redirection() && redirect_count < MAX_REDIRECTS {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|loc| current.join(loc).ok());
                if let Some(next) = location {
                    debug!(from = %current, to = %next, "Following redirect");
                    redirect_count += 1;
                    current = next;
                    continue;
                }
            }

            let headers = response.headers().clone();
            let (body, truncated) = read_body_bounded(response, BODY_TIMEOUT, BODY_CAP).await;
            if truncated {
                warn!(url = %current, "Body read truncated, analyzing partial content");
            }

            return Ok(FetchedPage {
                final_url: current,
                status: status.as_u16(),
                headers,
                body: String::from_utf8_lossy(&body).to_string(),
                redirect_count,
            });
        }
    }

    /// GET an adjunct resource (robots.txt, sitemap.xml)
    ///
    /// Adjunct probes never fail the audit; any transport error maps to None.
    pub async fn fetch_adjunct(&self, url: Url) -> Option<(u16, String)> {
        match self.fetch_page(url.clone()).await {
            Ok(page) => Some((page.status, page.body)),
            Err(e) => {
                debug!(url = %url, error = %e, "Adjunct probe failed");
                None
            }
        }
    }
}

/// Read a response body with a total deadline and byte cap,
/// returning partial content when either limit is hit
async fn read_body_bounded(
    response: reqwest::Response,
    timeout: Duration,
    cap: usize,
) -> (Bytes, bool) {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let chunk_future = stream.next();
        let timeout_future = tokio::time::sleep_until(deadline);

        tokio::select! {
            chunk = chunk_future => {
                match chunk {
                    Some(Ok(bytes)) => {
                        body.extend_from_slice(&bytes);
                        if body.len() >= cap {
                            body.truncate(cap);
                            return (Bytes::from(body), true);
                        }
                    }
                    Some(Err(e)) => {
                        warn!("Error reading body chunk: {}", e);
                        let partial = !body.is_empty();
                        return (Bytes::from(body), partial);
                    }
                    None => {
                        // Stream complete
                        return (Bytes::from(body), false);
                    }
                }
            }
            _ = timeout_future => {
                warn!("Body deadline reached, returning partial content");
                return (Bytes::from(body), true);
            }
        }
    }
}
