//! HTTP implementation of the citeforge fetch capability.
//!
//! Wraps a `reqwest` client behind the [`Fetch`] trait. Transport concerns
//! (timeouts, redirects, charset decoding) live here; the rest of the
//! pipeline only sees decoded text or a classified [`FetchError`].
//!
//! Response vetting, in order:
//! - status must be 200
//! - `content-length`, when present, must not exceed the configured cap
//! - `content-type`, when present, must be `text/*` or `application/json`
//!   (the generalist bibliographic provider speaks JSON)
//! - the decoded body must not exceed the cap either (servers lie about
//!   content-length)

use async_trait::async_trait;
use tracing::debug;

use citeforge_config::AppConfig;
use citeforge_core::error::FetchError;
use citeforge_core::fetch::{Document, Fetch};

/// Reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_response_bytes: u64,
}

impl HttpFetcher {
    /// Create a fetcher from application configuration.
    pub fn new(config: &AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_response_bytes: config.max_response_bytes,
        }
    }
}

/// Classify response metadata before the body is consumed.
fn check_headers(
    status: u16,
    content_type: Option<&str>,
    content_length: Option<u64>,
    max_response_bytes: u64,
) -> Result<(), FetchError> {
    if status != 200 {
        return Err(FetchError::InvalidStatus(status));
    }
    if let Some(length) = content_length {
        if length > max_response_bytes {
            return Err(FetchError::ContentLength(length));
        }
    }
    if let Some(content_type) = content_type {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        if !essence.starts_with("text/") && essence != "application/json" {
            return Err(FetchError::ContentType(content_type.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        debug!(url, "fetching document");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let content_length = response.content_length();
        check_headers(
            status,
            content_type.as_deref(),
            content_length,
            self.max_response_bytes,
        )?;

        let final_url = response.url().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if text.len() as u64 > self.max_response_bytes {
            return Err(FetchError::ContentLength(text.len() as u64));
        }

        Ok(Document::new(final_url, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: u64 = 2_000_000;

    #[test]
    fn ok_for_html() {
        assert!(check_headers(200, Some("text/html; charset=utf-8"), Some(1000), CAP).is_ok());
    }

    #[test]
    fn ok_for_json() {
        assert!(check_headers(200, Some("application/json"), None, CAP).is_ok());
    }

    #[test]
    fn ok_when_content_type_missing() {
        assert!(check_headers(200, None, None, CAP).is_ok());
    }

    #[test]
    fn non_200_is_invalid_status() {
        assert!(matches!(
            check_headers(404, Some("text/html"), None, CAP),
            Err(FetchError::InvalidStatus(404))
        ));
    }

    #[test]
    fn binary_content_type_rejected() {
        assert!(matches!(
            check_headers(200, Some("application/pdf"), None, CAP),
            Err(FetchError::ContentType(_))
        ));
    }

    #[test]
    fn oversized_content_length_rejected() {
        assert!(matches!(
            check_headers(200, Some("text/html"), Some(CAP + 1), CAP),
            Err(FetchError::ContentLength(_))
        ));
    }

    #[test]
    fn fetcher_builds_from_default_config() {
        let fetcher = HttpFetcher::new(&AppConfig::default());
        assert_eq!(fetcher.max_response_bytes, CAP);
    }
}
