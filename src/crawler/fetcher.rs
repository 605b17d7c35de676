//! HTTP fetcher implementation
//!
//! This module handles all network access for the crawler:
//! - The [`Fetcher`] trait the crawl loop talks to
//! - Building the reqwest client with the configured user agent and timeouts
//! - Mapping transport, status and body failures onto [`FetchError`]

use crate::config::Config;
use crate::url::to_fetch_url;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Content-Type header value, empty when the server sent none
    pub content_type: String,

    /// Body decoded as text, left empty for non-text responses
    pub body: String,
}

impl FetchedPage {
    pub fn new(content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Returns true if the declared content type is text-like
    pub fn is_text(&self) -> bool {
        is_text_content(&self.content_type)
    }
}

/// Returns true for content types eligible for extraction
///
/// Any type mentioning `text` qualifies (`text/html`, `text/plain`,
/// `text/css`, ...). Binary assets never do.
pub fn is_text_content(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text")
}

/// Transport used by the crawler to retrieve a page
///
/// `uri` is scheme-less. Implementations decide how to turn it into a
/// request; the crawler only cares about the outcome.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<FetchedPage, FetchError>;
}

/// Maximum number of redirect hops followed for a single fetch
pub const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// HTTP redirects are followed transparently up to [`MAX_REDIRECTS`] hops.
/// Redirect loops and longer chains are transport failures.
///
/// # Example
///
/// ```no_run
/// use email_harvest::config::Config;
/// use email_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by reqwest, always speaking plain HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> Result<FetchedPage, FetchError> {
        let raw_url = to_fetch_url(uri);
        let url = Url::parse(&raw_url).map_err(|e| FetchError::MalformedUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: raw_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: raw_url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Binary assets are never downloaded.
        if !is_text_content(&content_type) {
            return Ok(FetchedPage::new(content_type, String::new()));
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: raw_url,
            message: e.to_string(),
        })?;

        Ok(FetchedPage { content_type, body })
    }
}
